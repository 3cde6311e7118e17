//! Color classification and the replacement decision table.
//!
//! Both pipelines share the same fixed classification rules: a color is
//! *white-ish* when all three channels exceed 200, *black-ish* when all
//! three are below 50. The SVG pipeline additionally parses color tokens
//! out of attribute text (named colors, hex forms, `rgb()` functions)
//! before classifying them.

use serde::{Deserialize, Serialize};

// ============================================================================
// ColorSelector
// ============================================================================

/// The target color chosen by the caller.
///
/// Serializes to its lowercase name (`"blue"`, `"red"`, `"white"`) so it
/// can travel inside a [`RecolorSettings`](crate::RecolorSettings) JSON
/// payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSelector {
    Blue,
    Red,
    White,
}

impl ColorSelector {
    /// The exact RGB triple written for this selector.
    pub fn rgb(self) -> Rgb {
        match self {
            Self::Blue => Rgb::new(0, 0, 255),
            Self::Red => Rgb::new(255, 0, 0),
            Self::White => Rgb::new(255, 255, 255),
        }
    }
}

// ============================================================================
// Rgb
// ============================================================================

/// An RGB triple with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Pure black, the replacement color in invert mode.
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Returns `true` if all three channels are strictly above 200.
    pub fn is_white_ish(self) -> bool {
        self.r > 200 && self.g > 200 && self.b > 200
    }

    /// Returns `true` if all three channels are strictly below 50.
    pub fn is_black_ish(self) -> bool {
        self.r < 50 && self.g < 50 && self.b < 50
    }

    /// Formats the triple as a CSS `rgb()` function, e.g. `rgb(0, 0, 255)`.
    pub fn to_css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

// ============================================================================
// Token parsing
// ============================================================================

/// Parses a color expression found in SVG attribute text.
///
/// Accepted forms, all case-insensitive:
/// - named CSS colors (`white`, `black`, `red`, ...)
/// - 3-digit hex (`#fff`)
/// - 6-digit hex (`#ffffff`)
/// - `rgb(r, g, b)` with integer channels
///
/// Anything else (`none`, `url(#grad)`, `currentColor`, percentages,
/// malformed text) yields `None`. Callers treat that as "no
/// classification, no replacement": the token is left untouched rather
/// than reported as an error.
pub fn parse_color_token(token: &str) -> Option<Rgb> {
    let token = token.trim();

    if let Some(hex) = token.strip_prefix('#') {
        return parse_hex(hex);
    }

    let lower = token.to_ascii_lowercase();
    if let Some(args) = lower.strip_prefix("rgb(").and_then(|s| s.strip_suffix(')')) {
        return parse_rgb_args(args);
    }

    palette::named::from_str(&lower).map(|c| Rgb::new(c.red, c.green, c.blue))
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    match hex.len() {
        3 => {
            let nibble = |i| u8::from_str_radix(&hex[i..i + 1], 16).ok();
            // #abc expands to #aabbcc
            Some(Rgb::new(nibble(0)? * 17, nibble(1)? * 17, nibble(2)? * 17))
        }
        6 => {
            let byte = |i| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some(Rgb::new(byte(0)?, byte(2)?, byte(4)?))
        }
        _ => None,
    }
}

fn parse_rgb_args(args: &str) -> Option<Rgb> {
    let mut channels = args.split(',').map(|part| part.trim().parse::<u8>().ok());
    let r = channels.next()??;
    let g = channels.next()??;
    let b = channels.next()??;
    if channels.next().is_some() {
        return None;
    }
    Some(Rgb::new(r, g, b))
}

// ============================================================================
// Replacement rule
// ============================================================================

/// Decides the replacement for a classified color, if any.
///
/// Normal mode maps white-ish colors to the target and leaves everything
/// else alone. Invert mode checks black-ish first, then an exact target
/// match, then white-ish; the first matching rule wins:
///
/// - black-ish → target color
/// - equals target → black
/// - white-ish → black
/// - anything else → unchanged
pub fn replacement_for(color: Rgb, target: ColorSelector, invert: bool) -> Option<Rgb> {
    if !invert {
        return color.is_white_ish().then(|| target.rgb());
    }

    if color.is_black_ish() {
        Some(target.rgb())
    } else if color == target.rgb() {
        Some(Rgb::BLACK)
    } else if color.is_white_ish() {
        Some(Rgb::BLACK)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn white_threshold_is_strict() {
        assert!(!Rgb::new(200, 200, 200).is_white_ish());
        assert!(Rgb::new(201, 201, 201).is_white_ish());
        assert!(!Rgb::new(255, 255, 200).is_white_ish());
    }

    #[test]
    fn black_threshold_is_strict() {
        assert!(!Rgb::new(50, 50, 50).is_black_ish());
        assert!(Rgb::new(49, 49, 49).is_black_ish());
        assert!(!Rgb::new(49, 49, 50).is_black_ish());
    }

    #[test]
    fn equivalent_white_forms_parse_identically() {
        let white = Rgb::new(255, 255, 255);
        for form in ["#fff", "#ffffff", "white", "WHITE", "rgb(255,255,255)", "rgb(255, 255, 255)"] {
            assert_eq!(parse_color_token(form), Some(white), "form: {form}");
        }
    }

    #[test]
    fn hex_forms() {
        assert_eq!(parse_color_token("#f00"), Some(Rgb::new(255, 0, 0)));
        assert_eq!(parse_color_token("#0000FF"), Some(Rgb::new(0, 0, 255)));
        assert_eq!(parse_color_token("#abc"), Some(Rgb::new(0xaa, 0xbb, 0xcc)));
        assert_eq!(parse_color_token("#12345"), None);
    }

    #[test]
    fn named_colors() {
        assert_eq!(parse_color_token("black"), Some(Rgb::new(0, 0, 0)));
        assert_eq!(parse_color_token("red"), Some(Rgb::new(255, 0, 0)));
        assert_eq!(parse_color_token("blue"), Some(Rgb::new(0, 0, 255)));
    }

    #[test]
    fn unparseable_tokens_yield_none() {
        for form in ["none", "transparent", "url(#grad)", "currentColor", "rgb(300,0,0)", "rgb(1,2)", ""] {
            assert_eq!(parse_color_token(form), None, "form: {form}");
        }
    }

    #[test]
    fn normal_mode_maps_white_to_target() {
        let white = Rgb::new(255, 255, 255);
        assert_eq!(
            replacement_for(white, ColorSelector::Blue, false),
            Some(Rgb::new(0, 0, 255))
        );
        assert_eq!(replacement_for(Rgb::new(10, 10, 10), ColorSelector::Blue, false), None);
        assert_eq!(replacement_for(Rgb::new(128, 128, 128), ColorSelector::Red, false), None);
    }

    #[test]
    fn invert_mode_decision_table() {
        let target = ColorSelector::Red;
        // black-ish -> target
        assert_eq!(
            replacement_for(Rgb::new(0, 0, 0), target, true),
            Some(Rgb::new(255, 0, 0))
        );
        // exact target match -> black
        assert_eq!(
            replacement_for(Rgb::new(255, 0, 0), target, true),
            Some(Rgb::BLACK)
        );
        // white-ish -> black
        assert_eq!(
            replacement_for(Rgb::new(255, 255, 255), target, true),
            Some(Rgb::BLACK)
        );
        // mid-tones untouched
        assert_eq!(replacement_for(Rgb::new(128, 128, 128), target, true), None);
    }

    #[test]
    fn invert_white_target_still_blackens_white() {
        // White both matches the target and is white-ish; either branch
        // lands on black.
        assert_eq!(
            replacement_for(Rgb::new(255, 255, 255), ColorSelector::White, true),
            Some(Rgb::BLACK)
        );
        // Black-ish is checked first and wins.
        assert_eq!(
            replacement_for(Rgb::new(20, 20, 20), ColorSelector::White, true),
            Some(Rgb::new(255, 255, 255))
        );
    }

    #[test]
    fn css_formatting() {
        assert_eq!(Rgb::new(0, 0, 255).to_css(), "rgb(0, 0, 255)");
        assert_eq!(Rgb::BLACK.to_css(), "rgb(0, 0, 0)");
    }

    #[test]
    fn selector_serde_wire_form() {
        assert_eq!(serde_json::to_string(&ColorSelector::Blue).unwrap(), "\"blue\"");
        let c: ColorSelector = serde_json::from_str("\"white\"").unwrap();
        assert_eq!(c, ColorSelector::White);
    }
}

//! Serializable recoloring settings for cross-process communication.
//!
//! The host application collects the target color and invert flag in
//! its frontend and ships them to the processing side as JSON;
//! [`RecolorSettings`] is that wire format.

use serde::{Deserialize, Serialize};

use crate::remap::color::ColorSelector;

/// The caller-chosen recoloring parameters.
///
/// # JSON Format
///
/// ```json
/// { "color": "blue", "invert": false }
/// ```
///
/// `invert` may be omitted and defaults to `false`.
///
/// # Example
///
/// ```
/// use tintshift::{ColorSelector, RecolorSettings};
///
/// let settings = RecolorSettings::new(ColorSelector::Red).with_invert(true);
/// let json = settings.to_json().unwrap();
/// let restored = RecolorSettings::from_json(&json).unwrap();
/// assert_eq!(restored, settings);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecolorSettings {
    /// The target color.
    pub color: ColorSelector,

    /// Whether to apply the inverted replacement rule (SVG path only).
    #[serde(default)]
    pub invert: bool,
}

impl RecolorSettings {
    /// Creates settings for the given color with inversion off.
    pub fn new(color: ColorSelector) -> Self {
        Self {
            color,
            invert: false,
        }
    }

    /// Sets the invert flag.
    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Serializes the settings to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes settings from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

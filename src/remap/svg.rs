//! SVG recoloring pipeline.
//!
//! Parses the markup into an element tree, rewrites every color token
//! found on the `fill`, `stroke`, and `style` attribute surfaces
//! according to the replacement rule, and serializes the tree back to
//! text. The input markup is never touched; each call parses a fresh
//! working copy.
//!
//! Re-encoding preserves element structure, attributes, and text
//! content. Incidental syntax that the XML parser resolves (the XML
//! declaration, CDATA sections, entity references) comes back in
//! normalized form.

use roxmltree::{Document, Node, NodeType, ParsingOptions};

use crate::error::RecolorError;
use crate::remap::color::{parse_color_token, replacement_for, ColorSelector, Rgb};
use crate::resource::{ImageSource, RecoloredImage, SVG_MEDIA_TYPE};

const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// Recolors the `fill`/`stroke` colors of an SVG document.
///
/// In normal mode, white-ish colors become the selected color. In
/// invert mode, black-ish colors become the selected color while colors
/// matching the selection (and white-ish colors) become black; see
/// [`replacement_for`] for the exact rule. Color tokens that cannot be
/// parsed (`none`, gradients, `currentColor`, ...) are left unchanged.
///
/// Fails with [`InvalidInputKind`](RecolorError::InvalidInputKind) when
/// the declared media type is not `image/svg+xml` or the payload is not
/// UTF-8 text, [`PayloadTooLarge`](RecolorError::PayloadTooLarge) over
/// the 2 MB ceiling, and [`MalformedInput`](RecolorError::MalformedInput)
/// when the markup does not parse.
///
/// # Example
///
/// ```
/// use tintshift::{recolor_svg, ColorSelector, ImageSource};
///
/// let source = ImageSource::from_svg_markup(
///     r#"<svg xmlns="http://www.w3.org/2000/svg"><rect fill="white"/></svg>"#,
/// );
/// let output = recolor_svg(&source, ColorSelector::Blue, false).unwrap();
/// assert!(output.as_svg_str().unwrap().contains(r#"fill="rgb(0, 0, 255)""#));
/// ```
pub fn recolor_svg(
    source: &ImageSource,
    color: ColorSelector,
    invert: bool,
) -> Result<RecoloredImage, RecolorError> {
    if !source.is_svg() {
        return Err(RecolorError::InvalidInputKind {
            expected: SVG_MEDIA_TYPE,
            actual: source.media_type().to_string(),
        });
    }
    source.check_size()?;
    let markup = source.as_text()?;

    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(markup, options)?;

    let rule = Rule {
        target: color,
        invert,
    };
    let mut out = String::with_capacity(markup.len() + 64);
    for child in doc.root().children() {
        write_node(&mut out, child, &rule);
    }

    Ok(RecoloredImage::new(out.into_bytes(), SVG_MEDIA_TYPE))
}

#[derive(Clone, Copy)]
struct Rule {
    target: ColorSelector,
    invert: bool,
}

impl Rule {
    /// Replacement for a single color token, or `None` to keep it.
    fn replace_token(self, token: &str) -> Option<Rgb> {
        let color = parse_color_token(token)?;
        replacement_for(color, self.target, self.invert)
    }
}

// ============================================================================
// Attribute rewriting
// ============================================================================

/// Computes the new value for one attribute, or `None` to keep the
/// original. Only the three color-bearing surfaces are inspected.
fn rewritten_value(name: &str, value: &str, rule: &Rule) -> Option<String> {
    match name {
        "fill" | "stroke" => rule.replace_token(value).map(Rgb::to_css),
        "style" => rewrite_style(value, rule),
        _ => None,
    }
}

/// Rewrites `fill`/`stroke` declarations inside a `style` attribute.
///
/// Declarations are separated by `;`; property names match
/// case-insensitively. Unrelated declarations pass through verbatim.
/// Returns `None` when nothing changed.
fn rewrite_style(style: &str, rule: &Rule) -> Option<String> {
    let mut changed = false;
    let rebuilt: Vec<String> = style
        .split(';')
        .map(|declaration| {
            if let Some((property, value)) = declaration.split_once(':') {
                let name = property.trim();
                if name.eq_ignore_ascii_case("fill") || name.eq_ignore_ascii_case("stroke") {
                    if let Some(replacement) = rule.replace_token(value) {
                        changed = true;
                        return format!("{}: {}", name, replacement.to_css());
                    }
                }
            }
            declaration.to_string()
        })
        .collect();

    changed.then(|| rebuilt.join(";"))
}

// ============================================================================
// Serialization
// ============================================================================

fn write_node(out: &mut String, node: Node, rule: &Rule) {
    match node.node_type() {
        NodeType::Element => write_element(out, node, rule),
        NodeType::Text => push_escaped(out, node.text().unwrap_or(""), false),
        NodeType::Comment => {
            out.push_str("<!--");
            out.push_str(node.text().unwrap_or(""));
            out.push_str("-->");
        }
        NodeType::PI => {
            if let Some(pi) = node.pi() {
                out.push_str("<?");
                out.push_str(pi.target);
                if let Some(value) = pi.value {
                    out.push(' ');
                    out.push_str(value);
                }
                out.push_str("?>");
            }
        }
        NodeType::Root => {}
    }
}

fn write_element(out: &mut String, node: Node, rule: &Rule) {
    out.push('<');
    push_qualified_name(out, node);

    // Namespace declarations introduced by this element. The parser
    // exposes the full in-scope set per node, so only the ones absent
    // from the parent's scope are written back.
    let parent = node.parent().filter(|p| p.is_element());
    for ns in node.namespaces() {
        if ns.uri() == XML_NS {
            continue;
        }
        let inherited = parent.is_some_and(|p| {
            p.namespaces()
                .any(|pn| pn.name() == ns.name() && pn.uri() == ns.uri())
        });
        if inherited {
            continue;
        }
        match ns.name() {
            Some(prefix) => {
                out.push_str(" xmlns:");
                out.push_str(prefix);
            }
            None => out.push_str(" xmlns"),
        }
        out.push_str("=\"");
        push_escaped(out, ns.uri(), true);
        out.push('"');
    }

    for attr in node.attributes() {
        out.push(' ');
        if let Some(uri) = attr.namespace() {
            if let Some(prefix) = node.lookup_prefix(uri) {
                if !prefix.is_empty() {
                    out.push_str(prefix);
                    out.push(':');
                }
            }
        }
        out.push_str(attr.name());
        out.push_str("=\"");
        // Color surfaces are only ever unprefixed presentation attributes.
        let replacement = if attr.namespace().is_none() {
            rewritten_value(attr.name(), attr.value(), rule)
        } else {
            None
        };
        match replacement {
            Some(value) => push_escaped(out, &value, true),
            None => push_escaped(out, attr.value(), true),
        }
        out.push('"');
    }

    if node.children().next().is_none() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    for child in node.children() {
        write_node(out, child, rule);
    }
    out.push_str("</");
    push_qualified_name(out, node);
    out.push('>');
}

fn push_qualified_name(out: &mut String, node: Node) {
    let tag = node.tag_name();
    if let Some(uri) = tag.namespace() {
        if let Some(prefix) = node.lookup_prefix(uri) {
            if !prefix.is_empty() {
                out.push_str(prefix);
                out.push(':');
            }
        }
    }
    out.push_str(tag.name());
}

fn push_escaped(out: &mut String, text: &str, in_attribute: bool) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if in_attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recolor(markup: &str, color: ColorSelector, invert: bool) -> String {
        let source = ImageSource::from_svg_markup(markup);
        let output = recolor_svg(&source, color, invert).unwrap();
        output.as_svg_str().unwrap().to_string()
    }

    const SVG_NS: &str = r#"xmlns="http://www.w3.org/2000/svg""#;

    #[test]
    fn white_fill_forms_all_become_blue() {
        for form in ["white", "#fff", "#ffffff", "rgb(255, 255, 255)"] {
            let markup = format!(r#"<svg {SVG_NS}><rect fill="{form}"/></svg>"#);
            let result = recolor(&markup, ColorSelector::Blue, false);
            assert!(
                result.contains(r#"fill="rgb(0, 0, 255)""#),
                "form {form}: {result}"
            );
        }
    }

    #[test]
    fn stroke_attribute_is_rewritten() {
        let markup = format!(r##"<svg {SVG_NS}><path stroke="#FFF" fill="none"/></svg>"##);
        let result = recolor(&markup, ColorSelector::Red, false);
        assert!(result.contains(r#"stroke="rgb(255, 0, 0)""#), "{result}");
        assert!(result.contains(r#"fill="none""#), "{result}");
    }

    #[test]
    fn style_declarations_are_rewritten() {
        let markup = format!(
            r#"<svg {SVG_NS}><rect style="fill: white; stroke-width: 2; Stroke:#ffffff"/></svg>"#
        );
        let result = recolor(&markup, ColorSelector::Blue, false);
        assert!(
            result.contains("fill: rgb(0, 0, 255); stroke-width: 2;Stroke: rgb(0, 0, 255)"),
            "{result}"
        );
    }

    #[test]
    fn non_white_colors_untouched_in_normal_mode() {
        let markup = format!(r##"<svg {SVG_NS}><rect fill="#777777" stroke="black"/></svg>"##);
        let result = recolor(&markup, ColorSelector::Blue, false);
        assert!(result.contains(r##"fill="#777777""##), "{result}");
        assert!(result.contains(r#"stroke="black""#), "{result}");
    }

    #[test]
    fn invert_maps_black_to_target_and_target_to_black() {
        let markup = format!(
            r#"<svg {SVG_NS}><rect fill="black"/><circle fill="red"/></svg>"#
        );
        let result = recolor(&markup, ColorSelector::Red, true);
        assert!(result.contains(r#"<rect fill="rgb(255, 0, 0)"/>"#), "{result}");
        assert!(result.contains(r#"<circle fill="rgb(0, 0, 0)"/>"#), "{result}");
    }

    #[test]
    fn invert_maps_white_to_black() {
        let markup = format!(r##"<svg {SVG_NS}><rect fill="#ffffff"/></svg>"##);
        let result = recolor(&markup, ColorSelector::Blue, true);
        assert!(result.contains(r#"fill="rgb(0, 0, 0)""#), "{result}");
    }

    #[test]
    fn white_selector_recolors_white_to_white() {
        let markup = format!(r##"<svg {SVG_NS}><rect fill="#fff"/></svg>"##);
        let result = recolor(&markup, ColorSelector::White, false);
        assert!(result.contains(r#"fill="rgb(255, 255, 255)""#), "{result}");
    }

    #[test]
    fn unparseable_tokens_pass_through() {
        let markup = format!(
            r#"<svg {SVG_NS}><rect fill="url(#grad)" stroke="currentColor"/></svg>"#
        );
        let result = recolor(&markup, ColorSelector::Blue, false);
        assert!(result.contains(r#"fill="url(#grad)""#), "{result}");
        assert!(result.contains(r#"stroke="currentColor""#), "{result}");
    }

    #[test]
    fn no_op_input_round_trips() {
        let markup = format!(
            r##"<svg {SVG_NS} viewBox="0 0 10 10"><g id="layer"><rect x="1" y="1" fill="#808080"/><text>hi &amp; bye</text></g></svg>"##
        );
        let result = recolor(&markup, ColorSelector::Blue, false);
        assert_eq!(result, markup);
    }

    #[test]
    fn nested_elements_and_text_survive() {
        let markup = format!(
            r#"<svg {SVG_NS}><g fill="white"><rect fill="white"/><text>label</text></g></svg>"#
        );
        let result = recolor(&markup, ColorSelector::Red, false);
        assert_eq!(result.matches(r#"fill="rgb(255, 0, 0)""#).count(), 2, "{result}");
        assert!(result.contains("<text>label</text>"), "{result}");
    }

    #[test]
    fn prefixed_namespaces_are_preserved() {
        let markup = format!(
            r##"<svg {SVG_NS} xmlns:xlink="http://www.w3.org/1999/xlink"><use xlink:href="#a" fill="white"/></svg>"##
        );
        let result = recolor(&markup, ColorSelector::Blue, false);
        assert!(result.contains(r#"xmlns:xlink="http://www.w3.org/1999/xlink""#), "{result}");
        assert!(result.contains(r##"xlink:href="#a""##), "{result}");
        assert!(result.contains(r#"fill="rgb(0, 0, 255)""#), "{result}");
    }

    #[test]
    fn result_is_well_formed_xml() {
        let markup = format!(
            r#"<svg {SVG_NS}><!-- note --><rect fill="white" title="a &quot;b&quot;"/></svg>"#
        );
        let result = recolor(&markup, ColorSelector::Blue, false);
        Document::parse(&result).expect("reserialized output should parse");
        assert!(result.contains("<!-- note -->"), "{result}");
    }

    #[test]
    fn malformed_markup_is_rejected() {
        let source = ImageSource::from_svg_markup(r#"<svg><rect fill="white""#);
        let err = recolor_svg(&source, ColorSelector::Blue, false).unwrap_err();
        assert!(matches!(err, RecolorError::MalformedInput(_)));
    }

    #[test]
    fn raster_media_type_is_rejected() {
        let source = ImageSource::new(vec![0x89, 0x50, 0x4e, 0x47], "image/png");
        let err = recolor_svg(&source, ColorSelector::Blue, false).unwrap_err();
        assert!(matches!(err, RecolorError::InvalidInputKind { .. }));
    }

    #[test]
    fn oversized_payload_is_rejected() {
        let mut markup = String::from("<svg>");
        markup.push_str(&" ".repeat(3 * 1024 * 1024));
        markup.push_str("</svg>");
        let source = ImageSource::from_svg_markup(markup);
        let err = recolor_svg(&source, ColorSelector::Blue, false).unwrap_err();
        assert!(matches!(err, RecolorError::PayloadTooLarge { .. }));
    }
}

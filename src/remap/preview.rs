//! Rasterizes SVG markup for on-screen display.
//!
//! The recoloring pipelines return encoded resources; the host
//! dashboard still needs pixels to show. This renders markup to an
//! RGBA bitmap scaled to fit a square, which is a display concern and
//! therefore reports failure as `None` rather than an error.

use image::RgbaImage;
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};

/// Renders SVG markup to an RGBA image fitting within `size x size`.
///
/// Aspect ratio is preserved; the larger dimension ends up at `size`.
/// Returns `None` if the markup cannot be parsed or rendered.
///
/// # Example
///
/// ```
/// use tintshift::render_preview;
///
/// let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">
///     <rect width="10" height="10" fill="blue"/></svg>"#;
/// let preview = render_preview(svg, 64).unwrap();
/// assert_eq!(preview.width(), 64);
/// ```
pub fn render_preview(markup: &str, size: u32) -> Option<RgbaImage> {
    let tree = Tree::from_str(markup, &Options::default()).ok()?;

    let svg_size = tree.size();
    let scale = size as f32 / svg_size.width().max(svg_size.height());
    let width = (svg_size.width() * scale).ceil() as u32;
    let height = (svg_size.height() * scale).ceil() as u32;

    let mut pixmap = Pixmap::new(width, height)?;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    // tiny_skia stores premultiplied alpha; undo it before handing the
    // buffer to image::RgbaImage.
    let mut data = pixmap.take();
    for pixel in data.chunks_exact_mut(4) {
        let a = pixel[3];
        if a == 0 {
            pixel[..3].fill(0);
        } else if a < 255 {
            for channel in &mut pixel[..3] {
                *channel = ((*channel as u16 * 255) / a as u16).min(255) as u8;
            }
        }
    }

    RgbaImage::from_raw(width, height, data)
}

//! Recoloring pipelines.
//!
//! Two independent transforms share one classification core
//! ([`color`]): a raster pipeline that repaints white-ish pixels and an
//! SVG pipeline that rewrites color attributes, plus a display helper
//! that rasterizes markup. Each invocation builds its own buffers, so
//! concurrent calls share no state.

pub mod color;
pub mod preview;
pub mod raster;
pub mod svg;

pub use color::{parse_color_token, replacement_for, ColorSelector, Rgb};
pub use preview::render_preview;
pub use raster::recolor_raster;
pub use svg::recolor_svg;

use crate::error::RecolorError;
use crate::resource::{ImageSource, RecoloredImage};
use crate::settings::RecolorSettings;

/// Recolors an image, routing by its declared media type.
///
/// SVG sources (`image/svg+xml`) go through [`recolor_svg`] with the
/// full settings; everything else goes through [`recolor_raster`],
/// which ignores the invert flag and accepts only the blue and red
/// selectors.
///
/// # Example
///
/// ```
/// use tintshift::{recolor, ColorSelector, ImageSource, RecolorSettings};
///
/// let source = ImageSource::from_svg_markup(
///     r#"<svg xmlns="http://www.w3.org/2000/svg"><rect fill="white"/></svg>"#,
/// );
/// let settings = RecolorSettings::new(ColorSelector::Red);
/// let output = recolor(&source, &settings).unwrap();
/// assert_eq!(output.media_type(), "image/svg+xml");
/// ```
pub fn recolor(
    source: &ImageSource,
    settings: &RecolorSettings,
) -> Result<RecoloredImage, RecolorError> {
    if source.is_svg() {
        recolor_svg(source, settings.color, settings.invert)
    } else {
        recolor_raster(source, settings.color)
    }
}

//! Raster recoloring pipeline.
//!
//! Decodes a bitmap, replaces every white-ish pixel with the selected
//! color, and re-encodes as JPEG. This path supports only the blue and
//! red selectors and has no inversion mode.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat};

use crate::error::RecolorError;
use crate::remap::color::ColorSelector;
use crate::resource::{ImageSource, RecoloredImage};

/// Recolors the white-ish regions of a raster image.
///
/// Validation happens before any decode work: the selector must be
/// [`Blue`](ColorSelector::Blue) or [`Red`](ColorSelector::Red), the
/// declared media type must be a raster `image/*` type, and the payload
/// must fit the 2 MB ceiling.
///
/// Every pixel whose red, green, and blue channels are all above 200 is
/// overwritten with the selector's exact RGB value; alpha and all other
/// pixels are untouched. The result is re-encoded as `image/jpeg`
/// (which drops alpha, as the host app's download path expects).
///
/// # Example
///
/// ```no_run
/// use tintshift::{recolor_raster, ColorSelector, ImageSource};
///
/// let source = ImageSource::new(std::fs::read("capture.png")?, "image/png");
/// let output = recolor_raster(&source, ColorSelector::Blue)?;
/// std::fs::write("capture-blue.jpg", output.data())?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn recolor_raster(
    source: &ImageSource,
    color: ColorSelector,
) -> Result<RecoloredImage, RecolorError> {
    if !matches!(color, ColorSelector::Blue | ColorSelector::Red) {
        return Err(RecolorError::InvalidParameter(color));
    }
    if !source.media_type().starts_with("image/") {
        return Err(RecolorError::InvalidInputKind {
            expected: "image/*",
            actual: source.media_type().to_string(),
        });
    }
    source.check_size()?;

    let decoded = image::load_from_memory(source.data())?;
    let mut rgba = decoded.to_rgba8();

    let target = color.rgb();
    for pixel in rgba.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        if r > 200 && g > 200 && b > 200 {
            pixel.0 = [target.r, target.g, target.b, a];
        }
    }

    let mut encoded = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(rgba)
        .to_rgb8()
        .write_to(&mut encoded, ImageFormat::Jpeg)?;

    Ok(RecoloredImage::new(encoded.into_inner(), "image/jpeg"))
}

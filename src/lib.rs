//! tintshift: SVG and raster image recoloring library
//!
//! This crate recolors images by fixed classification rules: *white-ish*
//! regions (all RGB channels above 200) are repainted with a caller-chosen
//! target color, and an invert mode additionally maps *black-ish* colors
//! (all channels below 50) to the target while blackening colors that
//! match it. It is the processing core behind a dashboard app that lets
//! users download recolored captures.
//!
//! Two pipelines are exposed:
//!
//! - [`recolor_raster`]: decodes a bitmap, repaints white-ish pixels,
//!   re-encodes as JPEG. Blue and red targets only, no invert mode.
//! - [`recolor_svg`]: parses SVG markup, rewrites color tokens on the
//!   `fill`, `stroke`, and `style` attribute surfaces, reserializes.
//!   Blue, red, and white targets, with optional inversion.
//!
//! # Example
//!
//! ```
//! use tintshift::{recolor_svg, ColorSelector, ImageSource};
//!
//! let source = ImageSource::from_svg_markup(
//!     r##"<svg xmlns="http://www.w3.org/2000/svg"><rect fill="#fff"/></svg>"##,
//! );
//! let output = recolor_svg(&source, ColorSelector::Blue, false).unwrap();
//! assert!(output.as_svg_str().unwrap().contains(r#"fill="rgb(0, 0, 255)""#));
//! ```
//!
//! # Serializable Settings
//!
//! For frontend-backend communication, parameters travel as a
//! [`RecolorSettings`] JSON payload and [`recolor`] routes to the right
//! pipeline by the source's declared media type:
//!
//! ```
//! use tintshift::{recolor, ImageSource, RecolorSettings};
//!
//! let settings = RecolorSettings::from_json(r#"{ "color": "red", "invert": true }"#).unwrap();
//! let source = ImageSource::from_svg_markup(
//!     r#"<svg xmlns="http://www.w3.org/2000/svg"><rect fill="black"/></svg>"#,
//! );
//! let output = recolor(&source, &settings).unwrap();
//! assert!(output.as_svg_str().unwrap().contains(r#"fill="rgb(255, 0, 0)""#));
//! ```
//!
//! All failures are synchronous [`RecolorError`] values; the only silent
//! tolerance is an individual color token that cannot be parsed, which is
//! left unchanged by design.

mod error;
mod remap;
mod resource;
mod settings;

pub use error::RecolorError;
pub use remap::{
    parse_color_token, recolor, recolor_raster, recolor_svg, render_preview, replacement_for,
    ColorSelector, Rgb,
};
pub use resource::{ImageSource, RecoloredImage, MAX_PAYLOAD_BYTES, SVG_MEDIA_TYPE};
pub use settings::RecolorSettings;

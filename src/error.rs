//! Error type for the recoloring pipelines.
//!
//! Every failure is reported to the immediate caller as a returned error;
//! there is no retry and no partial result. The one intentional exception
//! is an individual color token that cannot be parsed, which is left
//! unchanged rather than failing the whole document (see
//! [`parse_color_token`](crate::parse_color_token)).

use crate::remap::color::ColorSelector;

/// Errors produced by [`recolor_raster`](crate::recolor_raster) and
/// [`recolor_svg`](crate::recolor_svg).
#[derive(Debug, thiserror::Error)]
pub enum RecolorError {
    /// The input's declared media type does not fit the chosen pipeline.
    #[error("unsupported input: expected {expected}, got {actual}")]
    InvalidInputKind {
        /// Media type (or family) the pipeline accepts.
        expected: &'static str,
        /// What the caller actually declared.
        actual: String,
    },

    /// The color selector is not supported by the chosen pipeline.
    #[error("color {0:?} is not supported by this operation")]
    InvalidParameter(ColorSelector),

    /// The payload exceeds the size ceiling.
    #[error("input is {size} bytes, exceeding the {limit} byte limit")]
    PayloadTooLarge { size: usize, limit: usize },

    /// The SVG markup failed to parse as XML.
    #[error("malformed SVG markup: {0}")]
    MalformedInput(#[from] roxmltree::Error),

    /// The underlying image codec reported an error while decoding
    /// or re-encoding. Propagated as-is, never retried.
    #[error("image codec error: {0}")]
    DecodeFailure(#[from] image::ImageError),
}

//! Input and output value types for the recoloring pipelines.
//!
//! An [`ImageSource`] is the caller-supplied payload plus its declared
//! media type; a [`RecoloredImage`] is the freshly encoded result. Both
//! are transient, function-scoped values: nothing is cached or shared
//! across calls, and the input is never mutated.

use crate::error::RecolorError;

/// Maximum accepted payload size in bytes (2 MB).
pub const MAX_PAYLOAD_BYTES: usize = 2 * 1024 * 1024;

/// The media type of SVG markup.
pub const SVG_MEDIA_TYPE: &str = "image/svg+xml";

/// An encoded image supplied by the caller.
///
/// The payload is opaque bytes; `media_type` is what the caller declares
/// it to be (e.g. `image/png`, `image/svg+xml`). Validation against the
/// declared type happens inside each pipeline, before any decode work.
///
/// # Example
///
/// ```
/// use tintshift::ImageSource;
///
/// let svg = ImageSource::from_svg_markup("<svg xmlns=\"http://www.w3.org/2000/svg\"/>");
/// assert!(svg.is_svg());
///
/// let png = ImageSource::new(vec![0x89, 0x50, 0x4e, 0x47], "image/png");
/// assert!(png.is_raster());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    data: Vec<u8>,
    media_type: String,
}

impl ImageSource {
    /// Creates a source from raw bytes and a declared media type.
    pub fn new(data: impl Into<Vec<u8>>, media_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            media_type: media_type.into(),
        }
    }

    /// Creates an SVG source from markup text.
    pub fn from_svg_markup(markup: impl Into<String>) -> Self {
        Self {
            data: markup.into().into_bytes(),
            media_type: SVG_MEDIA_TYPE.to_string(),
        }
    }

    /// The raw payload bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The declared media type.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Payload size in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if the declared type is exactly `image/svg+xml`.
    pub fn is_svg(&self) -> bool {
        self.media_type == SVG_MEDIA_TYPE
    }

    /// Returns `true` if the declared type is a raster image type
    /// (any `image/*` other than SVG).
    pub fn is_raster(&self) -> bool {
        self.media_type.starts_with("image/") && !self.is_svg()
    }

    /// Fails with [`RecolorError::PayloadTooLarge`] if the payload
    /// exceeds [`MAX_PAYLOAD_BYTES`].
    pub(crate) fn check_size(&self) -> Result<(), RecolorError> {
        if self.data.len() > MAX_PAYLOAD_BYTES {
            return Err(RecolorError::PayloadTooLarge {
                size: self.data.len(),
                limit: MAX_PAYLOAD_BYTES,
            });
        }
        Ok(())
    }

    /// Interprets the payload as UTF-8 text.
    ///
    /// Fails with [`RecolorError::InvalidInputKind`] if the bytes are
    /// not valid UTF-8.
    pub(crate) fn as_text(&self) -> Result<&str, RecolorError> {
        std::str::from_utf8(&self.data).map_err(|_| RecolorError::InvalidInputKind {
            expected: "UTF-8 text",
            actual: format!("binary payload declared as {}", self.media_type),
        })
    }
}

/// A freshly encoded recolored image.
///
/// Produced once per invocation and handed to the caller, which is
/// responsible for presenting or persisting it (displaying it, writing
/// it to disk, triggering a download). The library keeps no reference
/// to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoloredImage {
    data: Vec<u8>,
    media_type: &'static str,
}

impl RecoloredImage {
    pub(crate) fn new(data: Vec<u8>, media_type: &'static str) -> Self {
        Self { data, media_type }
    }

    /// The encoded image bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The media type of the encoded output
    /// (`image/jpeg` or `image/svg+xml`).
    pub fn media_type(&self) -> &'static str {
        self.media_type
    }

    /// Consumes the output, returning the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// The output as SVG markup, if this is an SVG result.
    pub fn as_svg_str(&self) -> Option<&str> {
        if self.media_type == SVG_MEDIA_TYPE {
            std::str::from_utf8(&self.data).ok()
        } else {
            None
        }
    }
}

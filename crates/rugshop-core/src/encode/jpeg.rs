//! JPEG encoding through the `image` crate's baseline encoder.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};

use super::{quality_to_percent, EncodeError};

/// Encode an opaque RGB surface at a normalized quality in (0, 1].
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` for an empty surface and
/// `EncodeError::EncodingFailed` when the encoder rejects the data.
pub fn encode_jpeg(surface: &RgbImage, quality: f32) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = surface.dimensions();
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality_to_percent(quality));

    encoder
        .write_image(surface.as_raw(), width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

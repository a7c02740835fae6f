//! Lossy encoders used by the compressor.
//!
//! Qualities are normalized floats in (0, 1], the same scale the storefront
//! settings use; each encoder maps them onto its own range.

mod format;
mod jpeg;
mod webp;

use thiserror::Error;

pub use format::OutputFormat;
pub use jpeg::encode_jpeg;
pub use webp::encode_webp;

/// Errors that can occur while encoding a surface.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Map a normalized quality onto the 1-100 scale used by JPEG.
pub fn quality_to_percent(quality: f32) -> u8 {
    if !quality.is_finite() {
        return 1;
    }
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}

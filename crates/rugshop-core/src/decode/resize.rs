//! Downscaling helpers.
//!
//! Sizing follows a single uniform scale factor so aspect ratio survives
//! integer rounding as closely as possible, and images are never enlarged.

use image::imageops::FilterType;

use super::{DecodeError, DecodedImage};

/// Compute the output size for a longest-side bound.
///
/// `s = min(1, max_dimension / max(width, height))`, each side rounded and
/// floored to one pixel. Zero-sized input yields `(0, 0)`.
pub fn fit_dimensions(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let longest = width.max(height) as f64;
    let scale = (max_dimension as f64 / longest).min(1.0);

    let new_width = (width as f64 * scale).round() as u32;
    let new_height = (height as f64 * scale).round() as u32;
    (new_width.max(1), new_height.max(1))
}

/// Resample an image to exact dimensions with Lanczos3.
///
/// Returns a clone when the size already matches.
pub fn resize_exact(
    image: &DecodedImage,
    width: u32,
    height: u32,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let view = image
        .as_rgba_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Pixel buffer does not match dimensions".into()))?;

    let resized = image::imageops::resize(&view, width, height, FilterType::Lanczos3);
    Ok(DecodedImage::from_rgba_image(resized))
}

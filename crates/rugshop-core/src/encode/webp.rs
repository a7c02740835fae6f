//! WebP encoding.
//!
//! Native builds encode lossy WebP through libwebp. libwebp is C and does not
//! build for `wasm32-unknown-unknown`, so the browser build falls back to the
//! pure-Rust lossless encoder in `image` and ignores `quality`.

use image::RgbaImage;

use super::EncodeError;

/// Encode an RGBA surface as WebP at a normalized quality in (0, 1].
pub fn encode_webp(surface: &RgbaImage, quality: f32) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = surface.dimensions();
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }
    encode_rgba(surface, quality)
}

#[cfg(not(target_arch = "wasm32"))]
fn encode_rgba(surface: &RgbaImage, quality: f32) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = surface.dimensions();
    let encoder = ::webp::Encoder::from_rgba(surface.as_raw(), width, height);
    let memory = encoder
        .encode_simple(false, (quality * 100.0).clamp(0.0, 100.0))
        .map_err(|e| EncodeError::EncodingFailed(format!("{:?}", e)))?;

    Ok(memory.to_vec())
}

#[cfg(target_arch = "wasm32")]
fn encode_rgba(surface: &RgbaImage, _quality: f32) -> Result<Vec<u8>, EncodeError> {
    use image::codecs::webp::WebPEncoder;
    use image::ExtendedColorType;

    let (width, height) = surface.dimensions();
    let mut out = Vec::new();
    WebPEncoder::new_lossless(&mut out)
        .encode(surface.as_raw(), width, height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_webp_riff_header() {
        let surface = RgbaImage::from_pixel(40, 30, image::Rgba([10, 200, 30, 128]));
        let bytes = encode_webp(&surface, 0.55).unwrap();

        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WEBP");
    }

    #[test]
    fn test_empty_surface_rejected() {
        let surface = RgbaImage::new(5, 0);
        assert!(matches!(
            encode_webp(&surface, 0.5),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }
}

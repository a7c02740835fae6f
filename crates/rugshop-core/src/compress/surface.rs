//! Scoped drawing surface for one compression call.
//!
//! A surface is sized once, drawn once and encoded as many times as the
//! quality search needs. It is dropped when the call returns.

use image::{imageops, DynamicImage, Rgba, RgbImage, RgbaImage};

use crate::decode::{resize_exact, DecodeError, DecodedImage};
use crate::encode::{encode_jpeg, encode_webp, EncodeError, OutputFormat};

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

#[derive(Debug, Clone)]
pub enum Surface {
    /// Flattened onto white, for formats without alpha.
    Opaque(RgbImage),
    /// Straight RGBA, for formats with alpha.
    Transparent(RgbaImage),
}

impl Surface {
    /// Draw `image` at `width` x `height` with Lanczos3 resampling.
    ///
    /// For JPEG the surface is pre-filled with opaque white, so transparent
    /// regions of the source do not turn black once alpha is discarded.
    pub fn prepare(
        image: &DecodedImage,
        width: u32,
        height: u32,
        format: OutputFormat,
    ) -> Result<Self, DecodeError> {
        let drawn = resize_exact(image, width, height)?;
        let drawn = RgbaImage::from_raw(drawn.width, drawn.height, drawn.pixels).ok_or_else(
            || DecodeError::CorruptedFile("Resampled buffer does not match dimensions".into()),
        )?;

        if format.supports_alpha() {
            return Ok(Surface::Transparent(drawn));
        }

        let mut canvas = RgbaImage::from_pixel(width, height, WHITE);
        imageops::overlay(&mut canvas, &drawn, 0, 0);
        Ok(Surface::Opaque(DynamicImage::ImageRgba8(canvas).into_rgb8()))
    }

    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Surface::Opaque(img) => img.dimensions(),
            Surface::Transparent(img) => img.dimensions(),
        }
    }

    /// Encode with the codec matching the surface kind.
    pub fn encode(&self, quality: f32) -> Result<Vec<u8>, EncodeError> {
        match self {
            Surface::Opaque(img) => encode_jpeg(img, quality),
            Surface::Transparent(img) => encode_webp(img, quality),
        }
    }
}

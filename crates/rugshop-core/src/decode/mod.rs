//! Image decoding for the upload pipeline.
//!
//! This module provides functionality for:
//! - Decoding JPEG, PNG, WebP, GIF and BMP uploads into an RGBA bitmap
//! - Applying EXIF orientation so phone photos come out upright
//! - Computing downscaled dimensions and resampling
//!
//! All operations are synchronous and allocate only the buffers they return.

mod reader;
mod resize;
mod types;

pub use reader::{decode_image, read_orientation};
pub use resize::{fit_dimensions, resize_exact};
pub use types::{DecodeError, DecodedImage, Orientation};

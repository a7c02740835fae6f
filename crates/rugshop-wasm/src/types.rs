//! JavaScript-facing wrapper for compressed files.

use rugshop_core::compress::{CompressedImage, CompressionOutcome};
use wasm_bindgen::prelude::*;

/// A compressed (or passed-through) file ready for upload.
///
/// Build a `File` on the JS side with
/// `new File([img.bytes()], img.name, { type: img.mime_type, lastModified: img.last_modified })`.
#[wasm_bindgen]
pub struct JsCompressedImage {
    name: String,
    mime_type: String,
    bytes: Vec<u8>,
    width: Option<u32>,
    height: Option<u32>,
    last_modified: Option<f64>,
    quality: Option<f32>,
    attempts: u32,
    within_budget: bool,
    pass_through: bool,
}

#[wasm_bindgen]
impl JsCompressedImage {
    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.name.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.mime_type.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }

    /// Output width; undefined for pass-through files.
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> Option<u32> {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> Option<u32> {
        self.height
    }

    /// Milliseconds since the epoch; undefined when the file was not re-encoded.
    #[wasm_bindgen(getter)]
    pub fn last_modified(&self) -> Option<f64> {
        self.last_modified
    }

    /// Quality of the returned encode, in (0, 1].
    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> Option<f32> {
        self.quality
    }

    #[wasm_bindgen(getter)]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// False when even the floor quality missed the byte budget.
    #[wasm_bindgen(getter)]
    pub fn within_budget(&self) -> bool {
        self.within_budget
    }

    #[wasm_bindgen(getter)]
    pub fn pass_through(&self) -> bool {
        self.pass_through
    }

    /// Encoded bytes as a `Uint8Array` (copied out of WASM memory).
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}

impl From<CompressedImage> for JsCompressedImage {
    fn from(image: CompressedImage) -> Self {
        let (quality, attempts, within_budget, pass_through) = match image.outcome {
            CompressionOutcome::Compressed {
                quality,
                attempts,
                within_budget,
            } => (Some(quality), attempts, within_budget, false),
            CompressionOutcome::PassThrough(_) => (None, 0, false, true),
        };

        Self {
            name: image.name,
            mime_type: image.mime_type,
            width: image.dimensions.map(|(w, _)| w),
            height: image.dimensions.map(|(_, h)| h),
            last_modified: image.last_modified.map(|t| t.timestamp_millis() as f64),
            bytes: image.bytes,
            quality,
            attempts,
            within_budget,
            pass_through,
        }
    }
}

//! Compression bindings used by the admin "new product" form.
//!
//! # Example
//!
//! ```typescript
//! import { compress_image } from '@rugshop/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const out = compress_image(bytes, file.type, file.name, { outputFormat: 'WEBP' });
//! const upload = new File([out.bytes()], out.name, { type: out.mime_type });
//! ```

use rugshop_core::compress::{self, CompressionSettings, SourceImage};
use wasm_bindgen::prelude::*;

use crate::types::JsCompressedImage;

/// Read settings from a partial `{ maxDimension, targetBytes, ... }` object.
/// `undefined` and `null` select the defaults.
pub(crate) fn settings_from_js(settings: JsValue) -> Result<CompressionSettings, JsValue> {
    if settings.is_undefined() || settings.is_null() {
        return Ok(CompressionSettings::default());
    }
    serde_wasm_bindgen::from_value(settings)
        .map_err(|e| JsValue::from_str(&format!("Invalid compression settings: {}", e)))
}

/// Compress one picked file.
///
/// Non-image files and files that fail to re-encode come back unchanged
/// (`pass_through` is true).
///
/// # Errors
///
/// Returns an error if the settings are invalid or the file claims to be an
/// image but cannot be decoded.
#[wasm_bindgen]
pub fn compress_image(
    bytes: Vec<u8>,
    mime_type: &str,
    name: &str,
    settings: JsValue,
) -> Result<JsCompressedImage, JsValue> {
    let settings = settings_from_js(settings)?;
    compress::compress(SourceImage::new(name, mime_type, bytes), &settings)
        .map(JsCompressedImage::from)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Collects picked files, then compresses them together.
///
/// ```typescript
/// const batch = new CompressionBatch();
/// for (const f of picked) batch.add(new Uint8Array(await f.arrayBuffer()), f.type, f.name);
/// const files = batch.run(undefined);
/// ```
#[wasm_bindgen]
#[derive(Default)]
pub struct CompressionBatch {
    sources: Vec<SourceImage>,
}

#[wasm_bindgen]
impl CompressionBatch {
    #[wasm_bindgen(constructor)]
    pub fn new() -> CompressionBatch {
        CompressionBatch::default()
    }

    pub fn add(&mut self, bytes: Vec<u8>, mime_type: &str, name: &str) {
        self.sources.push(SourceImage::new(name, mime_type, bytes));
    }

    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.sources.len()
    }

    /// Compress every queued file, in order. The queue is emptied.
    ///
    /// A file that fails is logged to the console and left out; the others
    /// are still returned.
    pub fn run(&mut self, settings: JsValue) -> Result<js_sys::Array, JsValue> {
        let settings = settings_from_js(settings)?;
        let sources = std::mem::take(&mut self.sources);
        let (compressed, failures) = compress::compress_batch(sources, &settings).into_parts();

        for failure in &failures {
            web_sys::console::warn_1(&JsValue::from_str(&format!(
                "Image processing failed for {}: {}",
                failure.source_name, failure.error
            )));
        }

        Ok(compressed
            .into_iter()
            .map(|image| JsValue::from(JsCompressedImage::from(image)))
            .collect())
    }
}

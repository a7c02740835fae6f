//! Rugshop WASM - WebAssembly bindings for the rug storefront
//!
//! This crate exposes rugshop-core to the storefront's browser code.
//!
//! # Module Structure
//!
//! - `compress` - Adaptive image compression before upload
//! - `catalog` - Listing filters, pagination and the admin table
//! - `admin` - Access checks, form validation and upload naming
//! - `types` - WASM-compatible wrapper for compressed files
//!
//! # Usage
//!
//! ```typescript
//! import init, { compress_image, filter_products } from '@rugshop/wasm';
//!
//! await init();
//!
//! const page = filter_products(products, { text: 'kilim' }, 1, 20);
//! console.log(`${page.totalMatches} rugs on ${page.totalPages} pages`);
//! ```

use wasm_bindgen::prelude::*;

mod admin;
mod catalog;
mod compress;
mod types;

pub use admin::{
    can_view_admin_route, generate_product_id, is_admin, sanitize_number, sanitize_product_id,
    storage_path_from_url, upload_path, validate_product_draft,
};
pub use catalog::{admin_products, filter_products, format_admin_price, size_options};
pub use compress::{compress_image, CompressionBatch};
pub use types::JsCompressedImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}

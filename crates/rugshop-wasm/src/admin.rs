//! Admin bindings: access checks, the new-product form and upload naming.

use rugshop_core::admin::{self, AuthorizationPolicy, GuardDecision, Identity, ProductDraft};
use rugshop_core::backend;
use rugshop_core::StorefrontConfig;
use wasm_bindgen::prelude::*;

fn identity(email: Option<String>) -> Option<Identity> {
    email.map(|email| Identity {
        uid: String::new(),
        email: Some(email),
    })
}

/// Read `{ adminEmail, maxImages, ... }`; `undefined` selects the defaults.
fn config_from_js(config: JsValue) -> Result<StorefrontConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(StorefrontConfig::default());
    }
    serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Invalid storefront config: {}", e)))
}

/// True when `email` is the configured admin account.
#[wasm_bindgen]
pub fn is_admin(admin_email: &str, email: Option<String>) -> bool {
    identity(email).is_some_and(|id| admin::SingleAdminPolicy::new(admin_email).is_authorized(&id))
}

/// True when the page at `path` may render; false means redirect to the
/// login page.
#[wasm_bindgen]
pub fn can_view_admin_route(path: &str, admin_email: &str, email: Option<String>) -> bool {
    let policy = admin::SingleAdminPolicy::new(admin_email);
    admin::guard_route(path, identity(email).as_ref(), &policy) == GuardDecision::Allow
}

/// Validate the form and return the record to store, without images.
///
/// # Errors
///
/// Returns the form's message ("Please enter a title." etc.) for the first
/// failing check.
#[wasm_bindgen]
pub fn validate_product_draft(
    draft: JsValue,
    email: Option<String>,
    image_count: usize,
    config: JsValue,
) -> Result<JsValue, JsValue> {
    let config = config_from_js(config)?;
    let draft: ProductDraft = serde_wasm_bindgen::from_value(draft)
        .map_err(|e| JsValue::from_str(&format!("Invalid product draft: {}", e)))?;

    let authorized = identity(email).is_some_and(|id| config.admin_policy().is_authorized(&id));
    let record = draft
        .validate(authorized, image_count, config.max_images)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde::Serialize::serialize(&record, &serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Fresh seven-digit product id.
#[wasm_bindgen]
pub fn generate_product_id() -> String {
    admin::product_id_from_random(js_sys::Math::random())
}

/// Digits only, at most seven.
#[wasm_bindgen]
pub fn sanitize_product_id(input: &str) -> String {
    admin::sanitize_product_id(input)
}

/// Digits and dots only, for width, length and price inputs.
#[wasm_bindgen]
pub fn sanitize_number(input: &str) -> String {
    admin::sanitize_number(input)
}

/// Storage path for a file about to be uploaded.
#[wasm_bindgen]
pub fn upload_path(file_name: &str) -> String {
    let nonce = (js_sys::Math::random() * u32::MAX as f64) as u64;
    backend::upload_object_path(file_name, js_sys::Date::now() as i64, nonce)
}

/// Object path inside a download URL, if it has one.
#[wasm_bindgen]
pub fn storage_path_from_url(url: &str) -> Option<String> {
    backend::storage_path_from_url(url)
}


/// WASM-specific tests; run with `wasm-pack test`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use serde::Serialize;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn js(value: serde_json::Value) -> JsValue {
        value
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .unwrap()
    }

    fn config() -> JsValue {
        js(serde_json::json!({ "adminEmail": "owner@example.com", "maxImages": 2 }))
    }

    fn draft() -> JsValue {
        js(serde_json::json!({
            "productId": "1234567",
            "title": "Kazak",
            "category": "Runner Rugs",
            "price": "300",
            "width": "3",
            "length": "10"
        }))
    }

    #[wasm_bindgen_test]
    fn test_validate_product_draft() {
        let record = validate_product_draft(draft(), Some("owner@example.com".into()), 1, config()).unwrap();
        let record: serde_json::Value = serde_wasm_bindgen::from_value(record).unwrap();
        assert_eq!(record["size"], "3 ft x 10 ft");
        assert_eq!(record["currency"], "USD");
    }

    #[wasm_bindgen_test]
    fn test_validate_product_draft_messages() {
        let err = validate_product_draft(draft(), Some("owner@example.com".into()), 3, config()).unwrap_err();
        assert_eq!(err.as_string().unwrap(), "Please select at least 1 image (max 2).");

        let err = validate_product_draft(draft(), None, 1, config()).unwrap_err();
        assert!(err.as_string().unwrap().starts_with("Admin only"));
    }

    #[wasm_bindgen_test]
    fn test_generated_values() {
        assert_eq!(generate_product_id().len(), 7);
        assert!(upload_path("rug.png").starts_with("products/"));
        assert!(upload_path("rug.png").ends_with(".png"));
    }
}

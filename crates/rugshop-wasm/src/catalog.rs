//! Catalogue bindings for the storefront listing and the admin table.
//!
//! Product lists cross the boundary as plain JS arrays of camelCase records,
//! exactly as they come out of the document store.

use rugshop_core::catalog::{self, CatalogQuery, Product};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageView<'a> {
    items: Vec<&'a Product>,
    total_pages: usize,
    total_matches: usize,
}

#[derive(Debug, Serialize)]
pub(crate) struct SizeOption {
    label: &'static str,
    value: &'static str,
}

pub(crate) fn page_view<'a>(
    products: &'a [Product],
    query: &CatalogQuery,
    page: usize,
    page_size: usize,
) -> PageView<'a> {
    let page = catalog::filter_and_paginate(products, query, page, page_size);
    PageView {
        items: page.items,
        total_pages: page.total_pages,
        total_matches: page.total_matches,
    }
}

pub(crate) fn size_option_list() -> Vec<SizeOption> {
    catalog::SIZE_OPTIONS
        .iter()
        .map(|&(label, value)| SizeOption { label, value })
        .collect()
}

fn products_from_js(products: JsValue) -> Result<Vec<Product>, JsValue> {
    serde_wasm_bindgen::from_value(products)
        .map_err(|e| JsValue::from_str(&format!("Invalid product list: {}", e)))
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Filter the listing and return one 1-based page as
/// `{ items, totalPages, totalMatches }`.
///
/// `query` is `{ text?, category?, sizeLabel? }`.
#[wasm_bindgen]
pub fn filter_products(
    products: JsValue,
    query: JsValue,
    page: usize,
    page_size: usize,
) -> Result<JsValue, JsValue> {
    let products = products_from_js(products)?;
    let query: CatalogQuery = if query.is_undefined() || query.is_null() {
        CatalogQuery::default()
    } else {
        serde_wasm_bindgen::from_value(query)
            .map_err(|e| JsValue::from_str(&format!("Invalid catalog query: {}", e)))?
    };
    to_js(&page_view(&products, &query, page, page_size))
}

/// Sidebar size entries as `[{ label, value }]`.
#[wasm_bindgen]
pub fn size_options() -> Result<JsValue, JsValue> {
    to_js(&size_option_list())
}

/// Admin table rows matching `query`, newest first.
#[wasm_bindgen]
pub fn admin_products(products: JsValue, query: &str) -> Result<JsValue, JsValue> {
    let mut products = products_from_js(products)?;
    catalog::sort_newest_first(&mut products);
    to_js(&catalog::admin_search(&products, query))
}

/// Price cell for the admin table.
#[wasm_bindgen]
pub fn format_admin_price(price: f64, currency: &str) -> String {
    catalog::format_admin_price(price, currency)
}

//! In-memory filtering and pagination of the storefront listing.
//!
//! Filters are ANDed: case-insensitive title substring, exact category and
//! exact canonical size. Pages are 1-based and never clamped.

use serde::{Deserialize, Serialize};

use super::Product;

/// Category value that disables the category filter.
pub const CATEGORY_ALL: &str = "ALL";
pub const CATEGORY_LARGE: &str = "Large Size Rugs";
pub const CATEGORY_RUNNER: &str = "Runner Rugs";
pub const CATEGORY_WALL: &str = "Wall Hanging Rug";

pub const PRODUCTS_PER_PAGE: usize = 20;

/// Sidebar size labels and the canonical strings stored on products.
pub const SIZE_OPTIONS: [(&str, &str); 11] = [
    ("9 × 12 ft · 275 × 365 cm", "9 ft x 12 ft"),
    ("8 × 10 ft · 250 × 300 cm", "8 ft x 10 ft"),
    ("7 × 10 ft · 200 × 300 cm", "7 ft x 10 ft"),
    ("6 × 9 ft · 180 × 270 cm", "6 ft x 9 ft"),
    ("6 × 8 ft · 170 × 240 cm", "6 ft x 8 ft"),
    ("5 × 7 ft · 150 × 200 cm", "5 ft x 7 ft"),
    ("5 × 6 ft · 150 × 180 cm", "5 ft x 6 ft"),
    ("4 × 6 ft · 120 × 180 cm", "4 ft x 6 ft"),
    ("3 × 5 ft · 100 × 150 cm", "3 ft x 5 ft"),
    ("3 × 4 ft · 80 × 120 cm", "3 ft x 4 ft"),
    ("2 × 3 ft · 60 × 90 cm", "2 ft x 3 ft"),
];

/// Canonical stored size for a sidebar label.
pub fn stored_size_for_label(label: &str) -> Option<&'static str> {
    SIZE_OPTIONS
        .iter()
        .find(|(l, _)| *l == label)
        .map(|(_, stored)| *stored)
}

/// The three listing criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogQuery {
    pub text: String,
    /// `None` or `"ALL"` disables the filter.
    pub category: Option<String>,
    /// A label from [`SIZE_OPTIONS`]; unknown labels match nothing.
    pub size_label: Option<String>,
}

impl CatalogQuery {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        let needle = self.text.to_lowercase();
        if !product.title.to_lowercase().contains(&needle) {
            return false;
        }

        if let Some(category) = self.category.as_deref() {
            if category != CATEGORY_ALL && product.category.trim() != category.trim() {
                return false;
            }
        }

        if let Some(label) = self.size_label.as_deref().filter(|l| !l.is_empty()) {
            match stored_size_for_label(label) {
                Some(expected) if product.size.trim() == expected => {}
                _ => return false,
            }
        }

        true
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    pub items: Vec<&'a Product>,
    /// `ceil(matches / page_size)`; zero when nothing matches.
    pub total_pages: usize,
    pub total_matches: usize,
}

/// Filter `items` and slice out 1-based `page`.
///
/// Page 0 or a page past the end yields an empty slice; callers are expected
/// to stay within `total_pages`.
pub fn filter_and_paginate<'a>(
    items: &'a [Product],
    query: &CatalogQuery,
    page: usize,
    page_size: usize,
) -> Page<'a> {
    let matches: Vec<&Product> = items.iter().filter(|p| query.matches(p)).collect();
    let total_matches = matches.len();
    let page_size = page_size.max(1);
    let total_pages = total_matches.div_ceil(page_size);

    let items = match page.checked_sub(1) {
        Some(index) => matches
            .into_iter()
            .skip(index.saturating_mul(page_size))
            .take(page_size)
            .collect(),
        None => Vec::new(),
    };

    Page {
        items,
        total_pages,
        total_matches,
    }
}

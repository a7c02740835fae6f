//! Listing state behind the storefront sidebar and search box.
//!
//! Every criterion change sends the shopper back to page 1.

use super::filter::{
    filter_and_paginate, CatalogQuery, Page, CATEGORY_ALL, CATEGORY_LARGE, PRODUCTS_PER_PAGE,
};
use super::Product;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogView {
    query: String,
    category: String,
    size_label: Option<String>,
    page: usize,
    page_size: usize,
}

impl Default for CatalogView {
    fn default() -> Self {
        Self::new(PRODUCTS_PER_PAGE)
    }
}

impl CatalogView {
    pub fn new(page_size: usize) -> Self {
        Self {
            query: String::new(),
            category: CATEGORY_ALL.to_string(),
            size_label: None,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn size_label(&self) -> Option<&str> {
        self.size_label.as_deref()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query != self.query {
            self.query = query;
            self.page = 1;
        }
    }

    /// Pick a category entry; clears any size label.
    pub fn select_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
        self.size_label = None;
        self.page = 1;
    }

    /// "All" entry: no category, no size.
    pub fn select_all(&mut self) {
        self.select_category(CATEGORY_ALL);
    }

    /// Pick a size label; picking the active one again clears it. The
    /// category always goes back to ALL.
    pub fn toggle_size_label(&mut self, label: &str) {
        if self.size_label.as_deref() == Some(label) {
            self.size_label = None;
        } else {
            self.size_label = Some(label.to_string());
        }
        self.category = CATEGORY_ALL.to_string();
        self.page = 1;
    }

    /// Move to another page. Not clamped; see [`filter_and_paginate`].
    pub fn go_to_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn to_query(&self) -> CatalogQuery {
        CatalogQuery {
            text: self.query.clone(),
            category: Some(self.category.clone()),
            size_label: self.size_label.clone(),
        }
    }

    pub fn current_page<'a>(&self, items: &'a [Product]) -> Page<'a> {
        filter_and_paginate(items, &self.to_query(), self.page, self.page_size)
    }

    pub fn is_all_active(&self) -> bool {
        self.category == CATEGORY_ALL && self.size_label.is_none()
    }

    /// Highlight state for a category entry. "Large Size Rugs" dims while a
    /// size label is chosen.
    pub fn is_category_active(&self, category: &str) -> bool {
        if category == CATEGORY_LARGE {
            return self.category == CATEGORY_LARGE && self.size_label.is_none();
        }
        self.category == category
    }

    pub fn is_size_active(&self, label: &str) -> bool {
        self.size_label.as_deref() == Some(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::filter::{CATEGORY_RUNNER, SIZE_OPTIONS};

    fn rugs() -> Vec<Product> {
        (0..30)
            .map(|i| Product {
                id: i.to_string(),
                title: format!("Rug {}", i),
                category: if i < 5 { CATEGORY_RUNNER.into() } else { CATEGORY_LARGE.into() },
                size: if i % 2 == 0 { "5 ft x 7 ft".into() } else { "9 ft x 12 ft".into() },
                ..Product::default()
            })
            .collect()
    }

    #[test]
    fn test_starts_on_all() {
        let view = CatalogView::default();
        assert_eq!(view.page(), 1);
        assert!(view.is_all_active());
        assert_eq!(view.current_page(&rugs()).total_pages, 2);
    }

    #[test]
    fn test_criteria_changes_reset_page() {
        let items = rugs();
        let mut view = CatalogView::default();

        view.go_to_page(2);
        view.set_query("rug");
        assert_eq!(view.page(), 1);

        view.go_to_page(2);
        view.select_category(CATEGORY_RUNNER);
        assert_eq!(view.page(), 1);
        assert_eq!(view.current_page(&items).items.len(), 5);

        view.go_to_page(2);
        view.toggle_size_label(SIZE_OPTIONS[5].0);
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn test_same_query_keeps_page() {
        let mut view = CatalogView::default();
        view.set_query("rug");
        view.go_to_page(2);
        view.set_query("rug");
        assert_eq!(view.page(), 2);
    }

    #[test]
    fn test_size_label_resets_category_and_toggles() {
        let items = rugs();
        let mut view = CatalogView::default();
        view.select_category(CATEGORY_RUNNER);

        let label = SIZE_OPTIONS[5].0;
        view.toggle_size_label(label);
        assert_eq!(view.category(), CATEGORY_ALL);
        assert!(view.is_size_active(label));
        assert_eq!(view.current_page(&items).total_matches, 15);

        view.toggle_size_label(label);
        assert_eq!(view.size_label(), None);
        assert!(view.is_all_active());
    }

    #[test]
    fn test_category_clears_size_label() {
        let mut view = CatalogView::default();
        view.toggle_size_label(SIZE_OPTIONS[0].0);
        view.select_category(CATEGORY_LARGE);
        assert_eq!(view.size_label(), None);
        assert!(view.is_category_active(CATEGORY_LARGE));
    }

    #[test]
    fn test_active_states() {
        let mut view = CatalogView::default();
        view.select_category(CATEGORY_RUNNER);
        assert!(view.is_category_active(CATEGORY_RUNNER));
        assert!(!view.is_all_active());

        view.select_all();
        assert!(view.is_all_active());
        assert!(!view.is_category_active(CATEGORY_LARGE));
    }
}

//! Storefront catalog: product records, listing filters, pagination, the
//! admin table and the detail gallery.
//!
//! Everything here works on lists already loaded in full from the document
//! store; nothing queries the backend.

pub mod filter;
mod gallery;
mod listing;
mod product;
mod view;

pub use filter::{
    filter_and_paginate, stored_size_for_label, CatalogQuery, Page, CATEGORY_ALL, CATEGORY_LARGE,
    CATEGORY_RUNNER, CATEGORY_WALL, PRODUCTS_PER_PAGE, SIZE_OPTIONS,
};
pub use gallery::{Gallery, SWIPE_THRESHOLD};
pub use listing::{admin_search, sort_newest_first};
pub use product::{format_admin_price, Dimensions, Product, Unit, DEFAULT_CURRENCY, UNTITLED_PRODUCT};
pub use view::CatalogView;

//! Product records as stored in the document store.

use serde::{Deserialize, Serialize};

pub const DEFAULT_CURRENCY: &str = "USD";
pub const UNTITLED_PRODUCT: &str = "Untitled Product";

/// Length units offered by the admin form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Ft,
    In,
    Cm,
    M,
}

impl Unit {
    pub const ALL: [Unit; 4] = [Unit::Ft, Unit::In, Unit::Cm, Unit::M];

    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Ft => "ft",
            Unit::In => "in",
            Unit::Cm => "cm",
            Unit::M => "m",
        }
    }
}

/// Structured size alongside the flat `size` string.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub width: Option<f64>,
    pub width_unit: Unit,
    pub length: Option<f64>,
    pub length_unit: Unit,
}

/// A rug listing. Missing fields take the same defaults the storefront
/// listing page applies when reading documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Product {
    /// Document id assigned by the store.
    pub id: String,
    /// Seven-digit catalogue number shown to staff.
    pub product_id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub currency: String,
    /// Canonical size string, e.g. `"5 ft x 7 ft"`.
    pub size: String,
    pub images: Vec<String>,
    pub cover_url: String,
    pub is_active: bool,
    pub made_year: Option<u16>,
    /// Creation time in epoch seconds.
    pub created_at: Option<i64>,
    pub dimensions: Option<Dimensions>,
}

impl Default for Product {
    fn default() -> Self {
        Self {
            id: String::new(),
            product_id: String::new(),
            title: String::new(),
            description: String::new(),
            category: String::new(),
            price: 0.0,
            currency: DEFAULT_CURRENCY.to_string(),
            size: String::new(),
            images: Vec::new(),
            cover_url: String::new(),
            is_active: true,
            made_year: None,
            created_at: None,
            dimensions: None,
        }
    }
}

impl Product {
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            UNTITLED_PRODUCT
        } else {
            &self.title
        }
    }

    /// Images for the detail gallery: `images`, else the cover, else nothing.
    pub fn gallery_images(&self) -> Vec<String> {
        if !self.images.is_empty() {
            self.images.clone()
        } else if !self.cover_url.is_empty() {
            vec![self.cover_url.clone()]
        } else {
            Vec::new()
        }
    }

    /// Thumbnail for admin rows: the cover, else the first image.
    pub fn thumbnail(&self) -> Option<&str> {
        if !self.cover_url.is_empty() {
            Some(&self.cover_url)
        } else {
            self.images.first().map(String::as_str)
        }
    }

    /// Price line on the detail page, e.g. `"USD 399.00"`.
    pub fn detail_price(&self) -> String {
        let currency = if self.currency.is_empty() {
            DEFAULT_CURRENCY
        } else {
            &self.currency
        };
        format!("{} {:.2}", currency, self.price)
    }

    /// Price cell in the admin table.
    pub fn admin_price(&self) -> String {
        format_admin_price(self.price, &self.currency)
    }
}

/// `"—"` for missing prices, `"$x.xx"` for USD, `"x.xx CUR"` otherwise.
pub fn format_admin_price(price: f64, currency: &str) -> String {
    if price.is_nan() || price <= 0.0 {
        return "—".to_string();
    }
    let currency = if currency.is_empty() {
        DEFAULT_CURRENCY
    } else {
        currency
    };
    if currency.eq_ignore_ascii_case(DEFAULT_CURRENCY) {
        format!("${:.2}", price)
    } else {
        format!("{:.2} {}", price, currency)
    }
}

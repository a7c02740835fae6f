//! The "new product" form: raw inputs, sanitizers and validation into a
//! record ready to be stored.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{Dimensions, Product, Unit, DEFAULT_CURRENCY};

/// Years offered for "made in".
pub const YEAR_OPTIONS: RangeInclusive<u16> = 2016..=2026;
pub const DEFAULT_MADE_YEAR: u16 = 2024;
pub const PRODUCT_ID_DIGITS: usize = 7;

/// Validation failures, in the order the form checks them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Admin only. Please sign in with the admin account.")]
    NotAuthorized,
    #[error("Please enter Product ID.")]
    MissingProductId,
    #[error("Please enter a title.")]
    MissingTitle,
    #[error("Enter a valid price.")]
    InvalidPrice,
    #[error("Please enter a category.")]
    MissingCategory,
    #[error("Please select at least 1 image (max {max}).")]
    ImageCount { count: usize, max: usize },
}

/// Form inputs as typed by the admin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductDraft {
    pub product_id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: String,
    pub made_year: u16,
    pub width: String,
    pub width_unit: Unit,
    pub length: String,
    pub length_unit: Unit,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            product_id: String::new(),
            title: String::new(),
            description: String::new(),
            category: String::new(),
            price: String::new(),
            made_year: DEFAULT_MADE_YEAR,
            width: String::new(),
            width_unit: Unit::Ft,
            length: String::new(),
            length_unit: Unit::Ft,
        }
    }
}

/// A validated product without its image URLs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub product_id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub currency: String,
    pub size: String,
    pub made_year: u16,
    pub dimensions: Dimensions,
}

impl ProductDraft {
    /// Fresh form with a generated product id.
    pub fn with_random_id(random: f64) -> Self {
        Self {
            product_id: product_id_from_random(random),
            ..Self::default()
        }
    }

    /// Flat size string, e.g. `"5 ft x 7 ft"`. Empty unless both sides are
    /// filled in.
    pub fn size_string(&self) -> String {
        let width = sanitize_number(&self.width);
        let length = sanitize_number(&self.length);
        if width.is_empty() || length.is_empty() {
            return String::new();
        }
        format!(
            "{} {} x {} {}",
            width,
            self.width_unit.as_str(),
            length,
            self.length_unit.as_str()
        )
    }

    /// Check the form and build the record to store.
    ///
    /// `image_count` is the number of files currently selected.
    pub fn validate(
        &self,
        authorized: bool,
        image_count: usize,
        max_images: usize,
    ) -> Result<NewProduct, DraftError> {
        if !authorized {
            return Err(DraftError::NotAuthorized);
        }
        let product_id = self.product_id.trim();
        if product_id.is_empty() {
            return Err(DraftError::MissingProductId);
        }
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DraftError::MissingTitle);
        }
        let price = parse_positive(&self.price).ok_or(DraftError::InvalidPrice)?;
        let category = self.category.trim();
        if category.is_empty() {
            return Err(DraftError::MissingCategory);
        }
        if image_count == 0 || image_count > max_images {
            return Err(DraftError::ImageCount {
                count: image_count,
                max: max_images,
            });
        }

        Ok(NewProduct {
            product_id: product_id.to_string(),
            title: title.to_string(),
            description: self.description.trim().to_string(),
            category: category.to_string(),
            price,
            currency: DEFAULT_CURRENCY.to_string(),
            size: self.size_string(),
            made_year: self.made_year,
            dimensions: Dimensions {
                width: sanitize_number(&self.width).parse().ok(),
                width_unit: self.width_unit,
                length: sanitize_number(&self.length).parse().ok(),
                length_unit: self.length_unit,
            },
        })
    }
}

impl NewProduct {
    /// Attach uploaded image URLs; the first one becomes the cover.
    pub fn into_product(self, id: impl Into<String>, images: Vec<String>, created_at: i64) -> Product {
        Product {
            id: id.into(),
            product_id: self.product_id,
            title: self.title,
            description: self.description,
            category: self.category,
            price: self.price,
            currency: self.currency,
            size: self.size,
            cover_url: images.first().cloned().unwrap_or_default(),
            images,
            is_active: true,
            made_year: Some(self.made_year),
            created_at: Some(created_at),
            dimensions: Some(self.dimensions),
        }
    }
}

/// Keep only digits and dots, as the width, length and price inputs do.
pub fn sanitize_number(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect()
}

/// Keep only digits, at most seven of them.
pub fn sanitize_product_id(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_digit)
        .take(PRODUCT_ID_DIGITS)
        .collect()
}

/// Seven-digit id from a random fraction in `[0, 1)`.
pub fn product_id_from_random(random: f64) -> String {
    let fraction = if random.is_finite() { random.clamp(0.0, 1.0) } else { 0.0 };
    let id = (1_000_000.0 + fraction * 9_000_000.0).floor().min(9_999_999.0) as u32;
    id.to_string()
}

fn parse_positive(input: &str) -> Option<f64> {
    sanitize_number(input)
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ProductDraft {
        ProductDraft {
            product_id: " 1234567 ".into(),
            title: " Antique Heriz ".into(),
            description: "Hand-knotted ".into(),
            category: "Large Size Rugs".into(),
            price: "1250.50".into(),
            width: "9".into(),
            length: "12".into(),
            ..ProductDraft::default()
        }
    }

    #[test]
    fn test_validate_builds_record() {
        let product = filled().validate(true, 3, 7).unwrap();
        assert_eq!(product.product_id, "1234567");
        assert_eq!(product.title, "Antique Heriz");
        assert_eq!(product.description, "Hand-knotted");
        assert_eq!(product.price, 1250.5);
        assert_eq!(product.currency, "USD");
        assert_eq!(product.size, "9 ft x 12 ft");
        assert_eq!(product.made_year, DEFAULT_MADE_YEAR);
        assert_eq!(product.dimensions.width, Some(9.0));
        assert_eq!(product.dimensions.length, Some(12.0));
    }

    #[test]
    fn test_validation_order() {
        let empty = ProductDraft::default();
        assert_eq!(empty.validate(false, 0, 7), Err(DraftError::NotAuthorized));
        assert_eq!(empty.validate(true, 0, 7), Err(DraftError::MissingProductId));

        let mut draft = filled();
        draft.title = "   ".into();
        assert_eq!(draft.validate(true, 0, 7), Err(DraftError::MissingTitle));

        let mut draft = filled();
        draft.price = "0".into();
        assert_eq!(draft.validate(true, 1, 7), Err(DraftError::InvalidPrice));
        draft.price = String::new();
        assert_eq!(draft.validate(true, 1, 7), Err(DraftError::InvalidPrice));
        draft.price = "1.2.3".into();
        assert_eq!(draft.validate(true, 1, 7), Err(DraftError::InvalidPrice));

        let mut draft = filled();
        draft.category = String::new();
        assert_eq!(draft.validate(true, 1, 7), Err(DraftError::MissingCategory));

        assert_eq!(
            filled().validate(true, 0, 7),
            Err(DraftError::ImageCount { count: 0, max: 7 })
        );
        assert!(filled().validate(true, 8, 7).is_err());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(DraftError::MissingTitle.to_string(), "Please enter a title.");
        assert_eq!(
            DraftError::ImageCount { count: 0, max: 7 }.to_string(),
            "Please select at least 1 image (max 7)."
        );
    }

    #[test]
    fn test_size_string_needs_both_sides() {
        let mut draft = ProductDraft {
            width: "200".into(),
            width_unit: Unit::Cm,
            ..ProductDraft::default()
        };
        assert_eq!(draft.size_string(), "");

        draft.length = "300".into();
        draft.length_unit = Unit::Cm;
        assert_eq!(draft.size_string(), "200 cm x 300 cm");

        draft.length_unit = Unit::M;
        assert_eq!(draft.size_string(), "200 cm x 300 m");
    }

    #[test]
    fn test_sanitizers() {
        assert_eq!(sanitize_number("12,5 ft"), "125");
        assert_eq!(sanitize_number("$4.50"), "4.50");
        assert_eq!(sanitize_product_id("12-34 5678 9"), "1234567");
    }

    #[test]
    fn test_product_id_from_random() {
        assert_eq!(product_id_from_random(0.0), "1000000");
        assert_eq!(product_id_from_random(0.5), "5500000");
        assert_eq!(product_id_from_random(0.999_999_99), "9999999");
        assert_eq!(product_id_from_random(1.0), "9999999");
        assert_eq!(product_id_from_random(f64::NAN), "1000000");
        assert_eq!(ProductDraft::with_random_id(0.25).product_id, "3250000");
    }

    #[test]
    fn test_year_options() {
        assert_eq!(YEAR_OPTIONS.clone().count(), 11);
        assert!(YEAR_OPTIONS.contains(&DEFAULT_MADE_YEAR));
    }

    #[test]
    fn test_into_product_sets_cover() {
        let product = filled()
            .validate(true, 2, 7)
            .unwrap()
            .into_product("doc1", vec!["a.jpg".into(), "b.jpg".into()], 1_700_000_000);
        assert_eq!(product.cover_url, "a.jpg");
        assert_eq!(product.images.len(), 2);
        assert!(product.is_active);
        assert_eq!(product.created_at, Some(1_700_000_000));
    }
}

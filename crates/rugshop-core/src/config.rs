//! Deployment configuration for the storefront.

use serde::{Deserialize, Serialize};

use crate::admin::SingleAdminPolicy;
use crate::catalog::{DEFAULT_CURRENCY, PRODUCTS_PER_PAGE};
use crate::compress::CompressionSettings;

/// Most images a single product may carry.
pub const DEFAULT_MAX_IMAGES: usize = 7;

/// Storefront settings, read from camelCase JSON with every key optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StorefrontConfig {
    /// The one account allowed into `/admin`. Empty disables admin access.
    pub admin_email: String,
    pub products_per_page: usize,
    pub max_images: usize,
    pub currency: String,
    pub compression: CompressionSettings,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            admin_email: String::new(),
            products_per_page: PRODUCTS_PER_PAGE,
            max_images: DEFAULT_MAX_IMAGES,
            currency: DEFAULT_CURRENCY.to_string(),
            compression: CompressionSettings::default(),
        }
    }
}

impl StorefrontConfig {
    pub fn admin_policy(&self) -> SingleAdminPolicy {
        SingleAdminPolicy::new(self.admin_email.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::{AuthorizationPolicy, Identity};
    use crate::encode::OutputFormat;

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.products_per_page, 20);
        assert_eq!(config.max_images, 7);
        assert_eq!(config.currency, "USD");
        assert_eq!(config.compression, CompressionSettings::default());
    }

    #[test]
    fn test_partial_json() {
        let config: StorefrontConfig = serde_json::from_str(
            r#"{ "adminEmail": "owner@example.com", "compression": { "outputFormat": "WEBP", "targetBytes": 50000 } }"#,
        )
        .unwrap();
        assert_eq!(config.max_images, 7);
        assert_eq!(config.compression.output_format, OutputFormat::Webp);
        assert_eq!(config.compression.target_bytes, 50_000);
        assert_eq!(config.compression.max_dimension, 1200);

        let admin = Identity::with_email("u1", "OWNER@example.com");
        assert!(config.admin_policy().is_authorized(&admin));
    }

    #[test]
    fn test_default_policy_rejects_everyone() {
        let admin = Identity::with_email("u1", "owner@example.com");
        assert!(!StorefrontConfig::default().admin_policy().is_authorized(&admin));
    }
}

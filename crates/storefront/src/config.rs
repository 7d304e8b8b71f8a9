//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `STOREFRONT_CURRENCY` - Cart currency code (default: USD)
//! - `STOREFRONT_PAGE_SIZE` - Products per listing page (default: 12)
//! - `STOREFRONT_RELATED_LIMIT` - Related products shown on a product page (default: 4)
//! - `STOREFRONT_LOW_STOCK_THRESHOLD` - Stock level at or below which inventory is flagged (default: 10)
//! - `STOREFRONT_CATALOG_PATH` - JSON or YAML catalog file (default: built-in catalog)

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use neon_core::CurrencyCode;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Currency every cart is priced in
    pub currency: CurrencyCode,
    /// Default products per listing page
    pub page_size: u32,
    /// Related products shown alongside a product
    pub related_limit: usize,
    /// Inventory at or below this level counts as low stock
    pub low_stock_threshold: u32,
    /// Catalog file to load instead of the built-in data
    pub catalog_path: Option<PathBuf>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            currency: CurrencyCode::USD,
            page_size: 12,
            related_limit: 4,
            low_stock_threshold: 10,
            catalog_path: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` for unparseable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let page_size = parse_or("STOREFRONT_PAGE_SIZE", &lookup, defaults.page_size)?;
        if page_size == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "STOREFRONT_PAGE_SIZE".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            currency: parse_or("STOREFRONT_CURRENCY", &lookup, defaults.currency)?,
            page_size,
            related_limit: parse_or("STOREFRONT_RELATED_LIMIT", &lookup, defaults.related_limit)?,
            low_stock_threshold: parse_or(
                "STOREFRONT_LOW_STOCK_THRESHOLD",
                &lookup,
                defaults.low_stock_threshold,
            )?,
            catalog_path: lookup("STOREFRONT_CATALOG_PATH")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable, falling back to `default` when unset.
fn parse_or<T>(
    key: &str,
    lookup: &impl Fn(&str) -> Option<String>,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}

//! Command implementations.
//!
//! Commands print their reports to stdout; logs go to stderr.

#![allow(clippy::print_stdout)]

pub mod admin;
pub mod cart;
pub mod catalog;

use std::path::PathBuf;

use neon_storefront::catalog::InMemoryCatalog;
use neon_storefront::config::StorefrontConfig;

/// Configuration and catalog shared by every command.
pub struct Context {
    pub config: StorefrontConfig,
    pub catalog: InMemoryCatalog,
}

impl Context {
    /// Load configuration from the environment and open the catalog.
    ///
    /// `catalog_path` takes precedence over `STOREFRONT_CATALOG_PATH`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the catalog file
    /// cannot be loaded.
    pub async fn load(catalog_path: Option<PathBuf>) -> neon_storefront::Result<Self> {
        let mut config = StorefrontConfig::from_env()?;
        if catalog_path.is_some() {
            config.catalog_path = catalog_path;
        }

        let catalog = InMemoryCatalog::from_config(&config).await?;
        tracing::debug!(
            products = catalog.data().products.len(),
            "Catalog ready"
        );

        Ok(Self { config, catalog })
    }
}

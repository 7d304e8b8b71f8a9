//! Product catalog.
//!
//! The storefront reads products, categories and collections through the
//! [`CatalogProvider`] trait. [`InMemoryCatalog`] serves a static data set,
//! either the built-in fixture or a JSON/YAML file. Nothing here reaches the
//! cart directly: callers turn a [`Product`] into a cart line through the
//! session.

mod memory;
mod query;
mod types;

use std::future::Future;

use thiserror::Error;

use neon_core::ProductId;

pub use memory::InMemoryCatalog;
pub use query::{ProductPage, ProductQuery, ProductSort, run_query, sort_products};
pub use types::{
    CatalogData, Category, Collection, FeaturedCollection, FeaturedCollectionProducts, Product,
};

/// Collection slug used for best sellers.
pub const BEST_SELLERS_COLLECTION: &str = "best-sellers";

/// Errors that can occur when loading or querying a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// JSON catalog data is malformed.
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML catalog data is malformed.
    #[error("invalid catalog YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The file extension is neither JSON nor YAML.
    #[error("unsupported catalog format: {0}")]
    UnsupportedFormat(String),

    /// The same product ID appears more than once.
    #[error("duplicate product id in catalog: {0}")]
    DuplicateProduct(ProductId),
}

/// Read-only access to catalog data.
///
/// Implementations may be backed by memory or by a remote service, so every
/// operation is async and fallible. None of them mutate the catalog.
pub trait CatalogProvider: Send + Sync {
    /// Filter, sort and paginate products.
    fn filtered_products(
        &self,
        query: &ProductQuery,
    ) -> impl Future<Output = Result<ProductPage, CatalogError>> + Send;

    /// Look up a single product.
    fn product(
        &self,
        id: &ProductId,
    ) -> impl Future<Output = Result<Option<Product>, CatalogError>> + Send;

    /// Other products in the same category or sharing a tag, in random order.
    ///
    /// An unknown product yields an empty list.
    fn related_products(
        &self,
        id: &ProductId,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;

    fn categories(&self) -> impl Future<Output = Result<Vec<Category>, CatalogError>> + Send;

    fn collections(&self) -> impl Future<Output = Result<Vec<Collection>, CatalogError>> + Send;

    /// Homepage collections with their products resolved.
    ///
    /// Product IDs that do not resolve are dropped.
    fn featured_collections(
        &self,
    ) -> impl Future<Output = Result<Vec<FeaturedCollectionProducts>, CatalogError>> + Send;

    /// Products flagged as new, in random order.
    fn new_arrivals(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;

    /// Products in the best-sellers collection, highest rated first.
    fn best_sellers(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;

    /// Products flagged as featured, in random order.
    fn featured_products(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;
}

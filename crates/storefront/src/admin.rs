//! Back-office views over the catalog.
//!
//! Everything here is gated by [`require_admin`]; shoppers never reach it.

use serde::Serialize;
use tracing::instrument;

use neon_core::{Actor, Price, ProductId};

pub use crate::auth::require_admin;
use crate::catalog::{CatalogProvider, Product, ProductQuery};
use crate::error::Result;

/// Stock level classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    /// At or below the low-stock threshold.
    LowStock,
    OutOfStock,
}

impl StockStatus {
    /// Classify a stock level against `low_stock_threshold`.
    #[must_use]
    pub const fn classify(stock: u32, low_stock_threshold: u32) -> Self {
        if stock == 0 {
            Self::OutOfStock
        } else if stock <= low_stock_threshold {
            Self::LowStock
        } else {
            Self::InStock
        }
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InStock => write!(f, "in stock"),
            Self::LowStock => write!(f, "low stock"),
            Self::OutOfStock => write!(f, "out of stock"),
        }
    }
}

/// One row of the inventory table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryRow {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: Price,
    pub stock: u32,
    pub status: StockStatus,
}

impl InventoryRow {
    fn from_product(product: &Product, low_stock_threshold: u32) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price,
            stock: product.stock,
            status: StockStatus::classify(product.stock, low_stock_threshold),
        }
    }
}

/// Dashboard summary figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub product_count: usize,
    /// Units across all products.
    pub total_stock: u64,
    pub low_stock_count: usize,
    pub out_of_stock_count: usize,
    pub category_count: usize,
}

/// Every product in catalog order.
async fn all_products(catalog: &impl CatalogProvider) -> Result<Vec<Product>> {
    let query = ProductQuery {
        limit: Some(u32::MAX),
        ..Default::default()
    };
    Ok(catalog.filtered_products(&query).await?.products)
}

/// List inventory rows, optionally filtered by a case-insensitive name search.
///
/// # Errors
///
/// Returns `AppError::Auth` if the actor is not an admin, or
/// `AppError::Catalog` if the catalog cannot be read.
#[instrument(skip(actor, catalog))]
pub async fn inventory(
    actor: &Actor,
    catalog: &impl CatalogProvider,
    search: Option<&str>,
    low_stock_threshold: u32,
) -> Result<Vec<InventoryRow>> {
    require_admin(actor)?;

    let needle = search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let rows = all_products(catalog)
        .await?
        .iter()
        .filter(|p| {
            needle
                .as_ref()
                .is_none_or(|needle| p.name.to_lowercase().contains(needle))
        })
        .map(|p| InventoryRow::from_product(p, low_stock_threshold))
        .collect();

    Ok(rows)
}

/// Summarise the catalog for the dashboard.
///
/// # Errors
///
/// Returns `AppError::Auth` if the actor is not an admin, or
/// `AppError::Catalog` if the catalog cannot be read.
#[instrument(skip(actor, catalog))]
pub async fn dashboard(
    actor: &Actor,
    catalog: &impl CatalogProvider,
    low_stock_threshold: u32,
) -> Result<DashboardSummary> {
    require_admin(actor)?;

    let products = all_products(catalog).await?;
    let categories = catalog.categories().await?;

    let status_count = |status: StockStatus| {
        products
            .iter()
            .filter(|p| StockStatus::classify(p.stock, low_stock_threshold) == status)
            .count()
    };

    Ok(DashboardSummary {
        product_count: products.len(),
        total_stock: products.iter().map(|p| u64::from(p.stock)).sum(),
        low_stock_count: status_count(StockStatus::LowStock),
        out_of_stock_count: status_count(StockStatus::OutOfStock),
        category_count: categories.len(),
    })
}

//! Back-office report commands.
//!
//! # Usage
//!
//! ```bash
//! # Full inventory with the configured low-stock threshold
//! neon admin inventory
//!
//! # Only hoodies, flagging anything at or below 50 units
//! neon admin inventory --search hoodie --threshold 50
//!
//! # Summary figures
//! neon admin dashboard
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_LOW_STOCK_THRESHOLD` - Default low-stock threshold

use neon_core::{Actor, ActorRole};
use neon_storefront::admin::{self, StockStatus};

use super::Context;

/// Print inventory rows for the acting role.
///
/// # Errors
///
/// Returns an error if `role` is not admin or the catalog cannot be read.
pub async fn inventory(
    ctx: &Context,
    search: Option<&str>,
    role: ActorRole,
    threshold: Option<u32>,
) -> neon_storefront::Result<()> {
    let threshold = threshold.unwrap_or(ctx.config.low_stock_threshold);
    let rows = admin::inventory(&Actor::with_role(role), &ctx.catalog, search, threshold).await?;

    for row in &rows {
        let marker = match row.status {
            StockStatus::InStock => "",
            StockStatus::LowStock => " !",
            StockStatus::OutOfStock => " !!",
        };
        println!(
            "{:<8} {:<32} {:<12} {:>10} {:>6}  {}{marker}",
            row.id,
            row.name,
            row.category,
            row.price.display(),
            row.stock,
            row.status,
        );
    }

    tracing::info!(rows = rows.len(), threshold, "Inventory listed");
    Ok(())
}

/// Print dashboard summary figures for the acting role.
///
/// # Errors
///
/// Returns an error if `role` is not admin or the catalog cannot be read.
pub async fn dashboard(
    ctx: &Context,
    role: ActorRole,
    threshold: Option<u32>,
) -> neon_storefront::Result<()> {
    let threshold = threshold.unwrap_or(ctx.config.low_stock_threshold);
    let summary = admin::dashboard(&Actor::with_role(role), &ctx.catalog, threshold).await?;

    println!("Products:      {}", summary.product_count);
    println!("Categories:    {}", summary.category_count);
    println!("Units:         {}", summary.total_stock);
    println!("Low stock:     {} (at or below {threshold})", summary.low_stock_count);
    println!("Out of stock:  {}", summary.out_of_stock_count);

    Ok(())
}

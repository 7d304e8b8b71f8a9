//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! neon catalog list --collection best-sellers --sort popular
//! neon catalog list --size M --color black --max-price 100
//! neon catalog show prod_9
//! ```

use neon_core::ProductId;
use neon_storefront::AppError;
use neon_storefront::catalog::{CatalogProvider, Product, ProductQuery};

use super::Context;

fn print_product_row(product: &Product) {
    let sale = if product.is_on_sale() { " (sale)" } else { "" };
    println!(
        "{:<8} {:<32} {:>10}{sale:<7} {:<12} {:.1}*",
        product.id,
        product.name,
        product.price.display(),
        product.category,
        product.rating,
    );
}

/// Print one page of products matching `query`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be queried.
pub async fn list(ctx: &Context, query: &ProductQuery) -> neon_storefront::Result<()> {
    let page = ctx.catalog.filtered_products(query).await?;

    for product in &page.products {
        print_product_row(product);
    }

    println!();
    println!(
        "Page {} of {} ({} matching products)",
        page.page,
        page.total_pages.max(1),
        page.total
    );
    if page.has_more_pages() {
        println!("Next: --page {}", page.page + 1);
    }

    Ok(())
}

/// Print a product's details followed by related products.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the product does not exist.
pub async fn show(ctx: &Context, id: &ProductId) -> neon_storefront::Result<()> {
    let product = ctx
        .catalog
        .product(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    println!("{} ({})", product.name, product.id);
    println!("{}", product.description);
    println!();
    match product.compare_at_price {
        Some(compare) if product.is_on_sale() => {
            println!("Price:    {} (was {})", product.price.display(), compare.display());
        }
        _ => println!("Price:    {}", product.price.display()),
    }
    println!("Category: {}", product.category);
    if !product.sizes.is_empty() {
        println!("Sizes:    {}", product.sizes.join(", "));
    }
    if !product.colors.is_empty() {
        println!("Colors:   {}", product.colors.join(", "));
    }
    println!(
        "Rating:   {:.1} ({} reviews)",
        product.rating, product.review_count
    );
    println!("Stock:    {}", product.stock);

    let related = ctx
        .catalog
        .related_products(id, ctx.config.related_limit)
        .await?;
    if !related.is_empty() {
        println!();
        println!("You may also like:");
        for product in &related {
            print_product_row(product);
        }
    }

    Ok(())
}

//! Integration tests for the Neon storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p neon-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_cart` - Cart façade and session behaviour
//! - `storefront_catalog` - Catalog queries over the built-in data
//! - `storefront_admin` - Admin gate and inventory reports
//!
//! Shared fixtures live here so every test file builds carts the same way.

#![allow(clippy::missing_panics_doc, clippy::expect_used)]

use neon_core::{CurrencyCode, Price, ProductId, Quantity};
use neon_storefront::cart::LineItem;
use neon_storefront::catalog::{InMemoryCatalog, Product};

/// Parse a product ID, panicking on empty input.
#[must_use]
pub fn pid(raw: &str) -> ProductId {
    ProductId::parse(raw).expect("valid product id")
}

/// A USD line item priced in cents.
#[must_use]
pub fn line(id: &str, cents: i64, quantity: u32) -> LineItem {
    LineItem::new(
        pid(id),
        format!("Product {id}"),
        Price::from_cents(cents, CurrencyCode::USD),
        Quantity::new(quantity).expect("non-zero quantity"),
        format!("https://img.example/{id}.jpg"),
    )
}

/// The built-in catalog.
#[must_use]
pub fn catalog() -> InMemoryCatalog {
    InMemoryCatalog::builtin().expect("built-in catalog parses")
}

/// A product from the built-in catalog.
#[must_use]
pub fn product(id: &str) -> Product {
    catalog()
        .data()
        .product(&pid(id))
        .cloned()
        .expect("product exists in built-in catalog")
}

//! Read-only cart projections for rendering.
//!
//! Views are detached snapshots with prices already formatted. Re-derive one
//! from the [`Cart`] after every mutation.

use serde::Serialize;

use neon_core::{CurrencyCode, Price};

use super::Cart;
use super::line_item::LineItem;

/// Cart line display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub variant_title: Option<String>,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub image: String,
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u64,
    pub is_open: bool,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty(currency: CurrencyCode) -> Self {
        Self {
            items: Vec::new(),
            subtotal: Price::zero(currency).display(),
            item_count: 0,
            is_open: false,
        }
    }
}

// =============================================================================
// Type Conversions
// =============================================================================

/// Join the chosen size and color into a single label, e.g. "M / purple".
fn variant_title(item: &LineItem) -> Option<String> {
    match (item.size(), item.color()) {
        (Some(size), Some(color)) => Some(format!("{size} / {color}")),
        (Some(only), None) | (None, Some(only)) => Some(only.to_string()),
        (None, None) => None,
    }
}

impl From<&LineItem> for CartItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id().to_string(),
            name: item.name().to_string(),
            variant_title: variant_title(item),
            quantity: item.quantity().get(),
            price: item.unit_price().display(),
            line_price: item.line_total().display(),
            image: item.image().to_string(),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            subtotal: cart.total_price().display(),
            item_count: cart.total_items(),
            is_open: cart.is_open(),
        }
    }
}

//! Cart error types.

use thiserror::Error;

use neon_core::{CurrencyCode, ProductId, QuantityError};

/// Errors raised at the cart façade boundary.
///
/// Operating on a product that is not in the cart is never an error; see
/// [`QuantityUpdate::NotInCart`](super::QuantityUpdate::NotInCart).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Quantity below 1.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(#[from] QuantityError),

    /// Merging would push the line past `u32::MAX` units.
    #[error("quantity for {product_id} would overflow")]
    QuantityOverflow {
        /// Line being merged into.
        product_id: ProductId,
    },

    /// The change would push the cart total past what a `Decimal` can hold.
    #[error("cart total would overflow after changing {product_id}")]
    TotalOverflow {
        /// Line being added or resized.
        product_id: ProductId,
    },

    /// The item is priced in a different currency than the cart.
    #[error("{product_id} is priced in {found}, but the cart uses {expected}")]
    CurrencyMismatch {
        /// Offending product.
        product_id: ProductId,
        /// Cart currency.
        expected: CurrencyCode,
        /// Item currency.
        found: CurrencyCode,
    },

    /// Requested size or color is not offered for the product.
    #[error("{product_id} is not offered in {attribute} '{value}'")]
    UnknownVariant {
        /// Product being added.
        product_id: ProductId,
        /// `size` or `color`.
        attribute: &'static str,
        /// Requested value.
        value: String,
    },
}

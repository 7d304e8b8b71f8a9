//! Shopper session: the acting user plus their cart.

use tracing::{info, instrument};

use neon_core::{Actor, CurrencyCode, Quantity};

use crate::auth::require_signed_in;
use crate::cart::{Cart, CartError, LineItem};
use crate::catalog::Product;
use crate::error::Result;

/// Size and color chosen on the product page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantSelection {
    pub size: Option<String>,
    pub color: Option<String>,
}

impl VariantSelection {
    #[must_use]
    pub fn new(size: Option<String>, color: Option<String>) -> Self {
        Self { size, color }
    }
}

/// A shopper's session.
///
/// Owns the cart for its lifetime. Signing in or out swaps the actor but
/// keeps the cart.
#[derive(Debug, Clone)]
pub struct ShopperSession {
    actor: Actor,
    cart: Cart,
}

impl ShopperSession {
    /// Start a session with an empty cart.
    #[must_use]
    pub const fn new(actor: Actor, currency: CurrencyCode) -> Self {
        Self {
            actor,
            cart: Cart::new(currency),
        }
    }

    #[must_use]
    pub const fn actor(&self) -> &Actor {
        &self.actor
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Mutable access for quantity changes, removal and the drawer toggle.
    pub const fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    pub fn sign_in(&mut self, actor: Actor) {
        info!(role = %actor.role, "Actor signed in");
        self.actor = actor;
    }

    pub fn sign_out(&mut self) {
        info!("Actor signed out");
        self.actor = Actor::anonymous();
    }

    /// Add `quantity` units of `product` to the cart.
    ///
    /// Snapshots the product's name, price and first image into a new line.
    /// Returns the line's quantity after the call.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SignedOut` for anonymous actors, and a `CartError`
    /// if the quantity is zero, a selected size or color is not offered, or
    /// the cart rejects the line.
    #[instrument(skip_all, fields(product_id = %product.id, quantity = quantity))]
    pub fn add_to_cart(
        &mut self,
        product: &Product,
        selection: VariantSelection,
        quantity: u32,
    ) -> Result<Quantity> {
        require_signed_in(&self.actor)?;

        let quantity = Quantity::new(quantity).map_err(CartError::from)?;
        let mut item = LineItem::new(
            product.id.clone(),
            product.name.clone(),
            product.price,
            quantity,
            product.featured_image().unwrap_or_default(),
        );

        if let Some(size) = selection.size {
            if !product.offers_size(&size) {
                return Err(unknown_variant(product, "size", size).into());
            }
            item = item.with_size(size);
        }

        if let Some(color) = selection.color {
            if !product.offers_color(&color) {
                return Err(unknown_variant(product, "color", color).into());
            }
            item = item.with_color(color);
        }

        Ok(self.cart.add_item(item)?)
    }
}

fn unknown_variant(product: &Product, attribute: &'static str, value: String) -> CartError {
    CartError::UnknownVariant {
        product_id: product.id.clone(),
        attribute,
        value,
    }
}

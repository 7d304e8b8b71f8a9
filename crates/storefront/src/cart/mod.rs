//! Shopping cart.
//!
//! [`Cart`] is the only writer of cart state. It owns a [`CartStore`] plus the
//! open/closed flag of the slide-over panel, validates input at its boundary,
//! and logs each mutation. Presentation code reads through `&Cart` or a
//! [`CartView`] snapshot.
//!
//! # Merge vs. set
//!
//! [`Cart::add_item`] merges: adding a product already in the cart increases
//! its quantity. [`Cart::update_quantity`] sets: the line ends up with exactly
//! the requested quantity. The two are deliberately separate operations.
//!
//! # Example
//!
//! ```
//! use neon_core::{CurrencyCode, Price, ProductId, Quantity};
//! use neon_storefront::cart::{Cart, LineItem};
//!
//! let mut cart = Cart::new(CurrencyCode::USD);
//! let hoodie = |qty| {
//!     LineItem::new(
//!         ProductId::parse("prod_1").unwrap(),
//!         "Neon Tech Hoodie",
//!         Price::from_cents(8999, CurrencyCode::USD),
//!         Quantity::new(qty).unwrap(),
//!         "hoodie.jpg",
//!     )
//! };
//!
//! cart.add_item(hoodie(2)).unwrap();
//! cart.add_item(hoodie(3)).unwrap();
//! assert_eq!(cart.items().len(), 1);
//! assert_eq!(cart.total_items(), 5);
//! ```

mod error;
mod line_item;
mod store;
mod view;

pub use error::CartError;
pub use line_item::LineItem;
pub use store::CartStore;
pub use view::{CartItemView, CartView};

use serde::Serialize;
use tracing::{debug, instrument, warn};

use neon_core::{CurrencyCode, Price, ProductId, Quantity};

use store::Merge;

/// Result of a quantity change addressed by product ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityUpdate {
    /// The line now holds `current` units (previously `previous`).
    Updated {
        /// Quantity before the call.
        previous: Quantity,
        /// Quantity after the call.
        current: Quantity,
    },
    /// No line exists for the product; nothing changed.
    NotInCart,
}

impl QuantityUpdate {
    /// Whether a line was found.
    #[must_use]
    pub const fn is_updated(&self) -> bool {
        matches!(self, Self::Updated { .. })
    }
}

/// The shopper's cart: line items plus panel visibility.
///
/// Serializable for rendering and logging, but not deserializable: every line
/// enters through [`Cart::add_item`], which keeps lines unique by product and
/// priced in one currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cart {
    store: CartStore,
    is_open: bool,
    currency: CurrencyCode,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(CurrencyCode::default())
    }
}

impl Cart {
    /// Create an empty, closed cart priced in `currency`.
    #[must_use]
    pub const fn new(currency: CurrencyCode) -> Self {
        Self {
            store: CartStore::new(),
            is_open: false,
            currency,
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Line items in the order they were first added.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        self.store.items()
    }

    /// The line for `id`, if any.
    #[must_use]
    pub fn line(&self, id: &ProductId) -> Option<&LineItem> {
        self.store.get(id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Whether the slide-over panel is shown.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// Sum of quantities, recomputed on every call.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.store.total_items()
    }

    /// Sum of line totals in the cart currency, recomputed on every call.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.store.total_price(self.currency)
    }

    /// Read-only projection for rendering.
    #[must_use]
    pub fn view(&self) -> CartView {
        CartView::from(self)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add an item, merging into an existing line for the same product.
    ///
    /// Returns the line's quantity after the call.
    ///
    /// # Errors
    ///
    /// Returns `CartError::CurrencyMismatch` if the item is not priced in the
    /// cart currency, `CartError::QuantityOverflow` if the merged quantity
    /// would not fit in a `u32`, or `CartError::TotalOverflow` if the cart
    /// total would no longer fit in a `Decimal`. The cart is unchanged on error.
    #[instrument(skip(self, item), fields(product_id = %item.id(), quantity = %item.quantity()))]
    pub fn add_item(&mut self, item: LineItem) -> Result<Quantity, CartError> {
        let found = item.unit_price().currency_code;
        if found != self.currency {
            return Err(CartError::CurrencyMismatch {
                product_id: item.id().clone(),
                expected: self.currency,
                found,
            });
        }

        let product_id = item.id().clone();
        let mut store = self.store.clone();
        let merge = store
            .merge(item)
            .map_err(|_| CartError::QuantityOverflow {
                product_id: product_id.clone(),
            })?;
        self.commit(store, &product_id)?;

        match merge {
            Merge::Appended { quantity } => {
                debug!("Added new cart line");
                Ok(quantity)
            }
            Merge::Merged { quantity } => {
                debug!(total = %quantity, "Merged into existing cart line");
                Ok(quantity)
            }
        }
    }

    /// Remove the line for `id` regardless of its quantity.
    ///
    /// Removing a product that is not in the cart is a no-op and returns `None`.
    #[instrument(skip_all, fields(product_id = %id))]
    pub fn remove_item(&mut self, id: &ProductId) -> Option<LineItem> {
        let removed = self.store.remove(id);
        if removed.is_some() {
            debug!("Removed cart line");
        } else {
            debug!("Remove requested for product not in cart");
        }
        removed
    }

    /// Set the quantity of the line for `id` to exactly `quantity`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidQuantity` if `quantity` is 0, or
    /// `CartError::TotalOverflow` if the new quantity would push the cart
    /// total past what a `Decimal` can hold; the line is left unchanged. A
    /// product that is not in the cart is not an error and yields
    /// `QuantityUpdate::NotInCart`.
    #[instrument(skip_all, fields(product_id = %id, quantity = quantity))]
    pub fn update_quantity(
        &mut self,
        id: &ProductId,
        quantity: u32,
    ) -> Result<QuantityUpdate, CartError> {
        let quantity = Quantity::new(quantity)?;
        self.set_quantity(id, quantity)
    }

    /// Add one unit to the line for `id`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::QuantityOverflow` if the line already holds
    /// `u32::MAX` units, or `CartError::TotalOverflow` if one more unit would
    /// overflow the cart total.
    pub fn increment_quantity(&mut self, id: &ProductId) -> Result<QuantityUpdate, CartError> {
        let Some(current) = self.store.get(id).map(LineItem::quantity) else {
            return Ok(QuantityUpdate::NotInCart);
        };
        let next = current
            .checked_add(Quantity::ONE)
            .map_err(|_| CartError::QuantityOverflow {
                product_id: id.clone(),
            })?;
        self.set_quantity(id, next)
    }

    /// Remove one unit from the line for `id`, never going below 1.
    ///
    /// Shrinking a line cannot overflow the total.
    pub fn decrement_quantity(&mut self, id: &ProductId) -> QuantityUpdate {
        let Some(current) = self.store.get(id).map(LineItem::quantity) else {
            return QuantityUpdate::NotInCart;
        };
        let next = Quantity::clamped(current.get() - 1);
        match self.store.set_quantity(id, next) {
            Some(previous) => updated(id, previous, next),
            None => QuantityUpdate::NotInCart,
        }
    }

    /// Remove every line. Panel visibility is unaffected.
    #[instrument(skip_all)]
    pub fn clear_cart(&mut self) {
        let removed = self.store.clear();
        debug!(removed, "Cleared cart");
    }

    /// Show or hide the slide-over panel. Line items are unaffected.
    pub fn toggle_cart(&mut self) -> bool {
        self.is_open = !self.is_open;
        debug!(is_open = self.is_open, "Toggled cart panel");
        self.is_open
    }

    fn set_quantity(
        &mut self,
        id: &ProductId,
        quantity: Quantity,
    ) -> Result<QuantityUpdate, CartError> {
        let mut store = self.store.clone();
        let Some(previous) = store.set_quantity(id, quantity) else {
            debug!(product_id = %id, "Quantity update for product not in cart");
            return Ok(QuantityUpdate::NotInCart);
        };
        self.commit(store, id)?;
        Ok(updated(id, previous, quantity))
    }

    /// Swap in `store` if its total is still representable.
    fn commit(&mut self, store: CartStore, product_id: &ProductId) -> Result<(), CartError> {
        if store.checked_total(self.currency).is_none() {
            warn!(%product_id, "Rejected cart change: total would overflow");
            return Err(CartError::TotalOverflow {
                product_id: product_id.clone(),
            });
        }
        self.store = store;
        Ok(())
    }
}

fn updated(id: &ProductId, previous: Quantity, current: Quantity) -> QuantityUpdate {
    debug!(product_id = %id, %previous, %current, "Updated quantity");
    QuantityUpdate::Updated { previous, current }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use neon_core::QuantityError;
    use rust_decimal::Decimal;

    use super::*;

    fn id(raw: &str) -> ProductId {
        ProductId::parse(raw).unwrap()
    }

    fn item(raw: &str, cents: i64, quantity: u32) -> LineItem {
        LineItem::new(
            id(raw),
            format!("Product {raw}"),
            Price::from_cents(cents, CurrencyCode::USD),
            Quantity::new(quantity).unwrap(),
            format!("{raw}.jpg"),
        )
    }

    #[test]
    fn test_add_same_product_merges() {
        let mut cart = Cart::default();
        cart.add_item(item("p1", 1000, 2)).unwrap();
        let quantity = cart.add_item(item("p1", 1000, 3)).unwrap();

        assert_eq!(quantity.get(), 5);
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_repeated_adds_sum_quantities() {
        let mut cart = Cart::default();
        let quantities = [1, 4, 2, 7, 1];
        for quantity in quantities {
            cart.add_item(item("p1", 500, quantity)).unwrap();
        }

        let expected: u32 = quantities.iter().sum();
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.line(&id("p1")).unwrap().quantity().get(), expected);
    }

    #[test]
    fn test_add_after_remove_starts_fresh() {
        let mut cart = Cart::default();
        cart.add_item(item("p1", 1000, 4)).unwrap();
        cart.remove_item(&id("p1"));
        cart.add_item(item("p1", 1000, 1)).unwrap();

        assert_eq!(cart.line(&id("p1")).unwrap().quantity().get(), 1);
    }

    #[test]
    fn test_add_rejects_foreign_currency() {
        let mut cart = Cart::new(CurrencyCode::USD);
        let euro = LineItem::new(
            id("p1"),
            "Euro item",
            Price::from_cents(1000, CurrencyCode::EUR),
            Quantity::ONE,
            "p1.jpg",
        );

        let err = cart.add_item(euro).unwrap_err();
        assert!(matches!(err, CartError::CurrencyMismatch { .. }));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_overflow_is_rejected() {
        let mut cart = Cart::default();
        cart.add_item(item("p1", 1, u32::MAX)).unwrap();

        let err = cart.add_item(item("p1", 1, 1)).unwrap_err();
        assert_eq!(err, CartError::QuantityOverflow { product_id: id("p1") });
        assert_eq!(cart.total_items(), u64::from(u32::MAX));
    }

    #[test]
    fn test_remove_missing_leaves_cart_unchanged() {
        let mut cart = Cart::default();
        cart.add_item(item("p1", 1000, 2)).unwrap();
        cart.toggle_cart();
        let before = cart.clone();

        assert!(cart.remove_item(&id("missing")).is_none());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_update_quantity_sets_rather_than_adds() {
        let mut cart = Cart::default();
        cart.add_item(item("p1", 1000, 3)).unwrap();

        let update = cart.update_quantity(&id("p1"), 7).unwrap();
        assert_eq!(
            update,
            QuantityUpdate::Updated {
                previous: Quantity::new(3).unwrap(),
                current: Quantity::new(7).unwrap(),
            }
        );
        assert_eq!(cart.line(&id("p1")).unwrap().quantity().get(), 7);
    }

    #[test]
    fn test_update_quantity_zero_is_rejected() {
        let mut cart = Cart::default();
        cart.add_item(item("p1", 1000, 3)).unwrap();

        let err = cart.update_quantity(&id("p1"), 0).unwrap_err();
        assert_eq!(err, CartError::InvalidQuantity(QuantityError::Zero));
        assert_eq!(cart.line(&id("p1")).unwrap().quantity().get(), 3);
    }

    #[test]
    fn test_update_quantity_missing_reports_not_in_cart() {
        let mut cart = Cart::default();
        cart.add_item(item("p1", 1000, 3)).unwrap();
        let before = cart.clone();

        let update = cart.update_quantity(&id("nope"), 4).unwrap();
        assert_eq!(update, QuantityUpdate::NotInCart);
        assert!(!update.is_updated());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_increment_and_decrement() {
        let mut cart = Cart::default();
        cart.add_item(item("p1", 1000, 1)).unwrap();

        assert!(cart.increment_quantity(&id("p1")).unwrap().is_updated());
        assert_eq!(cart.total_items(), 2);

        cart.decrement_quantity(&id("p1"));
        cart.decrement_quantity(&id("p1"));
        assert_eq!(cart.total_items(), 1);

        assert_eq!(
            cart.decrement_quantity(&id("ghost")),
            QuantityUpdate::NotInCart
        );
        assert_eq!(
            cart.increment_quantity(&id("ghost")).unwrap(),
            QuantityUpdate::NotInCart
        );
    }

    #[test]
    fn test_total_price_tracks_mutations() {
        let mut cart = Cart::default();
        cart.add_item(item("p1", 8999, 1)).unwrap();
        cart.add_item(item("p2", 3999, 2)).unwrap();
        assert_eq!(cart.total_price().amount, Decimal::new(16997, 2));

        cart.update_quantity(&id("p1"), 3).unwrap();
        assert_eq!(cart.total_price().amount, Decimal::new(34995, 2));

        cart.remove_item(&id("p1"));
        assert_eq!(cart.total_price().amount, Decimal::new(7998, 2));
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn test_clear_keeps_panel_state() {
        let mut cart = Cart::default();
        cart.add_item(item("p1", 8999, 1)).unwrap();
        cart.toggle_cart();

        cart.clear_cart();
        assert!(cart.items().is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price().amount, Decimal::ZERO);
        assert!(cart.is_open());
    }

    #[test]
    fn test_add_rejects_unrepresentable_line_total() {
        let mut cart = Cart::default();
        let priceless = |quantity| {
            LineItem::new(
                id("gold"),
                "Gold",
                Price::new(Decimal::MAX, CurrencyCode::USD),
                Quantity::new(quantity).unwrap(),
                "gold.jpg",
            )
        };

        let err = cart.add_item(priceless(2)).unwrap_err();
        assert_eq!(err, CartError::TotalOverflow { product_id: id("gold") });
        assert!(cart.is_empty());
        assert_eq!(cart.view().subtotal, "$0.00");

        cart.add_item(priceless(1)).unwrap();
        let before = cart.clone();
        assert!(matches!(
            cart.add_item(priceless(1)),
            Err(CartError::TotalOverflow { .. })
        ));
        assert!(matches!(
            cart.add_item(item("p1", 100, 1)),
            Err(CartError::TotalOverflow { .. })
        ));
        assert_eq!(cart, before);
        assert_eq!(cart.total_price().amount, Decimal::MAX);
    }

    #[test]
    fn test_quantity_growth_rejected_when_total_would_overflow() {
        let mut cart = Cart::default();
        cart.add_item(LineItem::new(
            id("gold"),
            "Gold",
            Price::new(Decimal::MAX, CurrencyCode::USD),
            Quantity::ONE,
            "gold.jpg",
        ))
        .unwrap();
        let before = cart.clone();

        assert_eq!(
            cart.update_quantity(&id("gold"), 2).unwrap_err(),
            CartError::TotalOverflow { product_id: id("gold") }
        );
        assert!(matches!(
            cart.increment_quantity(&id("gold")),
            Err(CartError::TotalOverflow { .. })
        ));
        assert_eq!(cart, before);

        let view = cart.view();
        assert_eq!(view.item_count, 1);
        assert_eq!(view.items.len(), 1);
    }

    #[test]
    fn test_many_large_lines_stop_at_overflow() {
        let mut cart = Cart::default();
        let mut rejected = None;
        for index in 0..300 {
            let line = item(&format!("p{index}"), i64::MAX, u32::MAX);
            if let Err(err) = cart.add_item(line) {
                rejected = Some((index, err));
                break;
            }
        }

        let (index, err) = rejected.unwrap();
        assert_eq!(
            err,
            CartError::TotalOverflow {
                product_id: id(&format!("p{index}"))
            }
        );
        assert_eq!(cart.items().len(), index);
        assert_eq!(
            cart.store.checked_total(CurrencyCode::USD),
            Some(cart.total_price())
        );
        let _ = cart.view();
    }

    #[test]
    fn test_serializes_without_duplicate_or_foreign_lines() {
        let mut cart = Cart::new(CurrencyCode::USD);
        cart.add_item(item("p1", 100, 1)).unwrap();
        cart.add_item(item("p1", 100, 2)).unwrap();
        let euro = LineItem::new(
            id("p1"),
            "Euro item",
            Price::from_cents(200, CurrencyCode::EUR),
            Quantity::new(2).unwrap(),
            "p1.jpg",
        );
        assert!(cart.add_item(euro).is_err());

        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(json["store"].as_array().unwrap().len(), 1);
        assert_eq!(json["store"][0]["quantity"], 3);
        assert_eq!(json["currency"], "USD");

        cart.remove_item(&id("p1"));
        assert!(cart.line(&id("p1")).is_none());
        assert_eq!(cart.total_price(), Price::zero(CurrencyCode::USD));
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let mut cart = Cart::default();
        cart.add_item(item("p1", 8999, 2)).unwrap();
        let items_before = cart.items().to_vec();

        assert!(cart.toggle_cart());
        assert!(!cart.toggle_cart());
        assert!(!cart.is_open());
        assert_eq!(cart.items(), items_before.as_slice());
    }
}

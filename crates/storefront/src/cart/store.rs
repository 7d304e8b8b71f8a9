//! Ordered line-item storage behind the cart façade.
//!
//! The store keeps line items unique by product ID in insertion order. Its
//! mutators are crate-private: only [`Cart`](super::Cart) writes to it, after
//! validating input. Totals are computed on every read and never cached.
//!
//! The store serializes as a plain array of lines but cannot be deserialized:
//! nothing outside the cart may assemble one.

use serde::Serialize;

use rust_decimal::Decimal;

use neon_core::{CurrencyCode, Price, ProductId, Quantity, QuantityError};

use super::line_item::LineItem;

/// What `merge` did with an incoming line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Merge {
    /// A new line was appended.
    Appended { quantity: Quantity },
    /// An existing line absorbed the quantity.
    Merged { quantity: Quantity },
}

/// Line items unique by product ID, in the order they were first added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CartStore {
    items: Vec<LineItem>,
}

impl CartStore {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// All lines, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Look up the line for a product.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity().get()))
            .sum()
    }

    /// Sum of `unit_price × quantity` across all lines.
    ///
    /// Lines are assumed to share `currency`; the façade enforces that on add,
    /// and rejects changes that would make [`checked_total`](Self::checked_total)
    /// fail, so the saturating arithmetic here never clamps for a cart's store.
    #[must_use]
    pub fn total_price(&self, currency: CurrencyCode) -> Price {
        let amount = self
            .items
            .iter()
            .fold(Decimal::ZERO, |sum, item| {
                sum.saturating_add(item.line_total().amount)
            });
        Price::new(amount, currency)
    }

    /// Exact total in `currency`, or `None` if a line is priced in another
    /// currency or the sum does not fit in a `Decimal`.
    #[must_use]
    pub fn checked_total(&self, currency: CurrencyCode) -> Option<Price> {
        self.items.iter().try_fold(Price::zero(currency), |sum, item| {
            sum.checked_add(item.checked_line_total()?)
        })
    }

    /// Add `item`, merging its quantity into an existing line with the same ID.
    ///
    /// On merge, the existing line's name, price, image and variants are kept
    /// and the incoming copies are dropped.
    pub(crate) fn merge(&mut self, item: LineItem) -> Result<Merge, QuantityError> {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id() == item.id()) {
            let quantity = existing.quantity().checked_add(item.quantity())?;
            existing.set_quantity(quantity);
            return Ok(Merge::Merged { quantity });
        }

        let quantity = item.quantity();
        self.items.push(item);
        Ok(Merge::Appended { quantity })
    }

    /// Remove the line for `id`, returning it if present.
    pub(crate) fn remove(&mut self, id: &ProductId) -> Option<LineItem> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }

    /// Overwrite the quantity of the line for `id`, returning the previous value.
    pub(crate) fn set_quantity(&mut self, id: &ProductId, quantity: Quantity) -> Option<Quantity> {
        let item = self.items.iter_mut().find(|item| item.id() == id)?;
        let previous = item.quantity();
        item.set_quantity(quantity);
        Some(previous)
    }

    /// Drop every line, returning how many there were.
    pub(crate) fn clear(&mut self) -> usize {
        let count = self.items.len();
        self.items.clear();
        count
    }
}

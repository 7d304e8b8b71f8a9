//! A single cart entry.

use serde::{Deserialize, Serialize};

use neon_core::{Price, ProductId, Quantity};

/// One row in the cart, keyed by product.
///
/// Everything except the quantity is a snapshot taken when the item was
/// added; later catalog price changes do not reach it. Size and color are
/// display-only and do not take part in the merge key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    id: ProductId,
    name: String,
    unit_price: Price,
    quantity: Quantity,
    image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<String>,
}

impl LineItem {
    /// Create a line item with no variant attributes.
    #[must_use]
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        unit_price: Price,
        quantity: Quantity,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            unit_price,
            quantity,
            image: image.into(),
            size: None,
            color: None,
        }
    }

    /// Attach a size selection.
    #[must_use]
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Attach a color selection.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn unit_price(&self) -> Price {
        self.unit_price
    }

    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }

    #[must_use]
    pub fn size(&self) -> Option<&str> {
        self.size.as_deref()
    }

    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Unit price times quantity.
    ///
    /// Clamps at the `Decimal` bounds. A [`Cart`](super::Cart) never holds a
    /// line where that happens.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.saturating_times(self.quantity)
    }

    /// Unit price times quantity, or `None` on overflow.
    #[must_use]
    pub fn checked_line_total(&self) -> Option<Price> {
        self.unit_price.checked_times(self.quantity)
    }

    pub(crate) const fn set_quantity(&mut self, quantity: Quantity) {
        self.quantity = quantity;
    }
}

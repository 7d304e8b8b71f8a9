//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::quantity::Quantity;

/// Errors that can occur when parsing price components.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The currency code is not one we sell in.
    #[error("unsupported currency code: {0}")]
    UnsupportedCurrency(String),
}

/// A price with currency information.
///
/// Line totals are computed with [`Price::checked_times`], which never rounds;
/// display formatting rounds to two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price from an amount in the smallest currency unit (cents).
    #[must_use]
    pub fn from_cents(cents: i64, currency_code: CurrencyCode) -> Self {
        Self {
            amount: Decimal::new(cents, 2),
            currency_code,
        }
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency_code,
        }
    }

    /// Multiply the unit price by a quantity.
    ///
    /// Returns `None` if the product does not fit in a `Decimal`.
    #[must_use]
    pub fn checked_times(&self, quantity: Quantity) -> Option<Self> {
        let amount = self.amount.checked_mul(Decimal::from(quantity.get()))?;
        Some(Self::new(amount, self.currency_code))
    }

    /// Multiply the unit price by a quantity, clamping at the `Decimal` bounds.
    #[must_use]
    pub fn saturating_times(&self, quantity: Quantity) -> Self {
        Self::new(
            self.amount.saturating_mul(Decimal::from(quantity.get())),
            self.currency_code,
        )
    }

    /// Add two prices in the same currency.
    ///
    /// Returns `None` if the currencies differ or the sum overflows.
    #[must_use]
    pub fn checked_add(&self, other: Self) -> Option<Self> {
        if self.currency_code != other.currency_code {
            return None;
        }
        let amount = self.amount.checked_add(other.amount)?;
        Some(Self::new(amount, self.currency_code))
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!(
            "{}{:.2}",
            self.currency_code.symbol(),
            self.amount.round_dp(2)
        )
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol placed before the amount.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// Three-letter ISO code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            _ => Err(PriceError::UnsupportedCurrency(s.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let price = Price::from_cents(8999, CurrencyCode::USD);
        assert_eq!(price.amount, Decimal::new(8999, 2));
    }

    #[test]
    fn test_times_quantity() {
        let price = Price::from_cents(3499, CurrencyCode::USD);
        let total = price.checked_times(Quantity::new(3).unwrap()).unwrap();
        assert_eq!(total.amount, Decimal::new(10497, 2));
        assert_eq!(total.currency_code, CurrencyCode::USD);
    }

    #[test]
    fn test_times_at_decimal_bounds() {
        let price = Price::new(Decimal::MAX, CurrencyCode::USD);
        let two = Quantity::new(2).unwrap();

        assert_eq!(price.checked_times(Quantity::ONE), Some(price));
        assert_eq!(price.checked_times(two), None);
        assert_eq!(price.saturating_times(two).amount, Decimal::MAX);
    }

    #[test]
    fn test_checked_add() {
        let a = Price::from_cents(1999, CurrencyCode::USD);
        let b = Price::from_cents(1, CurrencyCode::USD);
        assert_eq!(a.checked_add(b).unwrap().amount, Decimal::new(2000, 2));

        let max = Price::new(Decimal::MAX, CurrencyCode::USD);
        assert_eq!(max.checked_add(b), None);
        assert_eq!(a.checked_add(Price::from_cents(1, CurrencyCode::EUR)), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from_cents(8999, CurrencyCode::USD).display(), "$89.99");
        assert_eq!(Price::zero(CurrencyCode::EUR).display(), "€0.00");
        assert_eq!(
            Price::new(Decimal::new(5, 0), CurrencyCode::GBP).to_string(),
            "£5.00"
        );
    }

    #[test]
    fn test_currency_from_str_is_case_insensitive() {
        assert_eq!("usd".parse::<CurrencyCode>().unwrap(), CurrencyCode::USD);
        assert_eq!(" Eur ".parse::<CurrencyCode>().unwrap(), CurrencyCode::EUR);
        assert!(matches!(
            "JPY".parse::<CurrencyCode>(),
            Err(PriceError::UnsupportedCurrency(_))
        ));
    }

    #[test]
    fn test_serde_amount_as_string() {
        let price = Price::from_cents(12999, CurrencyCode::USD);
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, r#"{"amount":"129.99","currency_code":"USD"}"#);
    }
}

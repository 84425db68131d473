//! Money type for representing monetary values.
//!
//! Uses an integer minor-unit representation so that quantity and discount
//! arithmetic never accumulates floating-point error. The catalog API sends
//! prices as plain decimal numbers; [`as_decimal`] converts at the wire.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Mul;

/// Supported display currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    INR,
    JPY,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::INR => "INR",
            Currency::JPY => "JPY",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::INR => "\u{20b9}",
            Currency::JPY => "\u{00a5}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "INR" => Some(Currency::INR),
            "JPY" => Some(Currency::JPY),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (e.g., cents for USD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., cents).
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use storefront_catalog::money::{Money, Currency};
    /// let price = Money::from_decimal(49.99, Currency::USD);
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let amount_cents = (amount * multiplier as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_cents as f64 / divisor as f64
    }

    /// Relabel the same decimal amount in another currency (no exchange).
    pub fn in_currency(&self, currency: Currency) -> Money {
        if currency == self.currency {
            return *self;
        }
        Money::from_decimal(self.to_decimal(), currency)
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        let decimal = self.to_decimal();
        let places = self.currency.decimal_places() as usize;
        format!("{}{:.places$}", self.currency.symbol(), decimal)
    }

    /// Multiply by a scalar, saturating at the representable bounds.
    pub fn multiply(&self, factor: i64) -> Money {
        Money::new(self.amount_cents.saturating_mul(factor), self.currency)
    }

    /// Calculate a percentage of this amount.
    pub fn percentage(&self, percent: f64) -> Money {
        let amount = (self.amount_cents as f64 * percent / 100.0).round() as i64;
        Money::new(amount, self.currency)
    }

    /// Subtract another amount in the same currency.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        Some(Money::new(
            self.amount_cents.saturating_sub(other.amount_cents),
            self.currency,
        ))
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, factor: i64) -> Money {
        self.multiply(factor)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Serde adapter for prices sent as bare decimal numbers.
///
/// Decodes into the default currency and encodes back to a number, so a
/// product round-trips through the wire shape unchanged.
pub mod as_decimal {
    use super::{Currency, Money};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(money.to_decimal())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Ok(Money::from_decimal(amount, Currency::default()))
    }
}

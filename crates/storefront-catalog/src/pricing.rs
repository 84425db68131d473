//! Detail-view pricing: quantity stepper and price quote.

use crate::catalog::Product;
use crate::error::CatalogError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Quantity selected on the detail screen. Never below one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    pub const ONE: Quantity = Quantity(1);

    pub fn get(self) -> u32 {
        self.0
    }

    /// One more.
    pub fn increment(self) -> Self {
        Quantity(self.0.saturating_add(1))
    }

    /// One fewer, stopping at one.
    pub fn decrement(self) -> Self {
        Quantity(self.0.saturating_sub(1).max(1))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u32> for Quantity {
    type Error = CatalogError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value == 0 {
            return Err(CatalogError::InvalidQuantity(value));
        }
        Ok(Quantity(value))
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

/// Price breakdown for a product at a given quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub unit_price: Money,
    pub quantity: Quantity,
    /// `unit_price * quantity`.
    pub total: Money,
    /// Advertised discount percentage, clamped to 0..=100.
    pub discount_percent: i64,
    /// Total after the advertised discount.
    pub discounted_total: Money,
}

impl PriceQuote {
    pub fn new(product: &Product, quantity: Quantity) -> Self {
        let factor = i64::from(quantity.get());
        let total = product.price.multiply(factor);
        let discount_percent = product.discount.clamp(0, 100);
        let off = total.percentage(discount_percent as f64);
        let discounted_total = total.try_subtract(&off).unwrap_or(total);

        Self {
            unit_price: product.price,
            quantity,
            total,
            discount_percent,
            discounted_total,
        }
    }

    /// Amount saved by the discount.
    pub fn savings(&self) -> Money {
        self.total
            .try_subtract(&self.discounted_total)
            .unwrap_or(Money::zero(self.total.currency))
    }

    /// Same product at a new quantity.
    pub fn with_quantity(&self, quantity: Quantity) -> Self {
        let factor = i64::from(quantity.get());
        let total = self.unit_price.multiply(factor);
        let off = total.percentage(self.discount_percent as f64);
        Self {
            quantity,
            total,
            discounted_total: total.try_subtract(&off).unwrap_or(total),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn headphones() -> Product {
        Product::new(7, "Headphones", "audio", Money::new(19999, Currency::USD)).with_discount(25)
    }

    #[test]
    fn test_quantity_never_below_one() {
        let q = Quantity::default();
        assert_eq!(q.decrement(), Quantity::ONE);
        assert_eq!(q.increment().increment().decrement().get(), 2);
        assert_eq!(Quantity::try_from(0), Err(CatalogError::InvalidQuantity(0)));
        assert_eq!(Quantity::try_from(3).unwrap().get(), 3);
    }

    #[test]
    fn test_quantity_serde_rejects_zero() {
        assert!(serde_json::from_str::<Quantity>("0").is_err());
        assert_eq!(serde_json::from_str::<Quantity>("4").unwrap().get(), 4);
    }

    #[test]
    fn test_quote_total_is_unit_times_quantity() {
        let quote = PriceQuote::new(&headphones(), Quantity::try_from(3).unwrap());
        assert_eq!(quote.total, Money::new(59997, Currency::USD));
        assert_eq!(quote.discount_percent, 25);
        assert_eq!(quote.discounted_total, Money::new(44998, Currency::USD));
        assert_eq!(quote.savings(), Money::new(14999, Currency::USD));
    }

    #[test]
    fn test_quote_with_quantity_recomputes() {
        let quote = PriceQuote::new(&headphones(), Quantity::ONE);
        let bumped = quote.with_quantity(quote.quantity.increment());
        assert_eq!(bumped.total, Money::new(39998, Currency::USD));
        assert_eq!(bumped, PriceQuote::new(&headphones(), Quantity::try_from(2).unwrap()));
    }
}

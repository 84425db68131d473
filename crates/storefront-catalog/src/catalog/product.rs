//! Product type and wire decoding.

use crate::ids::ProductId;
use crate::money::{self, Money};
use serde::{Deserialize, Deserializer, Serialize};

/// A product in the catalog.
///
/// Values are treated as immutable: the favorite flag is the only field that
/// changes after decoding, and it changes by building a new value with
/// [`Product::with_favorite`]. The same product may be held by the snapshot,
/// the favorites view and the selected-product slot at once.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub title: String,
    /// Absolute or root-relative image URL.
    #[serde(default, deserialize_with = "string_or_empty")]
    pub image: String,
    /// Unit price.
    #[serde(with = "money::as_decimal")]
    pub price: Money,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub category: String,
    /// Advertised discount, in percent.
    #[serde(default, deserialize_with = "int_or_zero")]
    pub discount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popular: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_sale: Option<bool>,
    /// Client-side favorite mark. Never read from or written to the wire.
    #[serde(skip)]
    pub is_favorite: bool,
}

impl Product {
    /// Create a product with the required listing fields.
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        category: impl Into<String>,
        price: Money,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image: String::new(),
            price,
            description: String::new(),
            brand: None,
            model: None,
            color: None,
            category: category.into(),
            discount: 0,
            popular: None,
            on_sale: None,
            is_favorite: false,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_discount(mut self, percent: i64) -> Self {
        self.discount = percent;
        self
    }

    /// Copy of this product carrying the given favorite flag.
    pub fn with_favorite(&self, is_favorite: bool) -> Self {
        Self {
            is_favorite,
            ..self.clone()
        }
    }

    /// Whether every field a listing row needs is present.
    ///
    /// Title, image reference, description and category must be non-blank.
    pub fn is_displayable(&self) -> bool {
        [&self.title, &self.image, &self.description, &self.category]
            .iter()
            .all(|field| !field.trim().is_empty())
    }

    /// Unit price after the advertised discount.
    pub fn discounted_price(&self) -> Money {
        let off = self.price.percentage(self.discount.clamp(0, 100) as f64);
        self.price.try_subtract(&off).unwrap_or(self.price)
    }

    /// True if the API flagged the product as on sale or it carries a discount.
    pub fn is_on_sale(&self) -> bool {
        self.on_sale.unwrap_or(false) || self.discount > 0
    }
}

/// Accepts a missing, `null` or string value; anything absent becomes `""`.
fn string_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts a missing or `null` number as `0`.
fn int_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or_default())
}

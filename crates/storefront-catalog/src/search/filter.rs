//! Search filter types.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};

/// Text and category filter applied to a product list.
///
/// Blank criteria match everything. Both criteria must match when set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    /// Case-insensitive substring of the title or brand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Case-insensitive category name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ProductFilter {
    /// A filter that matches everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search text.
    pub fn text(mut self, query: impl Into<String>) -> Self {
        self.text = Some(query.into());
        self
    }

    /// Set the category.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// True if neither criterion narrows the result.
    pub fn is_empty(&self) -> bool {
        non_blank(&self.text).is_none() && non_blank(&self.category).is_none()
    }

    /// Check a single product.
    pub fn matches(&self, product: &Product) -> bool {
        let text_ok = match non_blank(&self.text) {
            None => true,
            Some(query) => {
                let query = query.to_lowercase();
                product.title.to_lowercase().contains(&query)
                    || product
                        .brand
                        .as_deref()
                        .is_some_and(|brand| brand.to_lowercase().contains(&query))
            }
        };

        let category_ok = match non_blank(&self.category) {
            None => true,
            Some(category) => product.category.trim().eq_ignore_ascii_case(category),
        };

        text_ok && category_ok
    }

    /// Filter a product list, keeping order.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        products
            .iter()
            .filter(|product| self.matches(product))
            .cloned()
            .collect()
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Distinct categories in first-seen order.
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for product in products {
        let category = product.category.trim();
        if category.is_empty() || seen.iter().any(|c| c.eq_ignore_ascii_case(category)) {
            continue;
        }
        seen.push(category.to_string());
    }
    seen
}

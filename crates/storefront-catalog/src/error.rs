//! Catalog error types.

use thiserror::Error;

use crate::ids::ProductId;

/// Errors raised by fallible catalog helpers.
///
/// Store operations never return these; network failures are surfaced on the
/// store's error streams instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Product not present in the current snapshot.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Quantity below the minimum of one.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// Client configuration could not be used.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

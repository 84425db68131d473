//! Product catalog state layer for the storefront.
//!
//! - **Catalog**: the [`Product`] value type and response envelope decoding
//! - **Client**: the [`CatalogClient`] contract and its HTTP implementation
//! - **Store**: [`CatalogStore`], the observable state holder views bind to
//! - **Search**: text and category filtering
//! - **Pricing**: quantity stepper and detail-view price quote
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_catalog::prelude::*;
//!
//! let client = HttpCatalogClient::connect("https://fakestoreapi.in/api", ProductLookup::Path)?;
//! let store = CatalogStore::new(client);
//!
//! let mut products = store.watch_products();
//! store.fetch_products().await;
//! if let Some(error) = store.error(Operation::List) {
//!     eprintln!("{error}");
//!     store.clear_error(Operation::List);
//! }
//!
//! let first = products.next().await.unwrap()[0].clone();
//! store.toggle_favorite(&first);
//! store.open_product(first.id).await;
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod client;
pub mod pricing;
pub mod search;
pub mod store;

pub use catalog::{resolve_image_url, Product};
pub use client::{CatalogClient, HttpCatalogClient, ProductLookup};
pub use error::CatalogError;
pub use ids::ProductId;
pub use money::{Currency, Money};
pub use pricing::{PriceQuote, Quantity};
pub use search::ProductFilter;
pub use store::{CatalogStore, Operation, Snapshot, StateStream};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::catalog::{resolve_image_url, Product};
    pub use crate::client::{CatalogClient, HttpCatalogClient, ProductLookup};
    pub use crate::error::CatalogError;
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};
    pub use crate::pricing::{PriceQuote, Quantity};
    pub use crate::search::ProductFilter;
    pub use crate::store::{CatalogStore, Operation, Snapshot, StateStream};
}

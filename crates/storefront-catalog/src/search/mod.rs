//! Search and category filtering over catalog snapshots.

mod filter;

pub use filter::{categories, ProductFilter};

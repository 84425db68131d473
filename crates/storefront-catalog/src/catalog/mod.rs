//! Product catalog module.
//!
//! Contains the product value type, response envelope decoding and image
//! reference resolution.

mod envelope;
mod image;
mod product;

pub use envelope::{decode_product, decode_product_list};
pub use image::resolve_image_url;
pub use product::Product;

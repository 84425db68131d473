//! Catalog response envelopes.
//!
//! The list endpoint has answered in three shapes over time: a bare product
//! array, a single `{status, message, products}` envelope, and an array of
//! such envelopes (one per page). All pages present in one body are
//! concatenated in order. Entries that fail to decode are dropped one at a
//! time; the rest of the list survives.

use serde::Deserialize;
use serde_json::Value;
use storefront_data::FetchError;

use super::Product;

#[derive(Debug, Deserialize)]
struct ProductPage {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    products: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct SingleProduct {
    product: Product,
}

enum Shape {
    Pages,
    Products,
    Page,
    WrappedProduct,
    Other,
}

fn shape(value: &Value) -> Shape {
    match value {
        Value::Array(items) if !items.is_empty() && items.iter().all(is_page) => Shape::Pages,
        Value::Array(_) => Shape::Products,
        Value::Object(map) if map.contains_key("products") => Shape::Page,
        Value::Object(map) if map.get("product").is_some_and(Value::is_object) => {
            Shape::WrappedProduct
        }
        _ => Shape::Other,
    }
}

fn is_page(item: &Value) -> bool {
    item.as_object()
        .is_some_and(|map| map.contains_key("products"))
}

/// Decode list entries one at a time, dropping the ones that do not decode.
fn decode_items(items: Vec<Value>) -> Vec<Product> {
    let received = items.len();
    let products: Vec<Product> = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(product) => Some(product),
            Err(e) => {
                tracing::debug!(error = %e, "undecodable catalog entry");
                None
            }
        })
        .collect();

    let dropped = received - products.len();
    if dropped > 0 {
        tracing::warn!(received, dropped, "discarded undecodable catalog entries");
    }
    products
}

fn unwrap_pages(pages: Vec<ProductPage>) -> Vec<Value> {
    let count = pages.len();
    let mut products = Vec::new();
    for page in pages {
        tracing::debug!(
            status = page.status.as_deref().unwrap_or(""),
            message = page.message.as_deref().unwrap_or(""),
            products = page.products.len(),
            "catalog page"
        );
        products.extend(page.products);
    }
    tracing::debug!(pages = count, products = products.len(), "unwrapped catalog pages");
    products
}

/// Decode a list response body into the concatenated product sequence.
pub fn decode_product_list(body: &[u8]) -> Result<Vec<Product>, FetchError> {
    let value: Value = serde_json::from_slice(body)?;
    let items = match shape(&value) {
        Shape::Pages => unwrap_pages(serde_json::from_value(value)?),
        Shape::Page => unwrap_pages(vec![serde_json::from_value(value)?]),
        Shape::Products => serde_json::from_value(value)?,
        Shape::WrappedProduct | Shape::Other => {
            return Err(FetchError::Deserialization(
                "expected a product list or product envelope".to_string(),
            ))
        }
    };
    Ok(decode_items(items))
}

/// Decode a single-product response body, bare or wrapped in `{product}`.
pub fn decode_product(body: &[u8]) -> Result<Product, FetchError> {
    let value: Value = serde_json::from_slice(body)?;
    match shape(&value) {
        Shape::WrappedProduct => {
            let wrapped: SingleProduct = serde_json::from_value(value)?;
            Ok(wrapped.product)
        }
        Shape::Other => Ok(serde_json::from_value(value)?),
        Shape::Pages | Shape::Products | Shape::Page => Err(FetchError::Deserialization(
            "expected a single product".to_string(),
        )),
    }
}

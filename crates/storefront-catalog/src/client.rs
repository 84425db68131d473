//! Catalog client contract and its HTTP implementation.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use storefront_data::{FetchClient, FetchError, HttpTransport, Transport};

use crate::catalog::{decode_product, decode_product_list, Product};
use crate::error::CatalogError;
use crate::ids::ProductId;

/// Remote calls the store depends on.
///
/// Each call issues exactly one request: no retries and no caching.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch every product, with envelopes unwrapped and pages concatenated.
    async fn fetch_all_products(&self) -> Result<Vec<Product>, FetchError>;

    /// Fetch a single product.
    async fn fetch_product_by_id(&self, id: ProductId) -> Result<Product, FetchError>;
}

#[async_trait]
impl<T: CatalogClient + ?Sized> CatalogClient for Arc<T> {
    async fn fetch_all_products(&self) -> Result<Vec<Product>, FetchError> {
        (**self).fetch_all_products().await
    }

    async fn fetch_product_by_id(&self, id: ProductId) -> Result<Product, FetchError> {
        (**self).fetch_product_by_id(id).await
    }
}

/// How the product id travels on a single-product request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductLookup {
    /// `GET {base}/products/{id}`
    #[default]
    Path,
    /// `GET {base}/product?id={id}`
    Query,
}

impl ProductLookup {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductLookup::Path => "path",
            ProductLookup::Query => "query",
        }
    }
}

impl FromStr for ProductLookup {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "path" => Ok(ProductLookup::Path),
            "query" => Ok(ProductLookup::Query),
            other => Err(CatalogError::InvalidConfig(format!(
                "product_lookup must be 'path' or 'query', got {other:?}"
            ))),
        }
    }
}

/// [`CatalogClient`] over the catalog REST API.
#[derive(Clone)]
pub struct HttpCatalogClient {
    fetch: FetchClient,
    lookup: ProductLookup,
}

impl HttpCatalogClient {
    /// Wrap a fetch client that already carries the API base URL.
    pub fn new(fetch: FetchClient, lookup: ProductLookup) -> Self {
        Self { fetch, lookup }
    }

    /// Build a client for `base_url` over the given transport.
    pub fn with_transport(
        base_url: &str,
        lookup: ProductLookup,
        transport: impl Transport + 'static,
    ) -> Result<Self, CatalogError> {
        let parsed = url::Url::parse(base_url)
            .map_err(|e| CatalogError::InvalidConfig(format!("base_url {base_url:?}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CatalogError::InvalidConfig(format!(
                "base_url {base_url:?}: unsupported scheme {}",
                parsed.scheme()
            )));
        }

        let fetch = FetchClient::new(transport)
            .with_base_url(base_url)
            .with_default_header("Accept", "application/json");
        Ok(Self::new(fetch, lookup))
    }

    /// Build a client for `base_url` over the network.
    pub fn connect(base_url: &str, lookup: ProductLookup) -> Result<Self, CatalogError> {
        Self::with_transport(base_url, lookup, HttpTransport::new())
    }

    pub fn lookup(&self) -> ProductLookup {
        self.lookup
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn fetch_all_products(&self) -> Result<Vec<Product>, FetchError> {
        let response = self.fetch.get("/products").send().await?.error_for_status()?;
        let products = decode_product_list(response.bytes())?;
        tracing::debug!(count = products.len(), "fetched product list");
        Ok(products)
    }

    async fn fetch_product_by_id(&self, id: ProductId) -> Result<Product, FetchError> {
        let request = match self.lookup {
            ProductLookup::Path => self.fetch.get(format!("/products/{id}")),
            ProductLookup::Query => self.fetch.get("/product").query("id", id),
        };
        let response = request.send().await?.error_for_status()?;
        let product = decode_product(response.bytes())?;
        tracing::debug!(%id, "fetched product");
        Ok(product)
    }
}

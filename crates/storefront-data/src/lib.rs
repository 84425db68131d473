//! HTTP fetch client for the storefront catalog.
//!
//! A small builder API over a pluggable [`Transport`]. Production code uses
//! [`HttpTransport`]; tests substitute an in-memory transport.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_data::{FetchClient, HttpTransport};
//!
//! let client = FetchClient::new(HttpTransport::new())
//!     .with_base_url("https://fakestoreapi.in/api");
//!
//! let products: serde_json::Value = client
//!     .get("/products")
//!     .send()
//!     .await?
//!     .error_for_status()?
//!     .json()?;
//! ```

mod error;
mod request;
mod response;
mod transport;

use std::collections::HashMap;
use std::sync::Arc;

pub use error::FetchError;
pub use request::{Method, Request, RequestBuilder};
pub use response::Response;
pub use transport::{HttpTransport, Transport};

/// HTTP client for making outbound requests.
///
/// Cloning is cheap: the transport is shared.
#[derive(Clone)]
pub struct FetchClient {
    transport: Arc<dyn Transport>,
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
}

impl FetchClient {
    /// Create a new HTTP client over the given transport.
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self::from_shared(Arc::new(transport))
    }

    /// Create a client over an already shared transport.
    pub fn from_shared(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            base_url: None,
            default_headers: HashMap::new(),
        }
    }

    /// Create a client with a base URL that will be prepended to relative paths.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// The configured base URL, if any.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Get, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder {
        let full_url = self.resolve(url.into());

        let mut builder = RequestBuilder::new(method, full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            transport: Arc::clone(&self.transport),
            builder,
        }
    }

    fn resolve(&self, url: String) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            return url;
        }
        match &self.base_url {
            Some(base) => format!(
                "{}/{}",
                base.trim_end_matches('/'),
                url.trim_start_matches('/')
            ),
            None => url,
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    transport: Arc<dyn Transport>,
    builder: RequestBuilder,
}

impl ClientRequestBuilder {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.builder = self.builder.query(key, value);
        self
    }

    /// Set the Accept header.
    pub fn accept(mut self, content_type: impl Into<String>) -> Self {
        self.builder = self.builder.accept(content_type);
        self
    }

    /// Send the request once and return the response.
    pub async fn send(self) -> Result<Response, FetchError> {
        let request = self.builder.build()?;
        tracing::debug!(method = request.method.as_str(), url = %request.url, "sending request");
        self.transport.send(request).await
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, HttpTransport, Method, Response, Transport};
}

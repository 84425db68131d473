//! HTTP request builder.

use crate::FetchError;
use std::collections::HashMap;
use url::Url;

/// HTTP methods used against the catalog API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
}

impl Method {
    /// Convert to HTTP method string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
        }
    }
}

/// A fully built request, ready to hand to a [`Transport`](crate::Transport).
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub headers: HashMap<String, String>,
}

/// A builder for constructing HTTP requests.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    pub(crate) method: Method,
    pub(crate) url: String,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) headers: HashMap<String, String>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            headers: HashMap::new(),
        }
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Append a query parameter. Values are percent-encoded on build.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Set the Accept header.
    pub fn accept(self, content_type: impl Into<String>) -> Self {
        self.header("Accept", content_type)
    }

    /// Parse the URL and attach query parameters.
    pub fn build(self) -> Result<Request, FetchError> {
        let mut url = Url::parse(&self.url)?;
        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.query {
                pairs.append_pair(key, value);
            }
        }

        Ok(Request {
            method: self.method,
            url,
            headers: self.headers,
        })
    }
}

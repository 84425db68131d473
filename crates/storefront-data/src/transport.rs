//! Transport seam between [`FetchClient`](crate::FetchClient) and the network.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::{FetchError, Method, Request, Response};

/// Sends a built request and returns whatever response came back.
///
/// Implementations must not retry and must not turn non-2xx statuses into
/// errors; status handling belongs to the caller.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response, FetchError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        (**self).send(request).await
    }
}

/// Production transport backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with reqwest's default client settings.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
        };

        let mut builder = self.client.request(method, request.url.clone());
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?
            .to_vec();

        tracing::trace!(url = %request.url, status, bytes = body.len(), "response received");

        Ok(Response::new(status, headers, body))
    }
}

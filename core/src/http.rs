//! HTTP transport seam.
//!
//! # Design
//! Requests and responses are plain data. `Fetcher` builds an `HttpRequest`,
//! hands it to an injected `Transport`, and classifies the `HttpResponse` it
//! gets back. Status codes are data here, not errors; only failures to obtain
//! a response at all surface as `TransportError`.
//!
//! A transport reads the whole body before returning, so the connection is
//! released before classification starts.

use async_trait::async_trait;
use url::Url;

use crate::context::Context;
use crate::error::TransportError;

/// A GET request described as plain data.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: Url,
    pub headers: Vec<(String, String)>,
}

/// A fully-read HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Executes one request. Implementations must be safe to share across tasks.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform the request. `ctx` is the request-scoped context; the caller
    /// also enforces it, so implementations may ignore it.
    async fn execute(&self, ctx: &Context, request: HttpRequest)
        -> Result<HttpResponse, TransportError>;
}

/// Production transport over a caller-supplied `reqwest::Client`.
///
/// The client is a handle onto a shared connection pool; cloning it into the
/// transport leaves the caller's handle usable.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl From<reqwest::Client> for ReqwestTransport {
    fn from(client: reqwest::Client) -> Self {
        Self::new(client)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(
        &self,
        _ctx: &Context,
        request: HttpRequest,
    ) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.get(request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse { status, body })
    }
}

//! The fetcher: one GET, bounded in time, classified into records or an error.
//!
//! # Design
//! `Fetcher` holds only immutable configuration and a shared transport handle,
//! so one instance may serve any number of concurrent calls. The operation is
//! split the same way as a host-does-IO client: `build_fetch` produces the
//! request, the transport executes it, `parse_fetch` classifies the response.
//! `fetch` wires the three together under a request-scoped `Context`.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};
use url::Url;

use crate::config::FetcherConfig;
use crate::context::Context;
use crate::error::{FetchError, TransportError};
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::types::Record;

/// Single-operation port over the remote resource.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch(&self, ctx: &Context, id: &str) -> Result<Vec<Record>, FetchError>;
}

/// Stateless client for the records resource.
///
/// Holds the base URL, the per-call timeout and a shared transport handle,
/// none of which change after construction. The transport is shared with the
/// caller and never closed by the fetcher.
#[derive(Clone)]
pub struct Fetcher {
    base_url: String,
    transport: Arc<dyn Transport>,
    timeout: Duration,
}

impl Fetcher {
    pub fn new(base_url: &str, transport: Arc<dyn Transport>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.to_string(),
            transport,
            timeout,
        }
    }

    pub fn from_config(config: &FetcherConfig, transport: Arc<dyn Transport>) -> Self {
        Self::new(&config.base_url, transport, config.timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Build the request for `id`. The id is substituted verbatim.
    pub fn build_fetch(&self, id: &str) -> Result<HttpRequest, FetchError> {
        let raw = format!("{}/?id={id}", self.base_url);
        let url = Url::parse(&raw).map_err(|source| {
            warn!(url = %raw, error = %source, "cannot build fetch request");
            TransportError::InvalidUrl { url: raw.clone(), source }
        })?;
        Ok(HttpRequest {
            url,
            headers: vec![("accept".to_string(), "application/json".to_string())],
        })
    }

    /// Classify a received response.
    pub fn parse_fetch(&self, response: HttpResponse) -> Result<Vec<Record>, FetchError> {
        if response.status == 400 {
            warn!(status = response.status, "server rejected fetch");
            return Err(FetchError::BadRequest);
        }
        match serde_json::from_slice::<Vec<Record>>(&response.body) {
            Ok(records) => {
                debug!(status = response.status, count = records.len(), "fetch succeeded");
                Ok(records)
            }
            Err(err) => {
                warn!(status = response.status, error = %err, "cannot decode fetch body");
                Err(FetchError::Decode(err))
            }
        }
    }

    /// Fetch the records for `id`, bounded by both `ctx` and the configured
    /// timeout, whichever ends first.
    pub async fn fetch(&self, ctx: &Context, id: &str) -> Result<Vec<Record>, FetchError> {
        let request = self.build_fetch(id)?;

        let scope = ctx.with_timeout(self.timeout);
        let _release = scope.release_on_drop();

        debug!(url = %request.url, timeout_ms = self.timeout.as_millis() as u64, "issuing fetch");
        let outcome = tokio::select! {
            biased;
            reason = scope.done() => Err(reason),
            result = self.transport.execute(&scope, request) => result,
        };

        let response = outcome.map_err(|err| {
            warn!(id, error = %err, "fetch transport failure");
            FetchError::Transport(err)
        })?;
        self.parse_fetch(response)
    }
}

impl fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fetcher")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl RecordSource for Fetcher {
    async fn fetch(&self, ctx: &Context, id: &str) -> Result<Vec<Record>, FetchError> {
        Fetcher::fetch(self, ctx, id).await
    }
}

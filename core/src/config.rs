//! Fetcher configuration.

use std::time::Duration;

/// Endpoint used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com/posts";

/// Per-call timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Construction parameters for a `Fetcher`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetcherConfig {
    /// Base URL of the resource (e.g., "http://localhost:3000/posts").
    pub base_url: String,
    /// Upper bound on a single fetch.
    pub timeout: Duration,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

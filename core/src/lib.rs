//! Minimal async client for a single remote posts resource.
//!
//! # Overview
//! `Fetcher` issues `GET {base_url}/?id={id}`, bounds the call by the caller's
//! `Context` and a configured timeout, and decodes the JSON array body into
//! `Record`s. Every failure is classified as a transport, bad-request or
//! decode error.
//!
//! # Design
//! - `Fetcher` is stateless; it holds configuration and a shared `Transport`.
//! - The operation is split into `build_fetch` and `parse_fetch` so the I/O
//!   boundary stays explicit and classification is testable without a network.
//! - `ReqwestTransport` is the production transport; tests substitute fakes.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use fetch_core::{Context, Fetcher, ReqwestTransport};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), fetch_core::FetchError> {
//!     let transport = Arc::new(ReqwestTransport::new(reqwest::Client::new()));
//!     let fetcher = Fetcher::new("http://localhost:3000/posts", transport, Duration::from_secs(1));
//!     let records = fetcher.fetch(&Context::background(), "1").await?;
//!     println!("{records:?}");
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod types;

pub use client::{Fetcher, RecordSource};
pub use config::FetcherConfig;
pub use context::Context;
pub use error::{ErrorKind, FetchError, TransportError};
pub use http::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use types::Record;

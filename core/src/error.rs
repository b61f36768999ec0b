//! Error types for the fetcher.
//!
//! # Design
//! Every failure collapses into one of three kinds. `BadRequest` is the only
//! sentinel: callers test for it with `is_bad_request()` or by matching
//! `ErrorKind`, never by comparing message text. `Decode` deliberately shares
//! the "Bad Request" text with `BadRequest` but not its kind.
//!
//! Display texts are the canonical HTTP reason phrases. The underlying cause
//! of a transport or decode failure is kept as the error `source()`.

use reqwest::StatusCode;
use thiserror::Error;

/// Text of the bad-request sentinel.
pub const RESPONSE_NOT_OK: &str = "response not ok";

/// Canonical reason phrase for a status code.
pub(crate) fn status_text(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("")
}

/// Discriminant used for sentinel comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    BadRequest,
    Decode,
}

/// Errors returned by `Fetcher::fetch`.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be built, sent or completed in time.
    #[error("{}", status_text(StatusCode::INTERNAL_SERVER_ERROR))]
    Transport(#[source] TransportError),

    /// The server answered 400.
    #[error("{}", status_text(StatusCode::BAD_REQUEST))]
    BadRequest,

    /// The body is not a JSON array of records.
    #[error("{}", status_text(StatusCode::BAD_REQUEST))]
    Decode(#[source] serde_json::Error),
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::Transport(_) => ErrorKind::Transport,
            FetchError::BadRequest => ErrorKind::BadRequest,
            FetchError::Decode(_) => ErrorKind::Decode,
        }
    }

    pub fn is_bad_request(&self) -> bool {
        self.kind() == ErrorKind::BadRequest
    }

    /// The sentinel text wrapped by a bad-request error, `None` otherwise.
    pub fn sentinel_message(&self) -> Option<&'static str> {
        self.is_bad_request().then_some(RESPONSE_NOT_OK)
    }
}

impl From<TransportError> for FetchError {
    fn from(err: TransportError) -> Self {
        FetchError::Transport(err)
    }
}

/// Failures before or during the network exchange.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid request url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("request cancelled")]
    Cancelled,

    #[error("deadline exceeded")]
    DeadlineExceeded,
}

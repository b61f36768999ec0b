//! Cancellation and deadline scope passed into every fetch.
//!
//! # Design
//! A `Context` pairs a `CancellationToken` with an optional deadline. Derived
//! scopes use a child token, so cancelling a parent reaches every descendant
//! while cancelling a child leaves the parent untouched. A derived deadline is
//! always the earlier of the parent's deadline and the requested bound.

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::error::TransportError;

#[derive(Debug, Clone)]
pub struct Context {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Context {
    /// A scope that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: None,
        }
    }

    /// Derive a child scope that expires after `timeout` at the latest.
    ///
    /// A timeout too large to represent as an instant adds no bound; the
    /// child keeps the parent's deadline.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self.child(),
        }
    }

    /// Derive a child scope that expires at `deadline` at the latest.
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        let deadline = match self.deadline {
            Some(parent) => parent.min(deadline),
            None => deadline,
        };
        Self {
            token: self.token.child_token(),
            deadline: Some(deadline),
        }
    }

    fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// True once the scope is cancelled or past its deadline.
    pub fn is_done(&self) -> bool {
        self.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Resolves when the scope ends, reporting why.
    pub async fn done(&self) -> TransportError {
        match self.deadline {
            Some(deadline) => tokio::select! {
                biased;
                _ = self.token.cancelled() => TransportError::Cancelled,
                _ = tokio::time::sleep_until(deadline) => TransportError::DeadlineExceeded,
            },
            None => {
                self.token.cancelled().await;
                TransportError::Cancelled
            }
        }
    }

    /// Cancels this scope when the returned guard is dropped.
    pub(crate) fn release_on_drop(&self) -> DropGuard {
        self.token.clone().drop_guard()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::background()
    }
}

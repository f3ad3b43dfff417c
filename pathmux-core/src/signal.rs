//! Cancellation and deadline signal carried by every dispatch.
//!
//! The mux and the middleware composer never look at the signal. It exists
//! so handlers and middlewares can stop work early when the caller gives up.

use crate::error::SignalError;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// A cancellation token plus an optional deadline.
///
/// Cloning a `Signal` is cheap and every clone observes the same
/// cancellation. Use [`Signal::child`] to derive a signal that can be
/// cancelled without affecting its parent.
///
/// # Example
///
/// ```rust,ignore
/// let signal = Signal::new().with_timeout(Duration::from_secs(5));
/// mux.dispatch(signal.clone(), "/jobs/run", args!["nightly"]).await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Signal {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Signal {
    /// Create a signal that is never cancelled and has no deadline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing cancellation token.
    pub fn from_token(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Set a deadline. An earlier existing deadline is kept.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(current) if current <= deadline => current,
            _ => deadline,
        });
        self
    }

    /// Set a deadline `timeout` from now.
    ///
    /// A timeout too large to represent as an instant sets no deadline.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self,
        }
    }

    /// Derive a signal that is cancelled when this one is, but can also be
    /// cancelled on its own.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    /// Cancel this signal and all of its children.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// The underlying cancellation token.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// The deadline, if one was set.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left until the deadline. `None` means no deadline.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Returns true once the signal is cancelled or its deadline has passed.
    pub fn is_cancelled(&self) -> bool {
        self.check().is_err()
    }

    /// `Ok(())` while the signal is live, otherwise the reason it is done.
    pub fn check(&self) -> Result<(), SignalError> {
        if self.token.is_cancelled() {
            return Err(SignalError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(SignalError::DeadlineExceeded),
            _ => Ok(()),
        }
    }

    /// Wait until the signal is cancelled or the deadline passes.
    pub async fn done(&self) -> SignalError {
        match self.deadline {
            Some(deadline) => tokio::select! {
                _ = self.token.cancelled() => SignalError::Cancelled,
                _ = tokio::time::sleep_until(deadline) => SignalError::DeadlineExceeded,
            },
            None => {
                self.token.cancelled().await;
                SignalError::Cancelled
            }
        }
    }
}

impl From<CancellationToken> for Signal {
    fn from(token: CancellationToken) -> Self {
        Self::from_token(token)
    }
}

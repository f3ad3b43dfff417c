//! Error types for pathmux.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`RegisterError`] - Configuration faults found while registering patterns
//! - [`DispatchError`] - Errors returned from dispatching a path
//! - [`SignalError`] - Why a dispatch signal fired
//! - [`MiddlewareError`] - Errors raised by the standard middlewares

use std::time::Duration;
use thiserror::Error;

/// A boxed error type for opaque handler errors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Configuration faults detected while registering a pattern.
///
/// These are programming errors. `ServeMux::register` panics with them;
/// `ServeMux::try_register` hands them back instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegisterError {
    /// The pattern was the empty string.
    #[error("mux: invalid pattern")]
    EmptyPattern,

    /// The pattern is already registered.
    #[error("mux: pattern {0} has already registered")]
    Duplicate(String),
}

/// Errors returned when dispatching a context.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Neither an exact nor a prefix pattern matched the path.
    #[error("mux: path mismatch: {0}")]
    PathMismatch(String),

    /// The context has no owning dispatcher to forward through.
    #[error("mux: context is not attached to a dispatcher")]
    Detached,

    /// The matched handler failed. The error is passed through untouched.
    #[error(transparent)]
    Handler(#[from] BoxError),
}

impl DispatchError {
    /// Returns true if no pattern matched the dispatched path.
    pub fn is_path_mismatch(&self) -> bool {
        matches!(self, DispatchError::PathMismatch(_))
    }

    /// Returns the handler's error, if this is a handler failure.
    pub fn handler_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            DispatchError::Handler(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

/// The reason a [`Signal`] is done.
///
/// [`Signal`]: crate::Signal
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalError {
    /// The signal was cancelled explicitly.
    #[error("dispatch cancelled")]
    Cancelled,

    /// The signal's deadline passed.
    #[error("dispatch deadline exceeded")]
    DeadlineExceeded,
}

/// Errors raised by the standard middlewares.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MiddlewareError {
    /// The wrapped chain did not finish in time.
    #[error("handler timed out after {0:?}")]
    Timeout(Duration),

    /// The context's signal fired before the wrapped chain finished.
    #[error(transparent)]
    Signal(#[from] SignalError),
}

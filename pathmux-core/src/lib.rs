//! # pathmux-core
//!
//! Core traits and types for the pathmux dispatcher.
//!
//! This crate has minimal dependencies and is meant to be imported by code
//! that writes handlers or middlewares without needing the mux itself.
//!
//! # Vocabulary
//!
//! - [`Context`] - The per-dispatch carrier: [`Signal`], path, arguments and
//!   the owning [`Dispatcher`]
//! - [`Handler`] - Application logic registered under a pattern
//! - [`Middleware`] - A transform wrapping a handler; [`compose`] defines the
//!   order in which a chain of them is applied
//! - [`Skipper`] - A predicate letting a middleware bypass itself per context
//! - [`Args`] - Opaque, ordered dispatch arguments
//!
//! # Error Types
//!
//! - [`DispatchError`] - Routing misses and handler failures
//! - [`RegisterError`] - Configuration faults
//! - [`SignalError`] / [`MiddlewareError`] - Cancellation and timeouts

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod args;
mod context;
mod dispatcher;
mod error;
mod handler;
mod message;
mod middleware;
mod signal;

// Re-exports
pub use args::Args;
pub use context::Context;
pub use dispatcher::{Dispatcher, DynDispatcher};
pub use error::{BoxError, DispatchError, MiddlewareError, RegisterError, SignalError};
pub use handler::{DynHandler, Handler, HandlerResult, SharedHandler, shared};
pub use message::Message;
pub use middleware::{Middleware, NeverSkip, SharedMiddleware, Skipper, compose};
pub use signal::Signal;

pub use tokio_util::sync::CancellationToken;

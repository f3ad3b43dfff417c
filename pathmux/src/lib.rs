//! # pathmux - Transport-Agnostic Path Dispatcher
//!
//! `pathmux` routes a string path to the handler registered under the most
//! specific matching pattern. Patterns ending in `/` match every path they
//! prefix; other patterns match only themselves. Any exact match wins, and
//! among prefix patterns the longest one wins.
//!
//! Handlers are wrapped at registration time by a global middleware chain
//! and an optional per-registration chain, so dispatching is a lookup plus
//! a single call.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pathmux::prelude::*;
//!
//! let mux = ServeMux::new();
//! mux.use_middleware(Logger::new());
//!
//! mux.register_fn("/users/", |cx: Context| async move {
//!     let name = cx.args().first::<&str>().copied().unwrap_or("anonymous");
//!     println!("{} -> {}", cx.path(), name);
//!     Ok(())
//! });
//!
//! mux.dispatch(Signal::new(), "/users/list", args!["Tom"]).await?;
//! ```
//!
//! A process-wide default instance is available under [`global`] for
//! programs that want a single implicit mux.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub mod global;

pub use pathmux_core::{
    // Arguments
    Args,
    // Errors
    BoxError,
    CancellationToken,
    // Context
    Context,
    DispatchError,
    // Dispatcher
    Dispatcher,
    DynDispatcher,
    DynHandler,
    // Handler
    Handler,
    HandlerResult,
    // Message
    Message,
    // Middleware
    Middleware,
    MiddlewareError,
    NeverSkip,
    RegisterError,
    SharedHandler,
    SharedMiddleware,
    Signal,
    SignalError,
    Skipper,
    args,
    compose,
    middlewares,
    shared,
};

// Mux
pub use pathmux_std::{
    DispatchTable, MatchKind, Route, RouteResult, ServeMux, ServeMuxBuilder,
};

/// Standard middleware implementations.
pub mod middleware {
    pub use pathmux_std::middleware::{
        Cancellable, Logger, SkipIf, StripPrefix, Timeout, Traced, strip_prefix,
    };
}

/// Testing utilities.
pub mod testing {
    pub use pathmux_std::testing::{
        CountingHandler, FailingHandler, Journal, RecordingHandler, RecordingMiddleware,
    };
}

/// Prelude module - common imports for pathmux.
///
/// # Usage
///
/// ```rust,ignore
/// use pathmux::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Errors
        BoxError,
        // Core types
        Context,
        DispatchError,
        Handler,
        HandlerResult,
        Middleware,
        RegisterError,
        ServeMux,
        SharedHandler,
        SharedMiddleware,
        Signal,
        Skipper,
        // Macros
        args,
        middleware::{Cancellable, Logger, SkipIf, StripPrefix, Timeout, Traced},
        middlewares,
    };
}

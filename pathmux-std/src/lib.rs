//! # pathmux-std
//!
//! Standard implementations for the pathmux dispatcher.
//!
//! This crate provides:
//! - **Dispatch table**: [`DispatchTable`], exact plus longest-prefix lookup
//! - **Mux**: [`ServeMux`] and its [`ServeMuxBuilder`]
//! - **Standard middlewares**: strip-prefix, logging, tracing span, timeout,
//!   cancellation and skip-if, under [`middleware`]
//! - **Testing utilities**: under [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use pathmux_core;

// Modules
pub mod middleware;
mod mux;
pub mod table;
pub mod testing;

pub use mux::{ServeMux, ServeMuxBuilder};
pub use table::{DispatchTable, MatchKind, Route, RouteResult};

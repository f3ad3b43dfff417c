//! Standard middlewares.
//!
//! - [`StripPrefix`]: rewrite the path before delegating
//! - [`Logger`]: log each dispatch through `tracing`
//! - [`Traced`]: run the chain inside a `tracing` span
//! - [`Timeout`] / [`Cancellable`]: bound the chain by time or by signal
//! - [`SkipIf`]: apply another middleware only to selected contexts

mod logger;
mod skip;
mod strip_prefix;
mod timeout;
mod traced;

pub use logger::Logger;
pub use skip::SkipIf;
pub use strip_prefix::{StripPrefix, strip_prefix};
pub use timeout::{Cancellable, Timeout};
pub use traced::Traced;

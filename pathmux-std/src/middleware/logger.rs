//! Logger - Observability for dispatched paths.

use pathmux_core::{
    Context, Handler, HandlerResult, Message, Middleware, NeverSkip, SharedHandler, Skipper,
};
use std::{fmt::Debug, sync::Arc};

/// A middleware that logs every dispatch it sees and always delegates.
///
/// Each dispatch emits one `info` event through `tracing` carrying the
/// logger's name, the path and the arguments. A [`Skipper`] can silence it
/// for selected contexts, health checks for instance.
///
/// # Example
///
/// ```rust,ignore
/// use pathmux::prelude::*;
///
/// mux.use_middleware(Logger::named("rpc"));
///
/// // Do not log health checks
/// mux.use_middleware(Logger::new().skipper(|cx: &Context| cx.path() == "/health"));
/// ```
pub struct Logger<S = NeverSkip> {
    name: &'static str,
    skipper: Arc<S>,
}

impl Logger {
    /// Create a logger named `dispatch` that logs everything.
    pub fn new() -> Self {
        Self::named("dispatch")
    }

    /// Create a logger with a custom name.
    pub fn named(name: &'static str) -> Self {
        Self {
            name,
            skipper: Arc::new(NeverSkip),
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Logger<S> {
    /// Replace the skipper.
    pub fn skipper<T>(self, skipper: T) -> Logger<T> {
        Logger {
            name: self.name,
            skipper: Arc::new(skipper),
        }
    }

    /// The name attached to every log line.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<A, S> Middleware<A> for Logger<S>
where
    A: Message + Debug,
    S: Skipper<A>,
{
    fn wrap(&self, next: SharedHandler<A>) -> SharedHandler<A> {
        Arc::new(LoggerHandler {
            name: self.name,
            skipper: Arc::clone(&self.skipper),
            next,
        })
    }
}

struct LoggerHandler<A: Message, S> {
    name: &'static str,
    skipper: Arc<S>,
    next: SharedHandler<A>,
}

impl<A, S> Handler<A> for LoggerHandler<A, S>
where
    A: Message + Debug,
    S: Skipper<A>,
{
    async fn handle(&self, cx: Context<A>) -> HandlerResult {
        if !self.skipper.skip(&cx) {
            #[cfg(feature = "tracing")]
            {
                tracing::info!(name = %self.name, path = cx.path(), args = ?cx.args(), "dispatch");
            }

            #[cfg(not(feature = "tracing"))]
            {
                let _ = self.name;
            }
        }
        self.next.handle_dyn(cx).await
    }
}

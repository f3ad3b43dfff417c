//! Skip If - Apply a middleware only to selected contexts.

use pathmux_core::{Context, Handler, HandlerResult, Message, Middleware, SharedHandler, Skipper};
use std::sync::Arc;

/// A middleware that applies `M` unless the skipper says to skip.
///
/// Skipped contexts go straight to `next`, bypassing `M` entirely.
///
/// # Example
///
/// ```rust,ignore
/// use pathmux::prelude::*;
///
/// // No timeout for long-running exports
/// let bounded = SkipIf::new(
///     |cx: &Context| cx.path().starts_with("/exports/"),
///     Timeout::secs(5),
/// );
/// mux.use_middleware(bounded);
/// ```
pub struct SkipIf<S, M> {
    skipper: Arc<S>,
    middleware: M,
}

impl<S, M> SkipIf<S, M> {
    /// Create a `SkipIf` applying `middleware` when `skipper` returns false.
    pub fn new(skipper: S, middleware: M) -> Self {
        Self {
            skipper: Arc::new(skipper),
            middleware,
        }
    }
}

impl<A, S, M> Middleware<A> for SkipIf<S, M>
where
    A: Message,
    S: Skipper<A>,
    M: Middleware<A>,
{
    fn wrap(&self, next: SharedHandler<A>) -> SharedHandler<A> {
        Arc::new(SkipIfHandler {
            skipper: Arc::clone(&self.skipper),
            wrapped: self.middleware.wrap(Arc::clone(&next)),
            next,
        })
    }
}

struct SkipIfHandler<A: Message, S> {
    skipper: Arc<S>,
    wrapped: SharedHandler<A>,
    next: SharedHandler<A>,
}

impl<A: Message, S: Skipper<A>> Handler<A> for SkipIfHandler<A, S> {
    async fn handle(&self, cx: Context<A>) -> HandlerResult {
        if self.skipper.skip(&cx) {
            self.next.handle_dyn(cx).await
        } else {
            self.wrapped.handle_dyn(cx).await
        }
    }
}

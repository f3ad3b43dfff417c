//! Traced - Run the rest of the chain inside a `tracing` span.

use pathmux_core::{Context, Handler, HandlerResult, Message, Middleware, SharedHandler};
use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::Instrument;

/// A middleware that instruments everything it wraps with a `dispatch` span.
///
/// The span carries the path and the chain name, so events emitted by inner
/// middlewares and the handler are attributed to the dispatch that caused
/// them. Without the `tracing` feature this is a pass-through.
#[derive(Debug, Clone, Copy)]
pub struct Traced {
    name: &'static str,
}

impl Traced {
    /// Create a span middleware labelled `name`.
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl Default for Traced {
    fn default() -> Self {
        Self::new("mux")
    }
}

impl<A: Message> Middleware<A> for Traced {
    fn wrap(&self, next: SharedHandler<A>) -> SharedHandler<A> {
        Arc::new(TracedHandler {
            name: self.name,
            next,
        })
    }
}

struct TracedHandler<A: Message> {
    name: &'static str,
    next: SharedHandler<A>,
}

impl<A: Message> Handler<A> for TracedHandler<A> {
    #[cfg(feature = "tracing")]
    async fn handle(&self, cx: Context<A>) -> HandlerResult {
        let span = tracing::info_span!("dispatch", chain = %self.name, path = %cx.path());
        self.next.handle_dyn(cx).instrument(span).await
    }

    #[cfg(not(feature = "tracing"))]
    async fn handle(&self, cx: Context<A>) -> HandlerResult {
        let _ = self.name;
        self.next.handle_dyn(cx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingHandler;
    use pathmux_core::{Args, SharedMiddleware, Signal, args, compose, shared};

    #[tokio::test]
    async fn test_traced_is_transparent() {
        let recorder = RecordingHandler::new();
        let layers: Vec<SharedMiddleware<Args>> = vec![Arc::new(Traced::new("api"))];
        let chain = compose(shared(recorder.clone()), &layers);

        chain
            .handle_dyn(Context::new(Signal::new(), "/a/b", args![]))
            .await
            .unwrap();

        assert_eq!(recorder.paths(), vec!["/a/b"]);
    }
}

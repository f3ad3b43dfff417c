//! Strip Prefix - Dispatch with a leading prefix removed from the path.

use pathmux_core::{Context, Handler, HandlerResult, Message, Middleware, SharedHandler};
use std::sync::Arc;

/// A middleware that removes a leading prefix from the path before
/// delegating.
///
/// Paths that do not start with the prefix are delegated unchanged, and an
/// empty prefix never rewrites anything. The derived context shares the
/// signal and arguments of the original.
///
/// # Example
///
/// ```rust,ignore
/// use pathmux::prelude::*;
///
/// // "/api/users/7" reaches the handler as "/users/7"
/// mux.register_with("/api/", users, middlewares![StripPrefix::new("/api")]);
/// ```
#[derive(Debug, Clone)]
pub struct StripPrefix {
    prefix: Arc<str>,
}

impl StripPrefix {
    /// Create a middleware stripping `prefix`.
    pub fn new(prefix: impl Into<Arc<str>>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The prefix being stripped.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

/// Shorthand for [`StripPrefix::new`].
pub fn strip_prefix(prefix: impl Into<Arc<str>>) -> StripPrefix {
    StripPrefix::new(prefix)
}

impl<A: Message> Middleware<A> for StripPrefix {
    fn wrap(&self, next: SharedHandler<A>) -> SharedHandler<A> {
        Arc::new(StripPrefixHandler {
            prefix: Arc::clone(&self.prefix),
            next,
        })
    }
}

struct StripPrefixHandler<A: Message> {
    prefix: Arc<str>,
    next: SharedHandler<A>,
}

impl<A: Message> Handler<A> for StripPrefixHandler<A> {
    async fn handle(&self, cx: Context<A>) -> HandlerResult {
        let derived = match cx.path().strip_prefix(&*self.prefix) {
            Some(rest) if !self.prefix.is_empty() => Some(cx.with_path(rest)),
            _ => None,
        };
        self.next.handle_dyn(derived.unwrap_or(cx)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingHandler;
    use pathmux_core::{Args, SharedMiddleware, Signal, args, compose, middlewares, shared};

    async fn run(prefix: &str, path: &str) -> Vec<String> {
        let recorder = RecordingHandler::new();
        let layers: Vec<SharedMiddleware<Args>> = middlewares![StripPrefix::new(prefix)];
        let chain = compose(shared(recorder.clone()), &layers);

        chain
            .handle_dyn(Context::new(Signal::new(), path, args![]))
            .await
            .unwrap();
        recorder.paths()
    }

    #[tokio::test]
    async fn test_strips_matching_prefix() {
        assert_eq!(run("/api", "/api/users").await, vec!["/users"]);
    }

    #[tokio::test]
    async fn test_leaves_other_paths_alone() {
        assert_eq!(run("/api", "/users").await, vec!["/users"]);
    }

    #[tokio::test]
    async fn test_empty_prefix_is_noop() {
        assert_eq!(run("", "/users").await, vec!["/users"]);
        assert_eq!(strip_prefix("/v1").prefix(), "/v1");
    }

    #[tokio::test]
    async fn test_whole_path_stripped() {
        assert_eq!(run("/api", "/api").await, vec![""]);
    }
}

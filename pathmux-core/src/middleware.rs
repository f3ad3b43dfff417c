//! # Middleware Composer
//!
//! A middleware transforms one handler into another. It receives `next` (the
//! handler it wraps) and returns a handler that may do work before and after
//! delegating to `next`, or skip `next` entirely to short-circuit the chain.
//!
//! # Composition Order
//!
//! [`compose`] applies layers in list order: `h = m0(h)`, then `h = m1(h)`,
//! up to `h = mk(h)`. The **last** layer ends up outermost (it runs first on
//! the way in and last on the way out) and the **first** layer sits directly
//! around the terminal handler.
//!
//! When a mux registers a handler it composes its global list first and the
//! per-registration list second, so the global chain forms the inner core and
//! the per-registration chain the outer shell:
//!
//! ```text
//! use_middleware(A); use_middleware(B);
//! register_with("/x", h, middlewares![C, D]);
//!
//! D > C > B > A > h > A < B < C < D
//! ```

use crate::{context::Context, handler::SharedHandler, message::Message};
use std::sync::Arc;

/// A transform wrapping a handler with cross-cutting behavior.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a middleware for contexts carrying `{A}`",
    label = "missing `Middleware<{A}>` implementation",
    note = "Middlewares implement `wrap`, or are closures `Fn(SharedHandler<{A}>) -> SharedHandler<{A}>`."
)]
pub trait Middleware<A: Message>: Send + Sync + 'static {
    /// Wrap `next`, returning the handler that runs in its place.
    fn wrap(&self, next: SharedHandler<A>) -> SharedHandler<A>;
}

// Blanket impl for closures
impl<A, F> Middleware<A> for F
where
    A: Message,
    F: Fn(SharedHandler<A>) -> SharedHandler<A> + Send + Sync + 'static,
{
    fn wrap(&self, next: SharedHandler<A>) -> SharedHandler<A> {
        (self)(next)
    }
}

/// A type-erased, shareable middleware.
pub type SharedMiddleware<A> = Arc<dyn Middleware<A>>;

/// Wrap `handler` with `layers`, first layer innermost.
pub fn compose<'a, A, I>(handler: SharedHandler<A>, layers: I) -> SharedHandler<A>
where
    A: Message,
    I: IntoIterator<Item = &'a SharedMiddleware<A>>,
{
    layers
        .into_iter()
        .fold(handler, |next, layer| layer.wrap(next))
}

/// Build a `Vec<SharedMiddleware<_>>` from middleware values of mixed types.
///
/// ```rust,ignore
/// mux.register_with("/admin/", admin, middlewares![Auth::new(), Logger::new()]);
/// ```
#[macro_export]
macro_rules! middlewares {
    () => {
        ::std::vec::Vec::new()
    };
    ($($middleware:expr),+ $(,)?) => {
        ::std::vec![
            $(
                ::std::sync::Arc::new($middleware) as $crate::SharedMiddleware<_>,
            )+
        ]
    };
}

/// Decides whether a middleware should bypass its own logic for a context
/// and delegate straight to `next`.
pub trait Skipper<A: Message>: Send + Sync + 'static {
    /// Returns true to skip the middleware for this context.
    fn skip(&self, cx: &Context<A>) -> bool;
}

impl<A, F> Skipper<A> for F
where
    A: Message,
    F: Fn(&Context<A>) -> bool + Send + Sync + 'static,
{
    fn skip(&self, cx: &Context<A>) -> bool {
        (self)(cx)
    }
}

/// The default skipper: never skips.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverSkip;

impl<A: Message> Skipper<A> for NeverSkip {
    fn skip(&self, _cx: &Context<A>) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        args::Args,
        error::BoxError,
        handler::{Handler, HandlerResult, shared},
        signal::Signal,
    };
    use std::sync::Mutex;

    type Log = Arc<Mutex<Vec<String>>>;

    struct Tag {
        name: &'static str,
        log: Log,
    }

    struct TagHandler {
        name: &'static str,
        log: Log,
        next: SharedHandler<Args>,
    }

    impl Handler<Args> for TagHandler {
        async fn handle(&self, cx: Context<Args>) -> HandlerResult {
            self.log.lock().unwrap().push(format!("{}>", self.name));
            let result = self.next.handle_dyn(cx).await;
            self.log.lock().unwrap().push(format!("<{}", self.name));
            result
        }
    }

    impl Middleware<Args> for Tag {
        fn wrap(&self, next: SharedHandler<Args>) -> SharedHandler<Args> {
            Arc::new(TagHandler {
                name: self.name,
                log: self.log.clone(),
                next,
            })
        }
    }

    fn terminal(log: &Log) -> SharedHandler<Args> {
        let log = log.clone();
        shared(move |_cx: Context<Args>| {
            let log = log.clone();
            async move {
                log.lock().unwrap().push("h".to_string());
                Ok::<(), BoxError>(())
            }
        })
    }

    fn cx() -> Context<Args> {
        Context::new(Signal::new(), "/x", Args::new())
    }

    #[tokio::test]
    async fn test_last_layer_is_outermost() {
        let log: Log = Arc::default();
        let layers: Vec<SharedMiddleware<Args>> = vec![
            Arc::new(Tag { name: "m0", log: log.clone() }),
            Arc::new(Tag { name: "m1", log: log.clone() }),
            Arc::new(Tag { name: "m2", log: log.clone() }),
        ];

        let chain = compose(terminal(&log), &layers);
        chain.handle_dyn(cx()).await.unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["m2>", "m1>", "m0>", "h", "<m0", "<m1", "<m2"]
        );
    }

    #[tokio::test]
    async fn test_empty_composition_is_identity() {
        let log: Log = Arc::default();
        let chain = compose(terminal(&log), &Vec::<SharedMiddleware<Args>>::new());
        chain.handle_dyn(cx()).await.unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["h"]);
    }

    #[tokio::test]
    async fn test_closure_middleware_can_short_circuit() {
        let log: Log = Arc::default();
        let deny = |_next: SharedHandler<Args>| -> SharedHandler<Args> {
            shared(|_cx: Context<Args>| async { Err::<(), BoxError>("denied".into()) })
        };
        let layers: Vec<SharedMiddleware<Args>> = middlewares![deny];

        let err = compose(terminal(&log), &layers)
            .handle_dyn(cx())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "denied");
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_skippers() {
        let cx = cx();
        assert!(!Skipper::<Args>::skip(&NeverSkip, &cx));

        let health = |cx: &Context<Args>| cx.path() == "/x";
        assert!(health.skip(&cx));
    }
}

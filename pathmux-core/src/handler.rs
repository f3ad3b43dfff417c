//! # Handler
//!
//! The unit of application logic a pattern resolves to. A handler receives the
//! dispatch [`Context`] by value and returns `Ok(())` or an opaque error.
//!
//! # Usage Patterns
//!
//! 1. **Direct closure**: `|cx: Context| async move { ... }`
//! 2. **Struct implementation**: `impl Handler<Args> for MyHandler`
//! 3. **Type-erased**: [`SharedHandler`], which is what middlewares receive
//!    as `next` and what the dispatch table stores.

use crate::{context::Context, error::BoxError, message::Message};
use futures::future::BoxFuture;
use std::{future::Future, sync::Arc};

/// What a handler returns.
pub type HandlerResult = Result<(), BoxError>;

/// A type-erased, shareable handler.
pub type SharedHandler<A> = Arc<dyn DynHandler<A>>;

/// Application logic registered under a pattern.
///
/// This trait uses native `async fn` for zero-cost static dispatch. The mux
/// stores handlers as [`DynHandler`] trait objects.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle contexts carrying `{A}`",
    label = "missing `Handler<{A}>` implementation",
    note = "Handlers must implement `handle`, or be a closure `Fn(Context<{A}>) -> impl Future<Output = HandlerResult>`."
)]
pub trait Handler<A: Message>: Send + Sync + 'static {
    /// Run the handler for one dispatch.
    fn handle(&self, cx: Context<A>) -> impl Future<Output = HandlerResult> + Send;
}

// Blanket impl for closures
impl<A, F, Fut> Handler<A> for F
where
    A: Message,
    F: Fn(Context<A>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send,
{
    fn handle(&self, cx: Context<A>) -> impl Future<Output = HandlerResult> + Send {
        (self)(cx)
    }
}

/// Object-safe version of [`Handler`].
pub trait DynHandler<A: Message>: Send + Sync + 'static {
    /// Run the handler for one dispatch (dynamic dispatch version).
    fn handle_dyn(&self, cx: Context<A>) -> BoxFuture<'_, HandlerResult>;
}

// Blanket implementation: Any type implementing Handler implements DynHandler automatically.
impl<A: Message, T: Handler<A>> DynHandler<A> for T {
    fn handle_dyn(&self, cx: Context<A>) -> BoxFuture<'_, HandlerResult> {
        Box::pin(self.handle(cx))
    }
}

/// Erase a handler into a [`SharedHandler`].
pub fn shared<A: Message, H: Handler<A>>(handler: H) -> SharedHandler<A> {
    Arc::new(handler)
}

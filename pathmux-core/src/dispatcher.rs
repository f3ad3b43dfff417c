//! Dispatcher core traits.
//!
//! A dispatcher accepts a [`Context`] and runs whatever is registered for its
//! path. The mux implements these traits and stores itself as the owner of
//! every context it creates, which is how [`Context::forward`] reaches it.

use crate::{context::Context, error::DispatchError, message::Message};
use futures::future::BoxFuture;
use std::future::Future;

/// Something that can dispatch a context.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot dispatch contexts carrying `{A}`",
    label = "missing `Dispatcher` implementation",
    note = "Implement `Dispatcher<{A}>` to handle dispatch contexts."
)]
pub trait Dispatcher<A: Message>: Send + Sync + 'static {
    /// Find the handler for the context's path and run it.
    fn dispatch_context(
        &self,
        cx: Context<A>,
    ) -> impl Future<Output = Result<(), DispatchError>> + Send;
}

/// Object-safe version of [`Dispatcher`] for dynamic dispatch.
pub trait DynDispatcher<A: Message>: Send + Sync + 'static {
    /// Find the handler for the context's path and run it.
    fn dispatch_dyn(&self, cx: Context<A>) -> BoxFuture<'_, Result<(), DispatchError>>;
}

impl<A: Message, T: Dispatcher<A>> DynDispatcher<A> for T {
    fn dispatch_dyn(&self, cx: Context<A>) -> BoxFuture<'_, Result<(), DispatchError>> {
        Box::pin(self.dispatch_context(cx))
    }
}

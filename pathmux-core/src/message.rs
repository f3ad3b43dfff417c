//! Message trait for dispatch arguments.

/// A marker trait for the argument payload carried by a [`Context`].
///
/// Payloads are shared between a context and every context derived from it,
/// so they must be `Send + Sync + 'static`. Every such type qualifies.
///
/// [`Context`]: crate::Context
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be carried as dispatch arguments",
    label = "must be `Send + Sync + 'static`",
    note = "Dispatch arguments are shared across tasks and must be thread-safe and static."
)]
pub trait Message: Send + Sync + 'static {}

impl<T: Send + Sync + 'static> Message for T {}

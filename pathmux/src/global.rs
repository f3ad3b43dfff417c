//! The process-wide default mux.
//!
//! Every function here forwards to one lazily created [`ServeMux`] over
//! [`Args`]. Semantics are identical to the methods of the same name; prefer
//! passing an explicit `ServeMux` around where that is practical.
//!
//! ```rust,ignore
//! pathmux::global::register_fn("/ping", |_cx| async { Ok(()) });
//! pathmux::global::dispatch(Signal::new(), "/ping", args![]).await?;
//! ```

use pathmux_core::{
    Args, Context, DispatchError, Handler, HandlerResult, Middleware, RegisterError,
    SharedMiddleware, Signal,
};
use pathmux_std::ServeMux;
use std::{
    future::Future,
    sync::{Arc, LazyLock},
};

static DEFAULT_MUX: LazyLock<ServeMux> = LazyLock::new(ServeMux::new);

/// The default mux. Clones share its table.
pub fn default_mux() -> &'static ServeMux {
    &DEFAULT_MUX
}

/// Append a middleware to the default mux's global chain.
pub fn use_middleware<M: Middleware<Args>>(middleware: M) {
    DEFAULT_MUX.use_middleware(middleware);
}

/// Register `handler` under `pattern` on the default mux.
///
/// # Panics
///
/// Panics if `pattern` is empty or already registered.
pub fn register<H: Handler<Args>>(pattern: &str, handler: H) {
    DEFAULT_MUX.register(pattern, handler);
}

/// Register `handler` with per-registration middlewares on the default mux.
///
/// # Panics
///
/// Panics if `pattern` is empty or already registered.
pub fn register_with<H, I>(pattern: &str, handler: H, middlewares: I)
where
    H: Handler<Args>,
    I: IntoIterator<Item = SharedMiddleware<Args>>,
{
    DEFAULT_MUX.register_with(pattern, handler, middlewares);
}

/// Register a closure under `pattern` on the default mux.
///
/// # Panics
///
/// Panics if `pattern` is empty or already registered.
pub fn register_fn<F, Fut>(pattern: &str, f: F)
where
    F: Fn(Context<Args>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send,
{
    DEFAULT_MUX.register_fn(pattern, f);
}

/// Register `handler` on the default mux, reporting configuration faults.
pub fn try_register<H: Handler<Args>>(pattern: &str, handler: H) -> Result<(), RegisterError> {
    DEFAULT_MUX.try_register(pattern, handler)
}

/// Remove `pattern` from the default mux. Returns whether it was registered.
pub fn unregister(pattern: &str) -> bool {
    DEFAULT_MUX.unregister(pattern)
}

/// Handle a context with the default mux.
pub async fn handle(cx: Context<Args>) -> Result<(), DispatchError> {
    DEFAULT_MUX.handle(cx).await
}

/// Dispatch `path` through the default mux.
pub async fn dispatch(
    signal: Signal,
    path: impl Into<Arc<str>>,
    args: Args,
) -> Result<(), DispatchError> {
    DEFAULT_MUX.dispatch(signal, path, args).await
}

/// Create a context owned by the default mux.
pub fn borrow_context(signal: Signal, path: impl Into<Arc<str>>, args: Args) -> Context<Args> {
    DEFAULT_MUX.borrow_context(signal, path, args)
}

/// Release a context obtained from [`borrow_context`].
pub fn return_context(cx: Context<Args>) {
    DEFAULT_MUX.return_context(cx);
}

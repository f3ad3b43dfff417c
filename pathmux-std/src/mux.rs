//! The mux: registration, unregistration and dispatch over a [`DispatchTable`].
//!
//! `ServeMux` is a cheap handle around shared state. Clones refer to the same
//! table, so a mux can be built once at startup and handed to every transport
//! that feeds it paths.
//!
//! # Example
//!
//! ```rust,ignore
//! use pathmux::prelude::*;
//!
//! let mux = ServeMux::new();
//! mux.use_middleware(Logger::new());
//!
//! mux.register_fn("/users/", |cx: Context| async move {
//!     println!("user route: {}", cx.path());
//!     Ok(())
//! });
//!
//! mux.dispatch(Signal::new(), "/users/42", args!["hi"]).await?;
//! ```

use crate::table::{DEFAULT_SEPARATOR, DispatchTable};
use parking_lot::RwLock;
use pathmux_core::{
    Args, Context, DispatchError, Dispatcher, Handler, HandlerResult, Message, Middleware,
    RegisterError, SharedHandler, SharedMiddleware, Signal, compose, shared,
};
use std::{fmt, future::Future, sync::Arc};

struct State<A: Message> {
    table: DispatchTable<SharedHandler<A>>,
    middlewares: Vec<SharedMiddleware<A>>,
}

struct Inner<A: Message> {
    // One lock for both indices and the global chain.
    state: RwLock<State<A>>,
}

impl<A: Message> Inner<A> {
    fn handler(&self, path: &str) -> Option<SharedHandler<A>> {
        let state = self.state.read();
        state
            .table
            .lookup(path)
            .matched()
            .map(|route| Arc::clone(route.handler))
    }

    async fn handle(&self, cx: Context<A>) -> Result<(), DispatchError> {
        let Some(handler) = self.handler(cx.path()) else {
            #[cfg(feature = "tracing")]
            tracing::trace!(path = cx.path(), "no handler matched");
            return Err(DispatchError::PathMismatch(cx.path().to_owned()));
        };
        handler.handle_dyn(cx).await.map_err(DispatchError::Handler)
    }
}

impl<A: Message> Dispatcher<A> for Inner<A> {
    async fn dispatch_context(&self, cx: Context<A>) -> Result<(), DispatchError> {
        self.handle(cx).await
    }
}

/// Routes dispatched paths to registered handlers.
///
/// `A` is the argument payload carried by every [`Context`]; it defaults to
/// the opaque [`Args`] list.
pub struct ServeMux<A: Message = Args> {
    inner: Arc<Inner<A>>,
}

impl<A: Message> Clone for ServeMux<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: Message> Default for ServeMux<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Message> fmt::Debug for ServeMux<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.read();
        f.debug_struct("ServeMux")
            .field("separator", &state.table.separator())
            .field("patterns", &state.table.patterns())
            .field("middlewares", &state.middlewares.len())
            .finish()
    }
}

impl<A: Message> ServeMux<A> {
    /// Create an empty mux using `/` as separator.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start configuring a mux.
    pub fn builder() -> ServeMuxBuilder<A> {
        ServeMuxBuilder::default()
    }

    /// The separator that marks prefix patterns.
    pub fn separator(&self) -> char {
        self.inner.state.read().table.separator()
    }

    /// Append a middleware to the global chain.
    ///
    /// Only handlers registered afterwards are wrapped by it.
    pub fn use_middleware<M: Middleware<A>>(&self, middleware: M) {
        self.use_middlewares([Arc::new(middleware) as SharedMiddleware<A>]);
    }

    /// Append several middlewares to the global chain, in order.
    pub fn use_middlewares<I>(&self, middlewares: I)
    where
        I: IntoIterator<Item = SharedMiddleware<A>>,
    {
        self.inner.state.write().middlewares.extend(middlewares);
    }

    /// Number of middlewares in the global chain.
    pub fn middleware_count(&self) -> usize {
        self.inner.state.read().middlewares.len()
    }

    /// Register `handler` under `pattern`.
    ///
    /// # Panics
    ///
    /// Panics if `pattern` is empty or already registered. The existing
    /// registration stays in effect.
    pub fn register<H: Handler<A>>(&self, pattern: &str, handler: H) {
        self.register_with(pattern, handler, Vec::new());
    }

    /// Register `handler` under `pattern`, wrapped in `middlewares` on top
    /// of the global chain.
    ///
    /// # Panics
    ///
    /// Panics if `pattern` is empty or already registered.
    pub fn register_with<H, I>(&self, pattern: &str, handler: H, middlewares: I)
    where
        H: Handler<A>,
        I: IntoIterator<Item = SharedMiddleware<A>>,
    {
        if let Err(err) = self.try_register_with(pattern, handler, middlewares) {
            panic!("{err}");
        }
    }

    /// Register a closure under `pattern`.
    ///
    /// # Panics
    ///
    /// Panics if `pattern` is empty or already registered.
    pub fn register_fn<F, Fut>(&self, pattern: &str, f: F)
    where
        F: Fn(Context<A>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send,
    {
        self.register(pattern, f);
    }

    /// Register a closure under `pattern` with per-registration middlewares.
    ///
    /// # Panics
    ///
    /// Panics if `pattern` is empty or already registered.
    pub fn register_fn_with<F, Fut, I>(&self, pattern: &str, f: F, middlewares: I)
    where
        F: Fn(Context<A>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send,
        I: IntoIterator<Item = SharedMiddleware<A>>,
    {
        self.register_with(pattern, f, middlewares);
    }

    /// Register `handler` under `pattern`, reporting configuration faults.
    pub fn try_register<H: Handler<A>>(
        &self,
        pattern: &str,
        handler: H,
    ) -> Result<(), RegisterError> {
        self.try_register_with(pattern, handler, Vec::new())
    }

    /// Register `handler` under `pattern` with per-registration middlewares,
    /// reporting configuration faults.
    ///
    /// The handler is wrapped by the global chain first and `middlewares`
    /// second, so the last entry of `middlewares` is the outermost layer.
    pub fn try_register_with<H, I>(
        &self,
        pattern: &str,
        handler: H,
        middlewares: I,
    ) -> Result<(), RegisterError>
    where
        H: Handler<A>,
        I: IntoIterator<Item = SharedMiddleware<A>>,
    {
        let extra: Vec<SharedMiddleware<A>> = middlewares.into_iter().collect();

        // No guard may be held while `wrap` runs; it can call back into the mux.
        let global = {
            let state = self.inner.state.read();
            state.table.check(pattern)?;
            state.middlewares.clone()
        };
        let wrapped = compose(shared(handler), global.iter().chain(&extra));

        let mut state = self.inner.state.write();
        state.table.insert(pattern, wrapped)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            pattern,
            prefix = state.table.is_prefix_pattern(pattern),
            layers = global.len() + extra.len(),
            "registered handler"
        );
        Ok(())
    }

    /// Remove the handler registered under `pattern`.
    ///
    /// Unknown patterns are ignored. Returns whether a handler was removed.
    pub fn unregister(&self, pattern: &str) -> bool {
        let removed = self.inner.state.write().table.remove(pattern).is_some();

        #[cfg(feature = "tracing")]
        {
            if removed {
                tracing::debug!(pattern, "unregistered handler");
            }
        }
        removed
    }

    /// Returns true if `pattern` is registered.
    pub fn contains(&self, pattern: &str) -> bool {
        self.inner.state.read().table.contains(pattern)
    }

    /// Number of registered patterns.
    pub fn len(&self) -> usize {
        self.inner.state.read().table.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.inner.state.read().table.is_empty()
    }

    /// All registered patterns, sorted.
    pub fn patterns(&self) -> Vec<String> {
        let state = self.inner.state.read();
        state.table.patterns().into_iter().map(str::to_owned).collect()
    }

    /// The wrapped handler `path` would be dispatched to.
    pub fn handler(&self, path: &str) -> Option<SharedHandler<A>> {
        self.inner.handler(path)
    }

    /// Run the handler matching the context's path.
    ///
    /// Returns [`DispatchError::PathMismatch`] when nothing matches, otherwise
    /// whatever the handler chain returned.
    pub async fn handle(&self, cx: Context<A>) -> Result<(), DispatchError> {
        self.inner.handle(cx).await
    }

    /// Build a context for `path`, handle it and release it.
    pub async fn dispatch(
        &self,
        signal: Signal,
        path: impl Into<Arc<str>>,
        args: A,
    ) -> Result<(), DispatchError> {
        let cx = self.borrow_context(signal, path, args);
        self.inner.handle(cx).await
    }

    /// Create a context owned by this mux.
    pub fn borrow_context(&self, signal: Signal, path: impl Into<Arc<str>>, args: A) -> Context<A> {
        Context::new(signal, path, args).with_owner(self.inner.clone())
    }

    /// Release a context obtained from [`borrow_context`](Self::borrow_context).
    ///
    /// The context is consumed; nothing is pooled.
    pub fn return_context(&self, cx: Context<A>) {
        drop(cx);
    }
}

impl<A: Message> Dispatcher<A> for ServeMux<A> {
    async fn dispatch_context(&self, cx: Context<A>) -> Result<(), DispatchError> {
        self.inner.handle(cx).await
    }
}

/// Builder for [`ServeMux`].
pub struct ServeMuxBuilder<A: Message = Args> {
    separator: char,
    middlewares: Vec<SharedMiddleware<A>>,
}

impl<A: Message> Default for ServeMuxBuilder<A> {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            middlewares: Vec::new(),
        }
    }
}

impl<A: Message> ServeMuxBuilder<A> {
    /// Use `separator` instead of `/` to mark prefix patterns.
    ///
    /// A pub/sub bridge might use `.` so that `orders.` catches `orders.created`.
    pub fn separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Append a middleware to the initial global chain.
    pub fn middleware<M: Middleware<A>>(mut self, middleware: M) -> Self {
        self.middlewares.push(Arc::new(middleware));
        self
    }

    /// Build the mux.
    pub fn build(self) -> ServeMux<A> {
        ServeMux {
            inner: Arc::new(Inner {
                state: RwLock::new(State {
                    table: DispatchTable::with_separator(self.separator),
                    middlewares: self.middlewares,
                }),
            }),
        }
    }
}

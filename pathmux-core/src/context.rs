//! # Dispatch Context
//!
//! The per-call carrier handed to every handler and middleware: the
//! cancellation [`Signal`], the path being dispatched, the opaque arguments
//! and a back-reference to the dispatcher that owns the call.
//!
//! Contexts are values. Rewriting the path (see [`Context::with_path`])
//! produces a fresh context that shares the arguments; the original is never
//! mutated, so a middleware can hand a derived context down the chain while
//! still holding its own.

use crate::{
    args::Args,
    dispatcher::DynDispatcher,
    error::DispatchError,
    message::Message,
    signal::Signal,
};
use std::{fmt, sync::Arc};

/// The dispatch context.
///
/// `A` is the argument payload; it defaults to the opaque [`Args`] list.
pub struct Context<A: Message = Args> {
    signal: Signal,
    path: Arc<str>,
    args: Arc<A>,
    owner: Option<Arc<dyn DynDispatcher<A>>>,
}

impl<A: Message> Context<A> {
    /// Create a context that is not attached to any dispatcher.
    pub fn new(signal: Signal, path: impl Into<Arc<str>>, args: A) -> Self {
        Self::from_shared(signal, path, Arc::new(args))
    }

    /// Create a context over already shared arguments.
    pub fn from_shared(signal: Signal, path: impl Into<Arc<str>>, args: Arc<A>) -> Self {
        Self {
            signal,
            path: path.into(),
            args,
            owner: None,
        }
    }

    /// The cancellation signal.
    pub fn signal(&self) -> &Signal {
        &self.signal
    }

    /// The path being dispatched.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The dispatch arguments.
    pub fn args(&self) -> &A {
        &self.args
    }

    /// The shared handle to the arguments.
    pub fn shared_args(&self) -> &Arc<A> {
        &self.args
    }

    /// The dispatcher that owns this call, if any.
    pub fn owner(&self) -> Option<&Arc<dyn DynDispatcher<A>>> {
        self.owner.as_ref()
    }

    /// A new context with `path` in place of the current path.
    ///
    /// The signal, arguments and owner are shared with `self`.
    pub fn with_path(&self, path: impl Into<Arc<str>>) -> Self {
        Self {
            signal: self.signal.clone(),
            path: path.into(),
            args: Arc::clone(&self.args),
            owner: self.owner.clone(),
        }
    }

    /// A new context with `signal` in place of the current signal.
    pub fn with_signal(&self, signal: Signal) -> Self {
        Self {
            signal,
            path: Arc::clone(&self.path),
            args: Arc::clone(&self.args),
            owner: self.owner.clone(),
        }
    }

    /// Attach the context to an owning dispatcher.
    pub fn with_owner(mut self, owner: Arc<dyn DynDispatcher<A>>) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Dispatch a derived context with `path` through the owning dispatcher.
    ///
    /// Fails with [`DispatchError::Detached`] when the context has no owner.
    pub async fn forward(&self, path: impl Into<Arc<str>>) -> Result<(), DispatchError> {
        let Some(owner) = self.owner.clone() else {
            return Err(DispatchError::Detached);
        };
        owner.dispatch_dyn(self.with_path(path)).await
    }
}

impl<A: Message> Clone for Context<A> {
    fn clone(&self) -> Self {
        self.with_path(Arc::clone(&self.path))
    }
}

impl<A: Message + fmt::Debug> fmt::Debug for Context<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("path", &self.path)
            .field("args", &self.args)
            .field("signal", &self.signal)
            .field("attached", &self.owner.is_some())
            .finish()
    }
}

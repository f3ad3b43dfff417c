//! Testing utilities for pathmux.
//!
//! This module provides handlers and middlewares that record what happened
//! to a dispatch, so tests can assert on routing and middleware order.
//!
//! # Features
//!
//! - [`Journal`]: A shared, ordered log of entries
//! - [`RecordingMiddleware`]: Logs `name>` before and `<name` after the chain
//! - [`RecordingHandler`]: Records every path it is dispatched with
//! - [`CountingHandler`]: Counts invocations
//! - [`FailingHandler`]: Always fails with a fixed message

use parking_lot::Mutex;
use pathmux_core::{Context, Handler, HandlerResult, Message, Middleware, SharedHandler};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Journal
// ============================================================================

/// A shared, ordered log. Clones append to the same log.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Arc<Mutex<Vec<String>>>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn push(&self, entry: impl Into<String>) {
        self.entries.lock().push(entry.into());
    }

    /// A copy of all entries so far.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    /// Returns true if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Remove all entries.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

// ============================================================================
// Recording Middleware
// ============================================================================

/// A middleware that writes `name>` to a [`Journal`] before calling the
/// chain and `<name` after it returns.
///
/// # Example
///
/// ```rust,ignore
/// let journal = Journal::new();
/// mux.use_middleware(RecordingMiddleware::new("A", journal.clone()));
/// mux.register("/x", RecordingHandler::with_journal("h", journal.clone()));
///
/// mux.dispatch(Signal::new(), "/x", args![]).await?;
/// assert_eq!(journal.entries(), vec!["A>", "h", "<A"]);
/// ```
#[derive(Debug, Clone)]
pub struct RecordingMiddleware {
    name: &'static str,
    journal: Journal,
}

impl RecordingMiddleware {
    /// Create a recording middleware.
    pub fn new(name: &'static str, journal: Journal) -> Self {
        Self { name, journal }
    }
}

impl<A: Message> Middleware<A> for RecordingMiddleware {
    fn wrap(&self, next: SharedHandler<A>) -> SharedHandler<A> {
        Arc::new(RecordingLayer {
            name: self.name,
            journal: self.journal.clone(),
            next,
        })
    }
}

struct RecordingLayer<A: Message> {
    name: &'static str,
    journal: Journal,
    next: SharedHandler<A>,
}

impl<A: Message> Handler<A> for RecordingLayer<A> {
    async fn handle(&self, cx: Context<A>) -> HandlerResult {
        self.journal.push(format!("{}>", self.name));
        let result = self.next.handle_dyn(cx).await;
        self.journal.push(format!("<{}", self.name));
        result
    }
}

// ============================================================================
// Recording Handler
// ============================================================================

/// A handler that records the path of every context it receives.
///
/// When built with [`with_journal`](Self::with_journal) it also writes its
/// name to the journal, which places it among middleware entries.
#[derive(Debug, Clone, Default)]
pub struct RecordingHandler {
    paths: Arc<Mutex<Vec<String>>>,
    journal: Option<(&'static str, Journal)>,
}

impl RecordingHandler {
    /// Create a recording handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recording handler that also logs `name` to `journal`.
    pub fn with_journal(name: &'static str, journal: Journal) -> Self {
        Self {
            paths: Arc::default(),
            journal: Some((name, journal)),
        }
    }

    /// Paths seen so far, in order.
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().clone()
    }

    /// Number of invocations.
    pub fn count(&self) -> usize {
        self.paths.lock().len()
    }
}

impl<A: Message> Handler<A> for RecordingHandler {
    async fn handle(&self, cx: Context<A>) -> HandlerResult {
        self.paths.lock().push(cx.path().to_owned());
        if let Some((name, journal)) = &self.journal {
            journal.push(*name);
        }
        Ok(())
    }
}

// ============================================================================
// Counting Handler
// ============================================================================

/// A handler that counts invocations.
///
/// # Example
///
/// ```rust,ignore
/// let counter = CountingHandler::new();
/// mux.register("/ping", counter.clone());
///
/// mux.dispatch(Signal::new(), "/ping", args![]).await?;
/// assert_eq!(counter.count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CountingHandler {
    count: Arc<AtomicUsize>,
}

impl CountingHandler {
    /// Create a new counting handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl<A: Message> Handler<A> for CountingHandler {
    async fn handle(&self, _cx: Context<A>) -> HandlerResult {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// Failing Handler
// ============================================================================

/// A handler that always fails with the same message.
#[derive(Debug, Clone)]
pub struct FailingHandler {
    message: Arc<str>,
}

impl FailingHandler {
    /// Create a handler failing with `message`.
    pub fn new(message: impl Into<Arc<str>>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl<A: Message> Handler<A> for FailingHandler {
    async fn handle(&self, _cx: Context<A>) -> HandlerResult {
        Err(self.message.to_string().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathmux_core::{Args, SharedMiddleware, Signal, args, compose, shared};

    #[tokio::test]
    async fn test_recording_chain() {
        let journal = Journal::new();
        let handler = RecordingHandler::with_journal("h", journal.clone());
        let layers: Vec<SharedMiddleware<Args>> = vec![
            Arc::new(RecordingMiddleware::new("a", journal.clone())),
            Arc::new(RecordingMiddleware::new("b", journal.clone())),
        ];

        compose(shared(handler.clone()), &layers)
            .handle_dyn(Context::new(Signal::new(), "/p", args![]))
            .await
            .unwrap();

        assert_eq!(journal.entries(), vec!["b>", "a>", "h", "<a", "<b"]);
        assert_eq!(handler.paths(), vec!["/p"]);

        journal.clear();
        assert!(journal.is_empty());
    }

    #[tokio::test]
    async fn test_counting_and_failing() {
        let counter = CountingHandler::new();
        Handler::<Args>::handle(&counter, Context::new(Signal::new(), "/", args![]))
            .await
            .unwrap();
        assert_eq!(counter.count(), 1);
        counter.reset();
        assert_eq!(counter.count(), 0);

        let err = Handler::<Args>::handle(
            &FailingHandler::new("broken"),
            Context::new(Signal::new(), "/", args![]),
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "broken");
    }
}

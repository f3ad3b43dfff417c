//! Timeout and cancellation for the rest of the chain.

use pathmux_core::{
    BoxError, Context, Handler, HandlerResult, Message, Middleware, MiddlewareError,
    SharedHandler,
};
use std::{sync::Arc, time::Duration};

/// A middleware that bounds how long the rest of the chain may run.
///
/// The chain fails with [`MiddlewareError::Timeout`] when it exceeds the
/// duration, and with [`MiddlewareError::Signal`] when the context's signal
/// fires first. Either way the inner future is dropped.
#[derive(Debug, Clone, Copy)]
pub struct Timeout {
    duration: Duration,
}

impl Timeout {
    /// Create a timeout middleware.
    pub const fn new(duration: Duration) -> Self {
        Self { duration }
    }

    /// Create a timeout of `secs` seconds.
    pub const fn secs(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    /// Create a timeout of `millis` milliseconds.
    pub const fn millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// The configured duration.
    pub const fn duration(&self) -> Duration {
        self.duration
    }
}

impl<A: Message> Middleware<A> for Timeout {
    fn wrap(&self, next: SharedHandler<A>) -> SharedHandler<A> {
        Arc::new(TimeoutHandler {
            duration: self.duration,
            next,
        })
    }
}

struct TimeoutHandler<A: Message> {
    duration: Duration,
    next: SharedHandler<A>,
}

impl<A: Message> Handler<A> for TimeoutHandler<A> {
    async fn handle(&self, cx: Context<A>) -> HandlerResult {
        let signal = cx.signal().clone();
        tokio::select! {
            result = tokio::time::timeout(self.duration, self.next.handle_dyn(cx)) => match result {
                Ok(result) => result,
                Err(_) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(timeout = ?self.duration, "handler timed out");
                    Err(BoxError::from(MiddlewareError::Timeout(self.duration)))
                }
            },
            reason = signal.done() => Err(BoxError::from(MiddlewareError::Signal(reason))),
        }
    }
}

/// A middleware that honors the context's [`Signal`].
///
/// A context whose signal already fired never reaches the chain. A signal
/// firing mid-flight drops the chain and fails with
/// [`MiddlewareError::Signal`].
///
/// [`Signal`]: pathmux_core::Signal
#[derive(Debug, Clone, Copy, Default)]
pub struct Cancellable;

impl<A: Message> Middleware<A> for Cancellable {
    fn wrap(&self, next: SharedHandler<A>) -> SharedHandler<A> {
        Arc::new(CancellableHandler { next })
    }
}

struct CancellableHandler<A: Message> {
    next: SharedHandler<A>,
}

impl<A: Message> Handler<A> for CancellableHandler<A> {
    async fn handle(&self, cx: Context<A>) -> HandlerResult {
        let signal = cx.signal().clone();
        signal.check().map_err(MiddlewareError::from)?;

        tokio::select! {
            result = self.next.handle_dyn(cx) => result,
            reason = signal.done() => Err(BoxError::from(MiddlewareError::Signal(reason))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CountingHandler;
    use pathmux_core::{Args, SharedMiddleware, Signal, SignalError, args, compose, shared};

    fn sleeper(delay: Duration) -> SharedHandler<Args> {
        shared(move |_cx: Context<Args>| async move {
            tokio::time::sleep(delay).await;
            Ok::<(), BoxError>(())
        })
    }

    fn middleware_error(err: &BoxError) -> Option<&MiddlewareError> {
        err.downcast_ref::<MiddlewareError>()
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_fires() {
        let layers: Vec<SharedMiddleware<Args>> = vec![Arc::new(Timeout::millis(50))];
        let chain = compose(sleeper(Duration::from_secs(1)), &layers);

        let err = chain
            .handle_dyn(Context::new(Signal::new(), "/slow", args![]))
            .await
            .unwrap_err();

        assert_eq!(
            middleware_error(&err),
            Some(&MiddlewareError::Timeout(Duration::from_millis(50)))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_lets_fast_chain_finish() {
        let layers: Vec<SharedMiddleware<Args>> = vec![Arc::new(Timeout::secs(1))];
        let chain = compose(sleeper(Duration::from_millis(10)), &layers);

        chain
            .handle_dyn(Context::new(Signal::new(), "/fast", args![]))
            .await
            .unwrap();
        assert_eq!(Timeout::secs(1).duration(), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_reports_signal_deadline_first() {
        let layers: Vec<SharedMiddleware<Args>> = vec![Arc::new(Timeout::secs(10))];
        let chain = compose(sleeper(Duration::from_secs(60)), &layers);
        let signal = Signal::new().with_timeout(Duration::from_millis(20));

        let err = chain
            .handle_dyn(Context::new(signal, "/slow", args![]))
            .await
            .unwrap_err();

        assert_eq!(
            middleware_error(&err),
            Some(&MiddlewareError::Signal(SignalError::DeadlineExceeded))
        );
    }

    #[tokio::test]
    async fn test_cancellable_refuses_cancelled_context() {
        let counter = CountingHandler::new();
        let layers: Vec<SharedMiddleware<Args>> = vec![Arc::new(Cancellable)];
        let chain = compose(shared(counter.clone()), &layers);
        let signal = Signal::new();
        signal.cancel();

        let err = chain
            .handle_dyn(Context::new(signal, "/x", args![]))
            .await
            .unwrap_err();

        assert_eq!(
            middleware_error(&err),
            Some(&MiddlewareError::Signal(SignalError::Cancelled))
        );
        assert_eq!(counter.count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellable_aborts_in_flight() {
        let layers: Vec<SharedMiddleware<Args>> = vec![Arc::new(Cancellable)];
        let chain = compose(sleeper(Duration::from_secs(60)), &layers);
        let signal = Signal::new();

        let canceller = signal.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            canceller.cancel();
        });

        let err = chain
            .handle_dyn(Context::new(signal, "/x", args![]))
            .await
            .unwrap_err();
        assert_eq!(
            middleware_error(&err),
            Some(&MiddlewareError::Signal(SignalError::Cancelled))
        );
    }

    #[tokio::test]
    async fn test_cancellable_passes_live_context() {
        let counter = CountingHandler::new();
        let layers: Vec<SharedMiddleware<Args>> = vec![Arc::new(Cancellable)];
        let chain = compose(shared(counter.clone()), &layers);

        chain
            .handle_dyn(Context::new(Signal::new(), "/x", args![]))
            .await
            .unwrap();
        assert_eq!(counter.count(), 1);
    }
}

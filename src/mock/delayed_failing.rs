#![allow(clippy::must_use_candidate)]

//! A recorder that waits before it either succeeds or fails.

use std::fmt::Debug;
use std::time::Duration;

use super::FailureInjectingRecorder;
use crate::clock::DelayTimer;
use crate::error::InjectedFailure;

/// Wraps a [`FailureInjectingRecorder`] behind a delay.
///
/// Unlike [`DelayedRecorder`](super::DelayedRecorder), nothing is recorded
/// until the delay has elapsed: the wait comes first, then the call is
/// recorded, observers fire, and the configured value or error is returned.
/// This models a round trip where even the failure arrives late.
///
/// Dropping the future before the delay elapses abandons the call and it is
/// never recorded. [`interrupt_delay`](Self::interrupt_delay) instead cuts the
/// wait short and lets the call complete.
pub struct DelayedFailureInjectingRecorder<I, O, E = InjectedFailure> {
    recorder: FailureInjectingRecorder<I, O, E>,
    timer: DelayTimer,
}

impl<I, O, E> DelayedFailureInjectingRecorder<I, O, E>
where
    I: Clone,
    O: Clone,
    E: Clone,
{
    /// Create a recorder that succeeds with `return_value` and no delay.
    pub fn new(return_value: O) -> Self {
        Self {
            recorder: FailureInjectingRecorder::new(return_value),
            timer: DelayTimer::new(),
        }
    }

    /// Set the initial delay.
    #[must_use]
    pub fn with_delay(self, delay: Duration) -> Self {
        self.timer.set_delay(delay);
        self
    }

    /// Start out failing with `error`.
    #[must_use]
    pub fn with_error(self, error: E) -> Self {
        self.recorder.set_error(Some(error));
        self
    }

    /// Wait out the delay, then record the call and resolve it.
    ///
    /// # Errors
    ///
    /// Returns the configured error, if any, once the delay has elapsed.
    pub async fn record(&self, input: I) -> Result<O, E> {
        self.timer.wait().await;
        self.recorder.record(input)
    }

    /// Set the error raised by future calls, or clear it with `None`.
    pub fn set_error(&self, error: Option<E>) {
        self.recorder.set_error(error);
    }

    /// The error future calls will raise, if any.
    pub fn error(&self) -> Option<E> {
        self.recorder.error()
    }

    /// Replace the delay applied to future calls.
    pub fn set_delay(&self, delay: Duration) {
        self.timer.set_delay(delay);
    }

    /// Replace the delay, given in seconds.
    ///
    /// # Panics
    ///
    /// Panics if `seconds` is negative, NaN or infinite.
    pub fn set_delay_secs(&self, seconds: f64) {
        self.timer.set_delay_secs(seconds);
    }

    /// The delay applied to future calls.
    pub fn delay(&self) -> Duration {
        self.timer.delay()
    }

    /// Cut short every call currently waiting out its delay.
    ///
    /// Interrupted calls go on to record and resolve as usual.
    pub fn interrupt_delay(&self) {
        self.timer.interrupt();
    }

    /// Number of calls currently waiting out their delay, not yet recorded.
    pub fn pending_calls(&self) -> usize {
        self.timer.pending_waits()
    }

    /// Replace the value returned by future successful calls.
    pub fn set_return_value(&self, value: O) {
        self.recorder.set_return_value(value);
    }

    /// Register a callback invoked with the input of every future call.
    pub fn add_observer<F>(&self, observer: F)
    where
        F: Fn(&I) + Send + Sync + 'static,
    {
        self.recorder.add_observer(observer);
    }

    /// Register a callback invoked on every future call, ignoring its input.
    pub fn add_call_observer<F>(&self, observer: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.recorder.add_call_observer(observer);
    }

    /// The value the next successful call will return.
    pub fn return_value(&self) -> O {
        self.recorder.return_value()
    }

    /// All recorded inputs, failed calls included.
    pub fn spies(&self) -> Vec<I> {
        self.recorder.spies()
    }

    /// Get the number of recorded calls.
    pub fn call_count(&self) -> usize {
        self.recorder.call_count()
    }

    /// Check if at least one call was recorded.
    pub fn was_called(&self) -> bool {
        self.recorder.was_called()
    }

    /// The wrapped failure-injecting recorder.
    pub fn recorder(&self) -> &FailureInjectingRecorder<I, O, E> {
        &self.recorder
    }
}

impl<O: Clone, E: Clone> DelayedFailureInjectingRecorder<(), O, E> {
    /// Record a call that carries no input.
    ///
    /// # Errors
    ///
    /// Returns the configured error, if any, once the delay has elapsed.
    pub async fn record_no_args(&self) -> Result<O, E> {
        self.record(()).await
    }
}

impl<I: Clone, O: Clone + Default, E: Clone> Default for DelayedFailureInjectingRecorder<I, O, E> {
    fn default() -> Self {
        Self::new(O::default())
    }
}

impl<I: Debug, O: Debug, E: Debug> Debug for DelayedFailureInjectingRecorder<I, O, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelayedFailureInjectingRecorder")
            .field("recorder", &self.recorder)
            .field("delay", &self.timer.delay())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_success_after_delay() {
        let recorder = DelayedFailureInjectingRecorder::<&str, i32>::new(4)
            .with_delay(Duration::from_millis(200));
        let start = Instant::now();

        assert_eq!(recorder.record("a").await, Ok(4));
        assert!(start.elapsed() >= Duration::from_millis(200));
        assert_eq!(recorder.spies(), vec!["a"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_after_delay() {
        let failure = InjectedFailure::msg("timeout");
        let recorder = DelayedFailureInjectingRecorder::<&str, i32>::new(4)
            .with_delay(Duration::from_secs(1))
            .with_error(failure.clone());
        let start = Instant::now();

        let err = recorder.record("a").await.unwrap_err();

        assert!(err.ptr_eq(&failure));
        assert!(start.elapsed() >= Duration::from_secs(1));
        assert_eq!(recorder.spies(), vec!["a"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_recorded_before_delay() {
        let recorder = DelayedFailureInjectingRecorder::<i32, ()>::default()
            .with_delay(Duration::from_secs(10));

        let timed_out = tokio::time::timeout(Duration::from_secs(1), recorder.record(1)).await;

        assert!(timed_out.is_err());
        assert!(!recorder.was_called());
    }

    #[tokio::test(start_paused = true)]
    async fn test_interrupted_call_still_records_and_fails() {
        let recorder = Arc::new(
            DelayedFailureInjectingRecorder::<(), ()>::default()
                .with_delay(Duration::from_secs(60))
                .with_error(InjectedFailure::msg("late")),
        );
        let start = Instant::now();

        let call = tokio::spawn({
            let recorder = Arc::clone(&recorder);
            async move { recorder.record_no_args().await }
        });
        while recorder.pending_calls() == 0 {
            tokio::task::yield_now().await;
        }
        assert!(!recorder.was_called());
        assert_eq!(start.elapsed(), Duration::ZERO);

        recorder.interrupt_delay();

        assert!(call.await.unwrap().is_err());
        assert!(start.elapsed() < Duration::from_secs(60));
        assert_eq!(recorder.call_count(), 1);
        assert_eq!(recorder.pending_calls(), 0);
    }

    #[tokio::test]
    async fn test_clearing_error_restores_value() {
        let recorder = DelayedFailureInjectingRecorder::<(), &str, &str>::new("fine").with_error("bad");

        assert_eq!(recorder.record_no_args().await, Err("bad"));
        recorder.set_error(None);
        assert_eq!(recorder.error(), None);
        assert_eq!(recorder.record_no_args().await, Ok("fine"));
        assert_eq!(recorder.call_count(), 2);
    }
}

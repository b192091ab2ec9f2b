#![allow(clippy::must_use_candidate)]

//! A recorder whose results arrive late.

use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;

use super::CallRecorder;
use crate::clock::DelayTimer;

/// Wraps a [`CallRecorder`] and delays the delivery of each result.
///
/// The call is recorded (and observers notified) as soon as
/// [`record`](DelayedRecorder::record) is invoked, before the returned future
/// is first polled. Only the caller's resumption is delayed. This lets a test
/// assert on spies right after issuing a call it has not awaited yet.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use spykit::mock::DelayedRecorder;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let recorder = DelayedRecorder::<&str, &str>::new("out")
///     .with_delay(Duration::from_millis(10));
///
/// let pending = recorder.record("x");
/// assert_eq!(recorder.spies(), vec!["x"]);
///
/// assert_eq!(pending.await, "out");
/// # }
/// ```
pub struct DelayedRecorder<I, O> {
    recorder: CallRecorder<I, O>,
    timer: DelayTimer,
}

impl<I, O> DelayedRecorder<I, O>
where
    I: Clone,
    O: Clone,
{
    /// Create a recorder that returns `return_value` with no delay.
    pub fn new(return_value: O) -> Self {
        Self {
            recorder: CallRecorder::new(return_value),
            timer: DelayTimer::new(),
        }
    }

    /// Set the initial delay.
    #[must_use]
    pub fn with_delay(self, delay: Duration) -> Self {
        self.timer.set_delay(delay);
        self
    }

    /// Record the call now and resolve to the configured value after the delay.
    pub fn record(&self, input: I) -> impl Future<Output = O> + '_ {
        let output = self.recorder.record(input);
        async move {
            self.timer.wait().await;
            output
        }
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

    /// Release every call currently waiting out its delay.
    ///
    /// Interrupted calls resolve normally with their value.
    pub fn interrupt_delay(&self) {
        self.timer.interrupt();
    }

    /// Number of calls currently waiting out their delay.
    pub fn pending_calls(&self) -> usize {
        self.timer.pending_waits()
    }

    /// Replace the value returned by future calls.
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

    /// The value the next call will return.
    pub fn return_value(&self) -> O {
        self.recorder.return_value()
    }

    /// All recorded inputs, in call order.
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

    /// The wrapped recorder.
    pub fn recorder(&self) -> &CallRecorder<I, O> {
        &self.recorder
    }
}

impl<O: Clone> DelayedRecorder<(), O> {
    /// Record a call that carries no input.
    pub fn record_no_args(&self) -> impl Future<Output = O> + '_ {
        self.record(())
    }
}

impl<I: Clone, O: Clone + Default> Default for DelayedRecorder<I, O> {
    fn default() -> Self {
        Self::new(O::default())
    }
}

impl<I: Debug, O: Debug> Debug for DelayedRecorder<I, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelayedRecorder")
            .field("recorder", &self.recorder)
            .field("delay", &self.timer.delay())
            .finish()
    }
}

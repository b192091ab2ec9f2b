#![allow(clippy::must_use_candidate)]

//! A recorder that can be told to fail.

use std::fmt::Debug;

use parking_lot::Mutex;
use tracing::debug;

use super::CallRecorder;
use crate::error::InjectedFailure;

/// Wraps a [`CallRecorder`] and raises a configured error instead of returning.
///
/// The call is always recorded and observers always fire before the error is
/// raised, the same way a real collaborator's side effects happen before it
/// fails. Once set, the error is raised on every call until it is cleared or
/// replaced.
///
/// `E` is opaque to the recorder; it only needs to be cloneable. The default,
/// [`InjectedFailure`], wraps any `std::error::Error` and keeps identity across
/// clones.
///
/// # Example
///
/// ```rust
/// use spykit::error::InjectedFailure;
/// use spykit::mock::FailureInjectingRecorder;
///
/// let recorder = FailureInjectingRecorder::<&str, bool>::new(false);
/// let failure = InjectedFailure::msg("unavailable");
///
/// recorder.set_error(Some(failure.clone()));
/// assert_eq!(recorder.record("x"), Err(failure));
/// assert_eq!(recorder.spies(), vec!["x"]);
///
/// recorder.set_error(None);
/// assert_eq!(recorder.record("y"), Ok(false));
/// ```
pub struct FailureInjectingRecorder<I, O, E = InjectedFailure> {
    recorder: CallRecorder<I, O>,
    error: Mutex<Option<E>>,
}

impl<I, O, E> FailureInjectingRecorder<I, O, E>
where
    I: Clone,
    O: Clone,
    E: Clone,
{
    /// Create a recorder that succeeds with `return_value`.
    pub fn new(return_value: O) -> Self {
        Self {
            recorder: CallRecorder::new(return_value),
            error: Mutex::new(None),
        }
    }

    /// Start out failing with `error`.
    #[must_use]
    pub fn with_error(self, error: E) -> Self {
        *self.error.lock() = Some(error);
        self
    }

    /// Record the call, then fail with the configured error if there is one.
    ///
    /// # Errors
    ///
    /// Returns a clone of the error last passed to
    /// [`set_error`](FailureInjectingRecorder::set_error).
    pub fn record(&self, input: I) -> Result<O, E> {
        let output = self.recorder.record(input);
        match self.error.lock().clone() {
            Some(error) => {
                debug!("raising injected failure");
                Err(error)
            }
            None => Ok(output),
        }
    }

    /// Set the error raised by future calls, or clear it with `None`.
    ///
    /// Does not notify observers.
    pub fn set_error(&self, error: Option<E>) {
        debug!(failing = error.is_some(), "injected failure configured");
        *self.error.lock() = error;
    }

    /// The error future calls will raise, if any.
    pub fn error(&self) -> Option<E> {
        self.error.lock().clone()
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

    /// The wrapped recorder, for the remaining inspection helpers.
    pub fn recorder(&self) -> &CallRecorder<I, O> {
        &self.recorder
    }
}

impl<O: Clone, E: Clone> FailureInjectingRecorder<(), O, E> {
    /// Record a call that carries no input.
    ///
    /// # Errors
    ///
    /// Returns the configured error, if any.
    pub fn record_no_args(&self) -> Result<O, E> {
        self.record(())
    }
}

impl<I: Clone, O: Clone + Default, E: Clone> Default for FailureInjectingRecorder<I, O, E> {
    fn default() -> Self {
        Self::new(O::default())
    }
}

impl<I: Debug, O: Debug, E: Debug> Debug for FailureInjectingRecorder<I, O, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FailureInjectingRecorder")
            .field("recorder", &self.recorder)
            .field("error", &*self.error.lock())
            .finish()
    }
}

// Accessors return snapshots; callers routinely ignore them in tests
#![allow(clippy::must_use_candidate)]

//! The base call recorder every other mock wraps.
//!
//! # Example
//!
//! ```rust
//! use spykit::mock::CallRecorder;
//!
//! let recorder = CallRecorder::<&str, bool>::new(true);
//!
//! assert!(recorder.record("in"));
//! assert_eq!(recorder.spies(), vec!["in"]);
//! assert_eq!(recorder.call_count(), 1);
//! ```

use std::cell::RefCell;
use std::fmt::Debug;
use std::sync::Arc;

use parking_lot::ReentrantMutex;
use tracing::trace;

type Observer<I> = Arc<dyn Fn(&I) + Send + Sync>;

/// A thread-safe recorder of calls made to a faked collaborator.
///
/// Each call to [`record`](CallRecorder::record) appends its input to the
/// spies, notifies the registered observers in registration order, and hands
/// back the configured return value.
///
/// # Thread Safety
///
/// All state lives behind one lock owned by this instance. Concurrent calls are
/// serialized: every input is recorded exactly once, observers for one call
/// finish before the next call starts, and each call returns the value that was
/// configured when it began.
///
/// The lock is re-entrant, so an observer may read the recorder (or record
/// again) from inside the callback.
///
/// Share a recorder between tasks or threads with `Arc<CallRecorder<_, _>>`.
pub struct CallRecorder<I, O> {
    state: ReentrantMutex<RefCell<RecorderState<I, O>>>,
}

struct RecorderState<I, O> {
    return_value: O,
    spies: Vec<I>,
    observers: Vec<Observer<I>>,
}

impl<I, O> CallRecorder<I, O>
where
    I: Clone,
    O: Clone,
{
    /// Create a recorder that returns `return_value` until told otherwise.
    pub fn new(return_value: O) -> Self {
        Self {
            state: ReentrantMutex::new(RefCell::new(RecorderState {
                return_value,
                spies: Vec::new(),
                observers: Vec::new(),
            })),
        }
    }

    /// Record a call with the given input and return the configured value.
    pub fn record(&self, input: I) -> O {
        let guard = self.state.lock();
        let (output, observers, call) = {
            let mut state = guard.borrow_mut();
            state.spies.push(input.clone());
            (
                state.return_value.clone(),
                state.observers.clone(),
                state.spies.len(),
            )
        };
        trace!(call, observers = observers.len(), "call recorded");

        for observer in &observers {
            observer(&input);
        }
        output
    }

    /// Replace the value returned by future calls.
    ///
    /// Does not notify observers.
    pub fn set_return_value(&self, value: O) {
        let guard = self.state.lock();
        guard.borrow_mut().return_value = value;
    }

    /// Register a callback invoked with the input of every future call.
    ///
    /// Registering does not invoke the callback.
    pub fn add_observer<F>(&self, observer: F)
    where
        F: Fn(&I) + Send + Sync + 'static,
    {
        let guard = self.state.lock();
        guard.borrow_mut().observers.push(Arc::new(observer));
    }

    /// Register a callback invoked on every future call, ignoring its input.
    pub fn add_call_observer<F>(&self, observer: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.add_observer(move |_: &I| observer());
    }

    /// The value the next call will return.
    pub fn return_value(&self) -> O {
        self.state.lock().borrow().return_value.clone()
    }

    /// All recorded inputs, in call order.
    pub fn spies(&self) -> Vec<I> {
        self.state.lock().borrow().spies.clone()
    }

    /// Get the number of recorded calls.
    pub fn call_count(&self) -> usize {
        self.state.lock().borrow().spies.len()
    }

    /// Check if at least one call was recorded.
    pub fn was_called(&self) -> bool {
        self.call_count() > 0
    }

    /// Check if exactly `n` calls were recorded.
    pub fn was_called_times(&self, n: usize) -> bool {
        self.call_count() == n
    }

    /// Check if any call was recorded with `expected` as its input.
    pub fn was_called_with(&self, expected: &I) -> bool
    where
        I: PartialEq,
    {
        self.state.lock().borrow().spies.iter().any(|i| i == expected)
    }

    /// Get the Nth recorded input (0-indexed).
    pub fn nth_spy(&self, n: usize) -> Option<I> {
        self.state.lock().borrow().spies.get(n).cloned()
    }

    /// Get the most recently recorded input.
    pub fn last_spy(&self) -> Option<I> {
        self.state.lock().borrow().spies.last().cloned()
    }
}

impl<O: Clone> CallRecorder<(), O> {
    /// Record a call that carries no input.
    pub fn record_no_args(&self) -> O {
        self.record(())
    }
}

impl<I: Clone, O: Clone + Default> Default for CallRecorder<I, O> {
    fn default() -> Self {
        Self::new(O::default())
    }
}

impl<I: Debug, O: Debug> Debug for CallRecorder<I, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let guard = self.state.lock();
        let state = guard.borrow();
        f.debug_struct("CallRecorder")
            .field("call_count", &state.spies.len())
            .field("spies", &state.spies)
            .field("return_value", &state.return_value)
            .field("observers", &state.observers.len())
            .finish()
    }
}

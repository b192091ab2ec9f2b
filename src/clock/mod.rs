//! Simulated latency for delayed mocks
//!
//! The `clock` module provides [`DelayTimer`](crate::clock::DelayTimer), the
//! delay shared by [`DelayedRecorder`](crate::mock::DelayedRecorder) and
//! [`DelayedFailureInjectingRecorder`](crate::mock::DelayedFailureInjectingRecorder).
//!
//! Delays run on tokio's timer, so tests can use `#[tokio::test(start_paused = true)]`
//! to skip over them in virtual time.

mod delay;

pub use delay::DelayTimer;

//! Recording test doubles for collaborator calls.
//!
//! This module provides four mocks, layered by composition:
//!
//! - [`CallRecorder`] - Records inputs, notifies observers, returns a stub value
//! - [`FailureInjectingRecorder`] - A recorder that can be told to fail
//! - [`DelayedRecorder`] - A recorder whose results arrive after a delay
//! - [`DelayedFailureInjectingRecorder`] - Waits, then succeeds or fails
//!
//! # Standing in for a collaborator
//!
//! ```rust
//! use std::sync::Arc;
//! use spykit::mock::FailureInjectingRecorder;
//! use spykit::error::InjectedFailure;
//!
//! trait Store {
//!     fn save(&self, key: &str) -> Result<(), InjectedFailure>;
//! }
//!
//! struct FakeStore(Arc<FailureInjectingRecorder<String, ()>>);
//!
//! impl Store for FakeStore {
//!     fn save(&self, key: &str) -> Result<(), InjectedFailure> {
//!         self.0.record(key.to_string())
//!     }
//! }
//!
//! let mock = Arc::new(FailureInjectingRecorder::default());
//! let store = FakeStore(Arc::clone(&mock));
//!
//! assert!(store.save("a").is_ok());
//! mock.set_error(Some(InjectedFailure::msg("disk full")));
//! assert!(store.save("b").is_err());
//!
//! assert_eq!(mock.spies(), vec!["a".to_string(), "b".to_string()]);
//! ```

mod delayed;
mod delayed_failing;
mod failing;
mod recorder;

pub use delayed::DelayedRecorder;
pub use delayed_failing::DelayedFailureInjectingRecorder;
pub use failing::FailureInjectingRecorder;
pub use recorder::CallRecorder;

//! # spykit
//!
//! > Composable test doubles for Rust
//!
//! **spykit** provides the building blocks for faking collaborators in unit
//! tests: spies that record inputs, stubs that return configured outputs,
//! simulated latency and injected failures.
//!
//! ## Quick Start
//!
//! ```rust
//! use spykit::prelude::*;
//!
//! let recorder = CallRecorder::<&str, bool>::new(true);
//!
//! assert!(recorder.record("in"));
//! assert_eq!(recorder.spies(), vec!["in"]);
//! assert_eq!(recorder.call_count(), 1);
//! ```
//!
//! ## Features
//!
//! - **Call Recording** - Inputs, call counts and per-call observers
//! - **Stubbed Outputs** - Return values replaceable at any time
//! - **Failure Injection** - Raise a configured error, identity intact
//! - **Latency** - Deliver results or outcomes after a delay
//!
//! Every mock is safe to call from many threads or tasks at once; share one
//! with an `Arc`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Delay timer used by the delayed mocks
pub mod clock;

pub mod error;
pub mod mock;

/// Prelude for convenient imports
///
/// ```rust
/// use spykit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::clock::DelayTimer;
    pub use crate::error::{InjectedFailure, Result};
    pub use crate::mock::{
        CallRecorder, DelayedFailureInjectingRecorder, DelayedRecorder, FailureInjectingRecorder,
    };
}

// Re-exports
pub use error::{InjectedFailure, Result};

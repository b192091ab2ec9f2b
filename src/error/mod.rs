//! Error definitions
//!
//! The only error this crate ever hands back is the one a test configured on a
//! failure-injecting recorder. [`InjectedFailure`] is a convenient carrier for
//! arbitrary error values: it is cheap to clone and every clone refers to the
//! same underlying error, so a test can check that the exact value it injected
//! is the one its code observed.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// An error configured ahead of time to be raised instead of returning a value.
///
/// Clones share the wrapped error. Equality is identity: two `InjectedFailure`s
/// are equal only if they were cloned from the same original.
///
/// # Example
///
/// ```rust
/// use spykit::error::InjectedFailure;
///
/// let failure = InjectedFailure::msg("connection reset");
/// let observed = failure.clone();
///
/// assert_eq!(failure, observed);
/// assert_ne!(failure, InjectedFailure::msg("connection reset"));
/// assert_eq!(observed.to_string(), "connection reset");
/// ```
#[derive(Error, Clone)]
#[error(transparent)]
pub struct InjectedFailure(Arc<dyn StdError + Send + Sync + 'static>);

#[derive(Error, Debug)]
#[error("{0}")]
struct Message(String);

impl InjectedFailure {
    /// Wrap an arbitrary error value.
    #[must_use]
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self(Arc::new(error))
    }

    /// Create a failure carrying only a message.
    #[must_use]
    pub fn msg(message: impl Into<String>) -> Self {
        Self::new(Message(message.into()))
    }

    /// Wrap an already shared error without re-allocating it.
    #[must_use]
    pub fn from_arc(error: Arc<dyn StdError + Send + Sync + 'static>) -> Self {
        Self(error)
    }

    /// Returns `true` if both failures carry the very same error instance.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Attempt to view the wrapped error as a concrete type.
    #[must_use]
    pub fn downcast_ref<T: StdError + 'static>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl fmt::Debug for InjectedFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InjectedFailure").field(&self.0).finish()
    }
}

impl PartialEq for InjectedFailure {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for InjectedFailure {}

/// Result type alias
pub type Result<T, E = InjectedFailure> = std::result::Result<T, E>;

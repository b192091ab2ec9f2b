//! A single configurable delay and the suspend that honours it.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::Notify;
use tracing::debug;

/// Per-instance delay used by the delayed recorders.
///
/// Holds one duration (zero by default). Setting it replaces the value for all
/// future waits; there is no queue of delays.
///
/// Waiting is best-effort and runs on tokio's timer, so it needs to be awaited
/// inside a tokio runtime whenever the duration is non-zero.
///
/// # Interruption
///
/// [`interrupt`](DelayTimer::interrupt) wakes every wait that is currently in
/// progress. An interrupted wait returns normally, exactly as if the delay had
/// elapsed, so the caller cannot tell the two apart. This can be surprising: a
/// test that cancels a delayed call through the timer still sees the call
/// complete.
///
/// Dropping the future of a delayed call is different. That is ordinary Rust
/// cancellation and nothing after the wait runs: a
/// [`DelayedFailureInjectingRecorder`](crate::mock::DelayedFailureInjectingRecorder)
/// call dropped mid-delay is never recorded. Use `interrupt` when the call
/// should still go through.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use spykit::clock::DelayTimer;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let timer = DelayTimer::new();
/// assert_eq!(timer.delay(), Duration::ZERO);
///
/// // Zero delay completes without suspending.
/// timer.wait().await;
///
/// timer.set_delay(Duration::from_millis(5));
/// timer.wait().await;
/// # }
/// ```
pub struct DelayTimer {
    delay: Mutex<Duration>,
    waiting: AtomicUsize,
    interrupt: Notify,
}

impl DelayTimer {
    /// Create a timer with no delay.
    #[must_use]
    pub fn new() -> Self {
        Self::with_delay(Duration::ZERO)
    }

    /// Create a timer with the given delay.
    #[must_use]
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Mutex::new(delay),
            waiting: AtomicUsize::new(0),
            interrupt: Notify::new(),
        }
    }

    /// The currently configured delay.
    #[must_use]
    pub fn delay(&self) -> Duration {
        *self.delay.lock()
    }

    /// Replace the delay for all future waits.
    pub fn set_delay(&self, delay: Duration) {
        debug!(?delay, "delay configured");
        *self.delay.lock() = delay;
    }

    /// Replace the delay, given in seconds.
    ///
    /// Values too large for a [`Duration`], infinity included, saturate to
    /// [`Duration::MAX`].
    ///
    /// # Panics
    ///
    /// Panics if `seconds` is negative or NaN.
    pub fn set_delay_secs(&self, seconds: f64) {
        assert!(
            !seconds.is_nan() && seconds >= 0.0,
            "delay must be a non-negative number of seconds"
        );
        self.set_delay(Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX));
    }

    /// Suspend for the configured delay.
    ///
    /// Returns immediately when the delay is zero. Otherwise sleeps until the
    /// delay elapses or [`interrupt`](DelayTimer::interrupt) is called,
    /// whichever comes first.
    pub async fn wait(&self) {
        let delay = self.delay();
        if delay.is_zero() {
            return;
        }

        let mut interrupted = std::pin::pin!(self.interrupt.notified());
        interrupted.as_mut().enable();
        let _waiting = WaitingGuard::enter(&self.waiting);

        tokio::select! {
            () = tokio::time::sleep(delay) => {}
            () = interrupted => {
                debug!(?delay, "delay interrupted, treating as elapsed");
            }
        }
    }

    /// Number of waits currently in progress.
    ///
    /// A wait counted here is already reachable by
    /// [`interrupt`](DelayTimer::interrupt).
    #[must_use]
    pub fn pending_waits(&self) -> usize {
        self.waiting.load(Ordering::SeqCst)
    }

    /// Wake every wait currently in progress.
    ///
    /// Waits started afterwards are unaffected.
    pub fn interrupt(&self) {
        self.interrupt.notify_waiters();
    }
}

struct WaitingGuard<'a>(&'a AtomicUsize);

impl<'a> WaitingGuard<'a> {
    fn enter(count: &'a AtomicUsize) -> Self {
        count.fetch_add(1, Ordering::SeqCst);
        Self(count)
    }
}

impl Drop for WaitingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Default for DelayTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DelayTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelayTimer")
            .field("delay", &self.delay())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::time::Instant;

    #[test]
    fn test_default_is_zero() {
        let timer = DelayTimer::default();
        assert_eq!(timer.delay(), Duration::ZERO);
    }

    #[test]
    fn test_set_delay_replaces() {
        let timer = DelayTimer::with_delay(Duration::from_millis(100));

        timer.set_delay(Duration::from_millis(20));
        assert_eq!(timer.delay(), Duration::from_millis(20));

        timer.set_delay_secs(0.5);
        assert_eq!(timer.delay(), Duration::from_millis(500));
    }

    #[test]
    #[should_panic(expected = "non-negative")]
    fn test_negative_seconds_panics() {
        DelayTimer::new().set_delay_secs(-1.0);
    }

    #[test]
    #[should_panic(expected = "non-negative")]
    fn test_nan_seconds_panics() {
        DelayTimer::new().set_delay_secs(f64::NAN);
    }

    #[test]
    fn test_huge_delay_kept_exactly() {
        let huge = Duration::from_secs(1 << 55);
        let timer = DelayTimer::with_delay(huge);
        assert_eq!(timer.delay(), huge);

        timer.set_delay(Duration::MAX);
        assert_eq!(timer.delay(), Duration::MAX);
    }

    #[test]
    fn test_huge_seconds_saturate() {
        let timer = DelayTimer::new();

        timer.set_delay_secs(1e20);
        assert_eq!(timer.delay(), Duration::MAX);

        timer.set_delay_secs(f64::INFINITY);
        assert_eq!(timer.delay(), Duration::MAX);
    }

    #[tokio::test(start_paused = true)]
    async fn test_huge_delay_still_suspends() {
        let timer = DelayTimer::new();
        timer.set_delay(Duration::from_secs(1 << 55));

        let waited = tokio::time::timeout(Duration::from_secs(3600), timer.wait()).await;

        assert!(waited.is_err());
        assert_eq!(timer.pending_waits(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_delay_does_not_suspend() {
        let timer = DelayTimer::new();
        let start = Instant::now();

        timer.wait().await;

        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_sleeps_for_delay() {
        let timer = DelayTimer::with_delay(Duration::from_secs(3));
        let start = Instant::now();

        timer.wait().await;

        assert!(start.elapsed() >= Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_interrupt_ends_wait_early() {
        let timer = Arc::new(DelayTimer::with_delay(Duration::from_secs(60)));
        let start = Instant::now();

        let waiter = tokio::spawn({
            let timer = Arc::clone(&timer);
            async move { timer.wait().await }
        });
        while timer.pending_waits() == 0 {
            tokio::task::yield_now().await;
        }

        timer.interrupt();
        waiter.await.unwrap();

        assert!(start.elapsed() < Duration::from_secs(60));
        assert_eq!(timer.pending_waits(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interrupt_does_not_affect_later_waits() {
        let timer = DelayTimer::with_delay(Duration::from_secs(1));
        timer.interrupt();

        let start = Instant::now();
        timer.wait().await;

        assert!(start.elapsed() >= Duration::from_secs(1));
    }
}

/*!
 * Interrupt Tokens
 * Cancellation handles for blocking queue operations
 */

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// Error returned when a blocking operation is interrupted.
///
/// Retryable: queue state is not corrupted and elements transferred before the
/// interruption remain committed. Clear the token and reissue the call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("interrupted while waiting on the queue")]
pub struct Interrupted;

/// Cancellation handle for blocking push/pop operations.
///
/// Plays the role of a pending signal: a caller passes a token into a blocking
/// operation, and another thread raises it through `SyncGate::interrupt` to
/// abort the wait. Setting the flag alone wakes nobody — raising must go
/// through the gate so parked waiters observe it.
///
/// Tokens are reusable: `clear` rearms one for the retry the error contract
/// promises. Clones share the same flag.
#[derive(Clone, Debug, Default)]
pub struct InterruptToken {
    raised: Arc<AtomicBool>,
}

impl InterruptToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the token has been raised and not yet cleared
    #[inline]
    #[must_use]
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }

    /// Rearm the token so the interrupted call can be reissued
    #[inline]
    pub fn clear(&self) {
        self.raised.store(false, Ordering::Release);
    }

    /// Fail fast if the token is raised
    #[inline]
    pub(crate) fn check(&self) -> Result<(), Interrupted> {
        if self.is_raised() {
            Err(Interrupted)
        } else {
            Ok(())
        }
    }

    /// Set the flag. Only the gate raises tokens; it does so under the permit
    /// and then broadcasts both conditions.
    #[inline]
    pub(crate) fn set(&self) {
        self.raised.store(true, Ordering::Release);
    }
}

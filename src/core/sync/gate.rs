/*!
 * Sync Gate
 *
 * Exclusive permit plus the two broadcast conditions (not-empty, not-full)
 * that coordinate access to the bounded queue.
 *
 * # Design
 *
 * The permit is a `parking_lot::Mutex` around the guarded state; waiting
 * releases it and parks on a `Condvar`, reacquiring on wake. Wakes are
 * broadcast: every waiter of a condition is released at once, and only as
 * many as there are available slots or elements may actually proceed, so
 * every waiter re-checks its predicate under the permit after waking.
 */

use super::interrupt::{Interrupted, InterruptToken};
use parking_lot::{Condvar, Mutex, MutexGuard};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Result of waking a condition's waiters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeResult {
    /// Nobody was parked on the condition
    NoWaiters,
    /// Number of waiters released
    Woken(usize),
}

/// Exclusive permit plus two interruptible broadcast conditions guarding `T`.
///
/// The permit is not recursively acquirable, and no caller holds it across a
/// park: waits release it atomically and reacquire it before returning.
pub struct SyncGate<T> {
    state: Mutex<T>,
    not_empty: Condvar,
    not_full: Condvar,
    empty_waiters: AtomicUsize,
    full_waiters: AtomicUsize,
}

impl<T> SyncGate<T> {
    pub fn new(state: T) -> Self {
        Self {
            state: Mutex::new(state),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            empty_waiters: AtomicUsize::new(0),
            full_waiters: AtomicUsize::new(0),
        }
    }

    /// Acquire the exclusive permit.
    ///
    /// A raised token aborts with [`Interrupted`] before the permit is taken.
    /// Every critical section under the permit is constant-time (no caller
    /// sleeps while holding it), so acquisition itself cannot block
    /// unboundedly.
    pub fn acquire(&self, intr: &InterruptToken) -> Result<MutexGuard<'_, T>, Interrupted> {
        intr.check()?;
        Ok(self.state.lock())
    }

    /// Take the permit without an interruption check, for paths that never
    /// park while holding it
    pub fn lock(&self) -> MutexGuard<'_, T> {
        self.state.lock()
    }

    /// Park until the not-empty condition is broadcast or `intr` is raised.
    ///
    /// Releases the permit while parked and reacquires it before returning,
    /// on the error path too. The caller loops on its predicate: broadcast
    /// wakes release every parked consumer and spurious wakeups happen.
    pub fn wait_not_empty(
        &self,
        guard: &mut MutexGuard<'_, T>,
        intr: &InterruptToken,
    ) -> Result<(), Interrupted> {
        self.empty_waiters.fetch_add(1, Ordering::Relaxed);
        self.not_empty.wait(guard);
        self.empty_waiters.fetch_sub(1, Ordering::Relaxed);
        intr.check()
    }

    /// Park until the not-full condition is broadcast or `intr` is raised.
    ///
    /// Mirror of [`SyncGate::wait_not_empty`] for producers.
    pub fn wait_not_full(
        &self,
        guard: &mut MutexGuard<'_, T>,
        intr: &InterruptToken,
    ) -> Result<(), Interrupted> {
        self.full_waiters.fetch_add(1, Ordering::Relaxed);
        self.not_full.wait(guard);
        self.full_waiters.fetch_sub(1, Ordering::Relaxed);
        intr.check()
    }

    /// Release every consumer parked on the not-empty condition
    pub fn notify_not_empty(&self) -> WakeResult {
        match self.not_empty.notify_all() {
            0 => WakeResult::NoWaiters,
            n => WakeResult::Woken(n),
        }
    }

    /// Release every producer parked on the not-full condition
    pub fn notify_not_full(&self) -> WakeResult {
        match self.not_full.notify_all() {
            0 => WakeResult::NoWaiters,
            n => WakeResult::Woken(n),
        }
    }

    /// Raise `intr` and wake any of its waiters parked on either condition.
    ///
    /// The flag is set while holding the permit: a waiter between its
    /// predicate check and the park still holds the permit, so it cannot miss
    /// the interrupt. Waiters on other tokens re-check their predicate and
    /// park again.
    pub fn interrupt(&self, intr: &InterruptToken) {
        {
            let _state = self.state.lock();
            intr.set();
        }
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }

    /// Approximate count of consumers parked on the not-empty condition
    #[inline]
    pub fn empty_waiters(&self) -> usize {
        self.empty_waiters.load(Ordering::Relaxed)
    }

    /// Approximate count of producers parked on the not-full condition
    #[inline]
    pub fn full_waiters(&self) -> usize {
        self.full_waiters.load(Ordering::Relaxed)
    }
}

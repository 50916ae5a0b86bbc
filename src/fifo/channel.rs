/*!
 * FIFO Channel
 * Shared bounded queue with blocking, interruptible transfers
 *
 * Every transfer moves exactly one element under the gate's permit. A full
 * queue parks producers on the not-full condition, an empty queue parks
 * consumers on the not-empty condition, and each successful transfer
 * broadcasts the opposite condition after the permit is released.
 */

use super::ring::ByteRing;
use crate::core::limits::MAX_FIFO_CAPACITY;
use crate::core::sync::{InterruptToken, Interrupted, SyncGate};
use log::{info, trace, warn};
use std::sync::Arc;

/// State protected by the gate's permit
struct ChannelState {
    ring: ByteRing,
    pushed: u64,
    popped: u64,
    dropped: u64,
}

/// Counters and indices captured under one permit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelSnapshot {
    pub capacity: usize,
    pub occupied: usize,
    pub head: usize,
    pub tail: usize,
    pub pushed: u64,
    pub popped: u64,
    pub dropped: u64,
}

/// Handle to a shared bounded byte queue.
///
/// Clones share the same queue, so producers and consumers each hold their
/// own handle. All blocking calls take the caller's interrupt token; raising
/// the token through [`FifoChannel::interrupt`] aborts that caller's wait
/// while everyone else re-checks their condition and parks again.
#[derive(Clone)]
pub struct FifoChannel {
    gate: Arc<SyncGate<ChannelState>>,
}

impl FifoChannel {
    /// Create a queue with the given element capacity, clamped to
    /// `1..=MAX_FIFO_CAPACITY`
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, MAX_FIFO_CAPACITY);
        info!("FIFO channel created: capacity {}", capacity);
        Self {
            gate: Arc::new(SyncGate::new(ChannelState {
                ring: ByteRing::new(capacity),
                pushed: 0,
                popped: 0,
                dropped: 0,
            })),
        }
    }

    /// Block until one value is stored or the token is raised.
    ///
    /// Returns `Ok(true)` when the value landed in the queue. `Ok(false)`
    /// means the post-wait re-check still saw a full ring and the value was
    /// dropped; with transfers serialized by the permit that branch is not
    /// expected to run, so it is logged and counted rather than trusted
    /// silently.
    pub fn push(&self, value: u8, intr: &InterruptToken) -> Result<bool, Interrupted> {
        let mut state = self.gate.acquire(intr)?;
        while state.ring.is_full() {
            self.gate.wait_not_full(&mut state, intr)?;
        }

        let stored = match state.ring.push(value) {
            Ok(()) => {
                state.pushed += 1;
                trace!("Stored value {} at tail {}", value, state.ring.tail());
                true
            }
            Err(_) => {
                state.dropped += 1;
                warn!("Queue full after wakeup, dropping value {}", value);
                false
            }
        };
        drop(state);

        if stored {
            self.gate.notify_not_empty();
        }
        Ok(stored)
    }

    /// Block until one value is taken or the token is raised.
    ///
    /// `Ok(None)` is the pop-side twin of the dropped push: the post-wait
    /// re-check saw an empty ring. Callers treat it as a skipped element.
    pub fn pop(&self, intr: &InterruptToken) -> Result<Option<u8>, Interrupted> {
        let mut state = self.gate.acquire(intr)?;
        while state.ring.is_empty() {
            self.gate.wait_not_empty(&mut state, intr)?;
        }

        let value = state.ring.pop();
        match value {
            Some(taken) => {
                state.popped += 1;
                trace!("Took value {}, head now {}", taken, state.ring.head());
            }
            None => warn!("Queue empty after wakeup, skipping read"),
        }
        drop(state);

        if value.is_some() {
            self.gate.notify_not_full();
        }
        Ok(value)
    }

    /// Store a value only if a slot is free right now
    pub fn try_push(&self, value: u8) -> bool {
        let mut state = self.gate.lock();
        let stored = state.ring.push(value).is_ok();
        if stored {
            state.pushed += 1;
        }
        drop(state);

        if stored {
            self.gate.notify_not_empty();
        }
        stored
    }

    /// Take a value only if one is queued right now
    pub fn try_pop(&self) -> Option<u8> {
        let mut state = self.gate.lock();
        let value = state.ring.pop();
        if value.is_some() {
            state.popped += 1;
        }
        drop(state);

        if value.is_some() {
            self.gate.notify_not_full();
        }
        value
    }

    /// Raise a caller's token and wake every parked thread.
    ///
    /// The flag is set while the permit is held, so a waiter is either
    /// parked (and woken by the broadcast) or will observe the flag before
    /// parking. Waiters holding other tokens absorb the wakeup and park
    /// again.
    pub fn interrupt(&self, intr: &InterruptToken) {
        self.gate.interrupt(intr);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.gate.lock().ring.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gate.lock().ring.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.gate.lock().ring.is_full()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.gate.lock().ring.capacity()
    }

    /// Threads parked waiting for a free slot
    #[must_use]
    pub fn push_waiters(&self) -> usize {
        self.gate.full_waiters()
    }

    /// Threads parked waiting for a value
    #[must_use]
    pub fn pop_waiters(&self) -> usize {
        self.gate.empty_waiters()
    }

    /// Capture indices and transfer counters under one permit
    #[must_use]
    pub fn snapshot(&self) -> ChannelSnapshot {
        let state = self.gate.lock();
        ChannelSnapshot {
            capacity: state.ring.capacity(),
            occupied: state.ring.len(),
            head: state.ring.head(),
            tail: state.ring.tail(),
            pushed: state.pushed,
            popped: state.popped,
            dropped: state.dropped,
        }
    }
}

impl std::fmt::Debug for FifoChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snap = self.snapshot();
        f.debug_struct("FifoChannel")
            .field("capacity", &snap.capacity)
            .field("occupied", &snap.occupied)
            .finish()
    }
}

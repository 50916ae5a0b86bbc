/*!
 * Byte Ring
 * Fixed-capacity circular store backing the queue
 */

use crate::core::limits::FIFO_CAPACITY;
use thiserror::Error;

/// Push attempted while every slot is occupied
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("ring is full")]
pub struct RingFull;

/// Fixed-capacity circular byte store.
///
/// Head and tail wrap modulo the capacity, and a separate occupancy count
/// disambiguates the `head == tail` case so full and empty are never confused.
/// Not synchronized; the channel serializes access through its gate.
#[derive(Debug, Clone)]
pub struct ByteRing {
    slots: Box<[u8]>,
    head: usize,
    tail: usize,
    count: usize,
}

impl ByteRing {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "ring capacity must be nonzero");
        Self {
            slots: vec![0; capacity].into_boxed_slice(),
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    /// Store one byte at the tail
    pub fn push(&mut self, value: u8) -> Result<(), RingFull> {
        if self.is_full() {
            return Err(RingFull);
        }
        self.slots[self.tail] = value;
        self.tail = self.advance(self.tail);
        self.count += 1;
        Ok(())
    }

    /// Take the oldest byte from the head
    pub fn pop(&mut self) -> Option<u8> {
        if self.is_empty() {
            return None;
        }
        let value = self.slots[self.head];
        self.head = self.advance(self.head);
        self.count -= 1;
        Some(value)
    }

    #[inline]
    fn advance(&self, index: usize) -> usize {
        (index + 1) % self.capacity()
    }

    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.count == self.capacity()
    }

    #[inline]
    #[must_use]
    pub fn head(&self) -> usize {
        self.head
    }

    #[inline]
    #[must_use]
    pub fn tail(&self) -> usize {
        self.tail
    }
}

impl Default for ByteRing {
    fn default() -> Self {
        Self::new(FIFO_CAPACITY)
    }
}

/*!
 * Parser Types
 * Structured results and diagnostics for write-payload parsing
 */

use crate::core::limits::MAX_PENDING_VALUES;
use thiserror::Error;

/// Why a sub-token was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token too short for a value literal: {len} bytes")]
    TooShort { len: usize },

    #[error("expected the 0b literal prefix before the bit field, found {found:?}")]
    MissingPrefix { found: String },

    #[error("bit {index} of the value field is {byte:?}, expected '0' or '1'")]
    InvalidBit { index: usize, byte: char },

    #[error("directive digits do not parse as an integer: {digits:?}")]
    BadDirective { digits: String },

    #[error("payload carries more values than one batch can hold")]
    BatchFull,
}

/// Ordered values parsed from one write payload.
///
/// Fixed-capacity scratch, so parsing never allocates. The write path consumes
/// it left-to-right, one element transferred at a time, which preserves
/// intra-call ordering even when a mid-batch transfer blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PendingValues {
    values: [u8; MAX_PENDING_VALUES],
    len: usize,
}

impl PendingValues {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: [0; MAX_PENDING_VALUES],
            len: 0,
        }
    }

    /// Append a parsed value, rejecting once the batch is full
    pub fn push(&mut self, value: u8) -> Result<(), TokenError> {
        if self.len == MAX_PENDING_VALUES {
            return Err(TokenError::BatchFull);
        }
        self.values[self.len] = value;
        self.len += 1;
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The accepted values in payload order
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.values[..self.len]
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.as_slice().iter().copied()
    }
}

/// Interpretation of one write payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteCommand {
    /// `num=<n>` control directive: replace the device's read count
    SetReadCount(i64),
    /// Byte values to enqueue, plus how many sub-tokens were rejected
    Enqueue {
        values: PendingValues,
        rejected: usize,
    },
}

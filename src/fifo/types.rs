/*!
 * Device Types
 * Errors, reports, and tunables shared across the queue device
 */

use crate::core::limits::{DEFAULT_READ_COUNT, FIFO_CAPACITY, MAX_FIFO_CAPACITY, MAX_WRITE_BYTES};
use crate::core::serde::{is_zero_u64, is_zero_usize};
use crate::core::sync::Interrupted;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced across the device boundary
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Diagnostic)]
#[serde(rename_all = "snake_case", tag = "error", content = "details")]
pub enum DeviceError {
    #[error("Interrupted: {0}")]
    #[diagnostic(
        code(fifodev::interrupted),
        help("Clear the interrupt token and retry the call")
    )]
    Interrupted(String),

    #[error("Payload too large: {len} bytes exceeds the {max} byte write limit")]
    #[diagnostic(
        code(fifodev::payload_too_large),
        help("Split the payload into smaller writes")
    )]
    PayloadTooLarge { len: usize, max: usize },

    #[error("Copy fault: {0}")]
    #[diagnostic(
        code(fifodev::copy_fault),
        help("The caller buffer was rejected before any transfer")
    )]
    CopyFault(String),
}

pub type DeviceResult<T> = Result<T, DeviceError>;

impl From<Interrupted> for DeviceError {
    fn from(err: Interrupted) -> Self {
        Self::Interrupted(err.to_string())
    }
}

/// Outcome of one accepted write.
///
/// `consumed` always covers the whole payload; rejected sub-tokens are
/// reported here rather than through a short count or an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteReport {
    /// Payload bytes consumed
    pub consumed: usize,
    /// Values transferred into the queue
    #[serde(skip_serializing_if = "is_zero_usize", default)]
    pub queued: usize,
    /// Malformed sub-tokens skipped by the parser
    #[serde(skip_serializing_if = "is_zero_usize", default)]
    pub rejected: usize,
    /// Values lost to the post-wait occupancy re-check
    #[serde(skip_serializing_if = "is_zero_usize", default)]
    pub dropped: usize,
    /// New read count, when the payload was a directive
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub read_count: Option<i64>,
}

impl WriteReport {
    #[must_use]
    pub(crate) fn enqueued(consumed: usize, queued: usize, rejected: usize, dropped: usize) -> Self {
        Self {
            consumed,
            queued,
            rejected,
            dropped,
            read_count: None,
        }
    }

    #[must_use]
    pub(crate) fn directive(consumed: usize, read_count: i64) -> Self {
        Self {
            consumed,
            queued: 0,
            rejected: 0,
            dropped: 0,
            read_count: Some(read_count),
        }
    }
}

/// Point-in-time snapshot of the device
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceStats {
    pub capacity: usize,
    pub occupied: usize,
    pub head: usize,
    pub tail: usize,
    #[serde(skip_serializing_if = "is_zero_u64", default)]
    pub pushed: u64,
    #[serde(skip_serializing_if = "is_zero_u64", default)]
    pub popped: u64,
    #[serde(skip_serializing_if = "is_zero_u64", default)]
    pub dropped: u64,
    pub read_count: i64,
    #[serde(skip_serializing_if = "is_zero_usize", default)]
    pub push_waiters: usize,
    #[serde(skip_serializing_if = "is_zero_usize", default)]
    pub pop_waiters: usize,
}

/// Tunables for a queue device
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Ring capacity in elements
    pub capacity: usize,
    /// Largest accepted write payload in bytes
    pub max_write_bytes: usize,
    /// Elements drained per read until a directive changes it
    pub initial_read_count: i64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            capacity: FIFO_CAPACITY,
            max_write_bytes: MAX_WRITE_BYTES,
            initial_read_count: DEFAULT_READ_COUNT,
        }
    }
}

impl DeviceConfig {
    /// Clamp out-of-range fields instead of failing construction
    #[must_use]
    pub fn validated(self) -> Self {
        Self {
            capacity: self.capacity.clamp(1, MAX_FIFO_CAPACITY),
            max_write_bytes: self.max_write_bytes.max(1),
            initial_read_count: self.initial_read_count,
        }
    }
}

/*!
 * fifodev Library
 * Bounded FIFO byte queue with blocking transfers and a text command grammar
 */

pub mod core;
pub mod fifo;
pub mod parser;
pub mod trace;

// Re-exports
pub use crate::core::sync::{InterruptToken, Interrupted, SyncGate, WakeResult};
pub use fifo::{
    ByteRing, ChannelSnapshot, CharDevice, DeviceConfig, DeviceError, DeviceResult, DeviceStats,
    FifoChannel, FifoDevice, RingFull, WriteReport,
};
pub use parser::{parse_payload, PendingValues, TokenError, WriteCommand};
pub use trace::init_tracing;

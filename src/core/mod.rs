/*!
 * Core Module
 * Shared constants, serde helpers, and synchronization primitives
 */

pub mod limits;
pub mod serde;
pub mod sync;

// Re-export for convenience
pub use sync::{Interrupted, InterruptToken, SyncGate, WakeResult};

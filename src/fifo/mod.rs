/*!
 * FIFO Module
 * Bounded byte queue device: ring storage, blocking channel, text front-end
 */

pub mod channel;
pub mod device;
pub mod ring;
pub mod traits;
pub mod types;

// Re-export public API
pub use channel::{ChannelSnapshot, FifoChannel};
pub use device::FifoDevice;
pub use ring::{ByteRing, RingFull};
pub use traits::CharDevice;
pub use types::{DeviceConfig, DeviceError, DeviceResult, DeviceStats, WriteReport};

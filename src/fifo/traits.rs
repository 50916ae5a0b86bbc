/*!
 * Device Traits
 * Adapter-facing contract for the queue device
 */

use super::types::DeviceResult;

/// Character-device style interface.
///
/// The narrow contract a transport adapter drives: text payloads in, rendered
/// text out. Blocking stays behind the implementation; adapters that need
/// cancellable calls use the device's inherent `*_interruptible` methods.
pub trait CharDevice: Send + Sync {
    /// Parse one payload and transfer its values into the queue.
    ///
    /// Returns the payload bytes consumed. The whole payload counts as
    /// consumed even when sub-tokens were rejected; rejections are logged
    /// and skipped, never surfaced as a short count.
    fn write(&self, payload: &[u8]) -> DeviceResult<usize>;

    /// Drain exactly `count` elements, blocking until each is available.
    ///
    /// Values are rendered as ASCII decimal, each followed by one space,
    /// concatenated in transfer order.
    fn read(&self, count: usize) -> DeviceResult<String>;
}

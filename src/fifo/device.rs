/*!
 * FIFO Device
 * Text front-end over the shared channel: parsing, read-count state, rendering
 */

use super::channel::FifoChannel;
use super::traits::CharDevice;
use super::types::{DeviceConfig, DeviceError, DeviceResult, DeviceStats, WriteReport};
use crate::core::sync::InterruptToken;
use crate::parser::{parse_payload, WriteCommand};
use log::info;
use std::fmt::Write as _;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// The queue device: one bounded byte queue plus the text grammar feeding it.
///
/// A single instance is created at process start and injected into the
/// transport adapter; clones share the queue and the read count. Writes parse
/// the payload and push each value through the blocking channel one at a time,
/// so a multi-value write interleaves with concurrent callers instead of
/// landing atomically. Reads drain values one at a time and render them as
/// decimal text.
pub struct FifoDevice {
    channel: FifoChannel,
    read_count: Arc<AtomicI64>,
    max_write_bytes: usize,
}

impl FifoDevice {
    /// Create a device with the default 16-slot queue
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DeviceConfig::default())
    }

    /// Create a device from tunables, clamping out-of-range fields
    #[must_use]
    pub fn with_config(config: DeviceConfig) -> Self {
        let config = config.validated();
        info!(
            "FIFO device initialized (capacity: {}, read count: {})",
            config.capacity, config.initial_read_count
        );
        Self {
            channel: FifoChannel::new(config.capacity),
            read_count: Arc::new(AtomicI64::new(config.initial_read_count)),
            max_write_bytes: config.max_write_bytes,
        }
    }

    /// Parse one payload and transfer its values, blocking on a full queue.
    ///
    /// Equivalent to [`FifoDevice::write_interruptible`] with a token nobody
    /// can raise.
    pub fn write(&self, payload: &[u8]) -> DeviceResult<WriteReport> {
        self.write_interruptible(payload, &InterruptToken::new())
    }

    /// Parse one payload and transfer its values, aborting if `intr` is
    /// raised.
    ///
    /// The payload bound is enforced before any parsing or queue mutation.
    /// A `num=<n>` directive replaces the read count and transfers nothing;
    /// any other payload is scanned for value literals, each pushed in payload
    /// order. An interruption mid-batch returns the retryable error while
    /// values already pushed stay committed.
    pub fn write_interruptible(
        &self,
        payload: &[u8],
        intr: &InterruptToken,
    ) -> DeviceResult<WriteReport> {
        if payload.len() > self.max_write_bytes {
            return Err(DeviceError::PayloadTooLarge {
                len: payload.len(),
                max: self.max_write_bytes,
            });
        }

        match parse_payload(trim_payload(payload)) {
            WriteCommand::SetReadCount(count) => {
                self.read_count.store(count, Ordering::Release);
                info!("Read count changed to {}", count);
                Ok(WriteReport::directive(payload.len(), count))
            }
            WriteCommand::Enqueue { values, rejected } => {
                let mut queued = 0usize;
                let mut dropped = 0usize;
                for value in values.iter() {
                    if self.channel.push(value, intr)? {
                        queued += 1;
                    } else {
                        dropped += 1;
                    }
                }
                info!(
                    "Write consumed {} bytes: {} queued, {} rejected, {} dropped",
                    payload.len(),
                    queued,
                    rejected,
                    dropped
                );
                Ok(WriteReport::enqueued(payload.len(), queued, rejected, dropped))
            }
        }
    }

    /// Drain the current read count's worth of elements and render them.
    ///
    /// A read count of zero or below drains nothing and returns empty text;
    /// the stored value itself is kept raw (observable via
    /// [`FifoDevice::read_count`]).
    pub fn read(&self) -> DeviceResult<String> {
        self.read_interruptible(&InterruptToken::new())
    }

    /// Interruptible twin of [`FifoDevice::read`]
    pub fn read_interruptible(&self, intr: &InterruptToken) -> DeviceResult<String> {
        let count = self.read_count.load(Ordering::Acquire).max(0) as usize;
        self.drain(count, intr)
    }

    /// Drain exactly `count` elements, blocking until each is available
    pub fn read_exact(&self, count: usize) -> DeviceResult<String> {
        self.drain(count, &InterruptToken::new())
    }

    /// Interruptible twin of [`FifoDevice::read_exact`]
    pub fn read_exact_interruptible(
        &self,
        count: usize,
        intr: &InterruptToken,
    ) -> DeviceResult<String> {
        self.drain(count, intr)
    }

    fn drain(&self, count: usize, intr: &InterruptToken) -> DeviceResult<String> {
        let mut out = String::new();
        let mut drained = 0usize;
        for _ in 0..count {
            match self.channel.pop(intr)? {
                Some(value) => {
                    // Rendering contract: decimal then one space, per element
                    let _ = write!(out, "{} ", value);
                    drained += 1;
                }
                // Post-wait re-check saw an empty ring; end the drain early
                None => break,
            }
        }
        info!("Read drained {} of {} requested values", drained, count);
        Ok(out)
    }

    /// Raise a caller's token and wake its blocked waiters.
    ///
    /// Elements transferred before the interruption stay committed; the
    /// aborted caller gets [`DeviceError::Interrupted`] and may clear the
    /// token and reissue the call.
    pub fn interrupt(&self, intr: &InterruptToken) {
        self.channel.interrupt(intr);
    }

    /// The raw stored read count, including out-of-range directives
    #[must_use]
    pub fn read_count(&self) -> i64 {
        self.read_count.load(Ordering::Acquire)
    }

    /// Capture queue indices, transfer counters, and waiter counts
    #[must_use]
    pub fn stats(&self) -> DeviceStats {
        let snapshot = self.channel.snapshot();
        DeviceStats {
            capacity: snapshot.capacity,
            occupied: snapshot.occupied,
            head: snapshot.head,
            tail: snapshot.tail,
            pushed: snapshot.pushed,
            popped: snapshot.popped,
            dropped: snapshot.dropped,
            read_count: self.read_count(),
            push_waiters: self.channel.push_waiters(),
            pop_waiters: self.channel.pop_waiters(),
        }
    }
}

impl Default for FifoDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for FifoDevice {
    fn clone(&self) -> Self {
        Self {
            channel: self.channel.clone(),
            read_count: Arc::clone(&self.read_count), // Share directive state across clones
            max_write_bytes: self.max_write_bytes,
        }
    }
}

impl std::fmt::Debug for FifoDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FifoDevice")
            .field("channel", &self.channel)
            .field("read_count", &self.read_count())
            .finish()
    }
}

// Implement CharDevice trait
impl CharDevice for FifoDevice {
    fn write(&self, payload: &[u8]) -> DeviceResult<usize> {
        self.write(payload).map(|report| report.consumed)
    }

    fn read(&self, count: usize) -> DeviceResult<String> {
        self.read_exact(count)
    }
}

/// Truncate at the first NUL and drop one trailing newline, the shape
/// line-oriented transports deliver payloads in
fn trim_payload(payload: &[u8]) -> &[u8] {
    let text = match payload.iter().position(|&b| b == 0) {
        Some(nul) => &payload[..nul],
        None => payload,
    };
    text.strip_suffix(b"\n").unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read_renders_decimal() {
        let device = FifoDevice::new();

        let report = device.write(b"0b00000101;0b00001010").unwrap();
        assert_eq!(report.consumed, 21);
        assert_eq!(report.queued, 2);
        assert_eq!(report.rejected, 0);

        assert_eq!(device.read_exact(2).unwrap(), "5 10 ");
    }

    #[test]
    fn test_directive_updates_read_count() {
        let device = FifoDevice::new();
        assert_eq!(device.read_count(), 1);

        let report = device.write(b"num=3").unwrap();
        assert_eq!(report.read_count, Some(3));
        assert_eq!(report.queued, 0);
        assert_eq!(device.read_count(), 3);
    }

    #[test]
    fn test_read_drains_read_count_elements() {
        let device = FifoDevice::new();
        device.write(b"num=2").unwrap();
        device.write(b"0b00000001;0b00000010;0b00000011").unwrap();

        assert_eq!(device.read().unwrap(), "1 2 ");
        assert_eq!(device.stats().occupied, 1);
    }

    #[test]
    fn test_read_count_zero_drains_nothing() {
        let device = FifoDevice::new();
        device.write(b"0b00000001").unwrap();
        device.write(b"num=0").unwrap();

        assert_eq!(device.read().unwrap(), "");
        assert_eq!(device.stats().occupied, 1);
    }

    #[test]
    fn test_negative_read_count_behaves_like_zero() {
        let device = FifoDevice::new();
        device.write(b"0b00000001").unwrap();
        device.write(b"num=-4").unwrap();

        assert_eq!(device.read_count(), -4);
        assert_eq!(device.read().unwrap(), "");
        assert_eq!(device.stats().occupied, 1);
    }

    #[test]
    fn test_oversized_payload_rejected_before_queue_mutation() {
        let device = FifoDevice::new();
        let payload = vec![b'1'; 65];

        let err = device.write(&payload).unwrap_err();
        assert_eq!(err, DeviceError::PayloadTooLarge { len: 65, max: 64 });
        assert_eq!(device.stats().occupied, 0);
    }

    #[test]
    fn test_rejected_tokens_reported_not_fatal() {
        let device = FifoDevice::new();

        let report = device.write(b"0b00000001;junk;0b00000010").unwrap();
        assert_eq!(report.queued, 2);
        assert_eq!(report.rejected, 1);
        assert_eq!(report.consumed, 26);

        assert_eq!(device.read_exact(2).unwrap(), "1 2 ");
    }

    #[test]
    fn test_payload_trimmed_at_nul_and_newline() {
        let device = FifoDevice::new();

        assert_eq!(device.write(b"0b00000001\n").unwrap().queued, 1);
        assert_eq!(device.write(b"0b00000010\0;ignored").unwrap().queued, 1);
        assert_eq!(device.write(b"num=5\n").unwrap().read_count, Some(5));

        assert_eq!(device.read_exact(2).unwrap(), "1 2 ");
    }

    #[test]
    fn test_clones_share_queue_and_read_count() {
        let device = FifoDevice::new();
        let clone = device.clone();

        device.write(b"num=2").unwrap();
        assert_eq!(clone.read_count(), 2);

        device.write(b"0b00001111;0b11110000").unwrap();
        assert_eq!(clone.read().unwrap(), "15 240 ");
    }

    #[test]
    fn test_interrupted_write_is_retryable() {
        let device = FifoDevice::new();
        let intr = InterruptToken::new();

        device.interrupt(&intr);
        let err = device
            .write_interruptible(b"0b00000001", &intr)
            .unwrap_err();
        assert!(matches!(err, DeviceError::Interrupted(_)));
        assert_eq!(device.stats().occupied, 0);

        intr.clear();
        assert_eq!(
            device.write_interruptible(b"0b00000001", &intr).unwrap().queued,
            1
        );
    }

    #[test]
    fn test_trait_narrows_write_to_consumed_bytes() {
        let device = FifoDevice::new();
        let dev: &dyn CharDevice = &device;

        assert_eq!(dev.write(b"0b00000101;0b00001010").unwrap(), 21);
        assert_eq!(dev.read(2).unwrap(), "5 10 ");
    }

    #[test]
    fn test_stats_track_indices_and_counters() {
        let device = FifoDevice::with_config(DeviceConfig {
            capacity: 4,
            ..Default::default()
        });

        device.write(b"0b00000001;0b00000010;0b00000011").unwrap();
        device.read_exact(1).unwrap();

        let stats = device.stats();
        assert_eq!(stats.capacity, 4);
        assert_eq!(stats.occupied, 2);
        assert_eq!(stats.head, 1);
        assert_eq!(stats.tail, 3);
        assert_eq!(stats.pushed, 3);
        assert_eq!(stats.popped, 1);
        assert_eq!(stats.dropped, 0);
    }

    #[test]
    fn test_empty_queue_read_exact_zero_is_empty_text() {
        let device = FifoDevice::new();
        assert_eq!(device.read_exact(0).unwrap(), "");
    }
}

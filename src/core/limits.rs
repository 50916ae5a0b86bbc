/*!
 * Protocol Limits and Constants
 *
 * Centralized location for the queue and parser constants.
 * Values are grouped by domain; each carries a short rationale.
 */

// =============================================================================
// QUEUE LIMITS
// =============================================================================

/// Default ring capacity in byte slots (16)
/// Matches the device's historical buffer size; small enough that full/empty
/// transitions are easy to exercise under contention
pub const FIFO_CAPACITY: usize = 16;

/// Upper bound for configurable ring capacity (4KB)
/// Capacities above this are clamped at construction
pub const MAX_FIFO_CAPACITY: usize = 4096;

// =============================================================================
// WRITE PAYLOAD LIMITS
// =============================================================================

/// Maximum accepted write payload, terminator included (64 bytes)
/// Payloads longer than this are rejected before any parsing or queue mutation
pub const MAX_WRITE_BYTES: usize = 64;

/// Width of one binary value field in characters (8)
/// Every value literal encodes exactly one byte
pub const VALUE_BIT_WIDTH: usize = 8;

/// Full length of a well-formed value token: literal prefix plus bit field (10)
pub const VALUE_TOKEN_LEN: usize = VALUE_LITERAL_PREFIX.len() + VALUE_BIT_WIDTH;

/// Literal prefix every value token must carry directly before its bit field
pub const VALUE_LITERAL_PREFIX: &[u8] = b"0b";

/// Prefix selecting the read-count control directive
pub const DIRECTIVE_PREFIX: &[u8] = b"num=";

/// Separator between value tokens in one payload
pub const TOKEN_SEPARATOR: u8 = b';';

/// Most values one parsed payload may carry (16)
/// A 64-byte payload cannot reach this bound; it is kept as an explicit cap so
/// the pending-value scratch buffer never grows
pub const MAX_PENDING_VALUES: usize = 16;

// =============================================================================
// READ DEFAULTS
// =============================================================================

/// Elements one read call drains unless a `num=` directive changed it (1)
pub const DEFAULT_READ_COUNT: i64 = 1;

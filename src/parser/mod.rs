/*!
 * Command Parser
 * Stateless translation of write payloads into queue commands
 */

mod scan;
mod types;

pub use scan::parse_payload;
pub use types::{PendingValues, TokenError, WriteCommand};

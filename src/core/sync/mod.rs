/*!
 * Synchronization Primitives
 *
 * The exclusive permit and the two broadcast wait conditions coordinating
 * queue access, plus the interrupt tokens that make every wait cancellable.
 *
 * # Architecture
 *
 * `SyncGate` owns the guarded state; callers acquire the permit, loop on a
 * predicate around the interruptible waits, and broadcast the opposite
 * condition after mutating. `InterruptToken` models a pending signal: raised
 * through the gate, observed by parked waiters on wake.
 */

mod gate;
mod interrupt;

pub use gate::{SyncGate, WakeResult};
pub use interrupt::{Interrupted, InterruptToken};

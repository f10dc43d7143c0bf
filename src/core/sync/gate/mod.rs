/*!
 * Gate Primitives
 *
 * The building blocks the reader-writer lock is composed from:
 * - Exclusion gate (ownerless binary lock for reader/writer exclusion)
 * - Turnstile (reentrant gate for the first-reader decision)
 * - Writer-waiting gate (broadcast signal for write preference)
 */

mod exclusion;
mod turnstile;
mod writer;

pub use exclusion::ExclusionGate;
pub use turnstile::{Turnstile, TurnstilePass};
pub use writer::{WaitingWriter, WriterWaitingGate};

/*!
 * Monitoring
 * Structured tracing setup for applications and tests
 */

mod tracer;

pub use tracer::{init_test_tracing, init_tracing};

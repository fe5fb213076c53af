pub mod categorize;
pub mod credit_score;
pub mod ledger;
pub mod risk;
pub mod scoring;
pub mod tax;

use std::time::Instant;

/// Microseconds since `start`, for the output envelope.
pub(crate) fn elapsed_us(start: Instant) -> u64 {
    start.elapsed().as_micros() as u64
}

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates and ratios expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

/// Round to the nearest integer, with halves going towards positive infinity.
///
/// This is the rounding dashboards apply to displayed scores and amounts:
/// `2.5 -> 3`, `-2.5 -> -2`.
pub fn round_half_up(value: Decimal) -> Decimal {
    match value.checked_add(dec!(0.5)) {
        Some(shifted) => shifted.floor(),
        None => value.floor(),
    }
}

/// `numerator / denominator`, pinned to `Decimal::MAX` or `Decimal::MIN` when
/// the quotient overflows. A zero denominator yields zero.
pub fn saturating_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    match numerator.checked_div(denominator) {
        Some(quotient) => quotient,
        None if denominator.is_zero() => Decimal::ZERO,
        None if numerator.is_sign_negative() == denominator.is_sign_negative() => Decimal::MAX,
        None => Decimal::MIN,
    }
}

/// Round to `dp` decimal places, halves away from zero.
pub fn round_dp_half_away(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Render a value with exactly `dp` decimal places (zero padded).
pub fn format_dp(value: Decimal, dp: u32) -> String {
    format!("{:.*}", dp as usize, round_dp_half_away(value, dp))
}

//! Financial health scoring.
//!
//! Four sub-metrics are each mapped onto 0..100 by a piecewise-linear curve,
//! combined with fixed weights and then subjected to two overrides:
//! 1. **Ceiling** -- less than 3 months of emergency cover caps the score at 80.
//! 2. **Tier floor** -- less than 1 month of cover can never be `Low` risk.

pub mod curves;
pub mod health;

pub use health::{
    calculate_financial_score, classify_risk, RiskLevel, ScoreBreakdown, ScoringInput,
    ScoringResult,
};

//! Simulated 300-900 credit score from five bureau-style factors.
//!
//! A 300 floor plus payment history (up to 350), utilization (300, decaying
//! past 30%), credit age (150, full at 120 months), credit mix (100) and
//! recent inquiries (100, minus 20 each). The sum is rounded and clamped to
//! 300..=900.

pub mod simulator;

pub use simulator::{
    calculate_credit_score, rating, tips, CreditFactors, CreditRating, CreditScoreBreakdown,
    CreditScoreResult, MAX_CREDIT_SCORE, MIN_CREDIT_SCORE,
};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::curves::{burn_rate_curve, debt_curve, emergency_curve, savings_curve};
use crate::types::{round_half_up, saturating_div, Money};

const SAVINGS_WEIGHT: Decimal = dec!(0.30);
const BURN_RATE_WEIGHT: Decimal = dec!(0.20);
const EMERGENCY_WEIGHT: Decimal = dec!(0.35);
const DEBT_WEIGHT: Decimal = dec!(0.15);

/// Below this many months of cover the score cannot exceed `THIN_COVER_CEILING`.
const THIN_COVER_MONTHS: Decimal = dec!(3);
const THIN_COVER_CEILING: Decimal = dec!(80);
/// Below this many months of cover the tier cannot be `Low`.
const CRITICAL_COVER_MONTHS: Decimal = dec!(1);

const MISSING_INCOME_SUGGESTION: &str = "Income is required to calculate score.";

// ---------------------------------------------------------------------------
// Input / Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringInput {
    pub monthly_income: Money,
    pub total_expenses: Money,
    /// Caller's monthly savings. Recomputed from income and expenses, so this
    /// is only checked for consistency.
    #[serde(default)]
    pub savings: Money,
    /// Emergency fund balance.
    pub emergency_fund: Money,
    /// Total outstanding debt.
    #[serde(default)]
    pub debt: Money,
}

impl ScoringInput {
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let calculated = self.monthly_income.saturating_sub(self.total_expenses);
        if self.savings != calculated {
            warnings.push(format!(
                "Supplied savings ({}) differ from income minus expenses ({}); the latter is used.",
                self.savings, calculated
            ));
        }
        if self.emergency_fund < Decimal::ZERO || self.debt < Decimal::ZERO {
            warnings.push("Negative balances are outside the scoring contract; sub-scores are clamped.".into());
        }
        warnings
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Moderate => write!(f, "Moderate"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub savings_score: u8,
    pub emergency_score: u8,
    pub debt_score: u8,
    pub burn_rate_score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub score: u8,
    pub risk_level: RiskLevel,
    pub improvement_suggestions: Vec<String>,
    pub breakdown: ScoreBreakdown,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Weighted 0-100 financial health score with a three-tier risk classification.
pub fn calculate_financial_score(input: &ScoringInput) -> ScoringResult {
    if input.monthly_income <= Decimal::ZERO {
        debug!("monthly income is not positive; score short-circuits to zero");
        return ScoringResult {
            score: 0,
            risk_level: RiskLevel::High,
            improvement_suggestions: vec![MISSING_INCOME_SUGGESTION.to_string()],
            breakdown: ScoreBreakdown::default(),
        };
    }

    let income = input.monthly_income;
    let expenses = input.total_expenses;
    let calculated_savings = income.saturating_sub(expenses);

    let savings = savings_curve(saturating_div(calculated_savings, income));
    let burn_rate = burn_rate_curve(saturating_div(expenses, income));

    let effective_expenses = if expenses > Decimal::ZERO {
        expenses
    } else {
        Decimal::ONE
    };
    let emergency_months = saturating_div(input.emergency_fund, effective_expenses);
    let emergency = emergency_curve(emergency_months);

    // Income is positive here, so the annual figure is too
    let annual_income = income.saturating_mul(dec!(12));
    let debt_ratio = saturating_div(input.debt, annual_income);
    let debt = debt_curve(debt_ratio);

    trace!(
        savings = %savings.score,
        burn_rate = %burn_rate.score,
        emergency = %emergency.score,
        debt = %debt.score,
        %emergency_months,
        "sub-scores"
    );

    let improvement_suggestions: Vec<String> = [savings, burn_rate, emergency, debt]
        .iter()
        .filter_map(|point| point.suggestion)
        .map(str::to_string)
        .collect();

    let mut total = savings.score * SAVINGS_WEIGHT
        + burn_rate.score * BURN_RATE_WEIGHT
        + emergency.score * EMERGENCY_WEIGHT
        + debt.score * DEBT_WEIGHT;

    if emergency_months < THIN_COVER_MONTHS {
        total = total.min(THIN_COVER_CEILING);
    }

    let score = to_score(total);
    let risk_level = classify_risk(score, emergency_months);

    debug!(score, %risk_level, "calculated financial score");

    ScoringResult {
        score,
        risk_level,
        improvement_suggestions,
        breakdown: ScoreBreakdown {
            savings_score: to_score(savings.score),
            emergency_score: to_score(emergency.score),
            debt_score: to_score(debt.score),
            burn_rate_score: to_score(burn_rate.score),
        },
    }
}

/// Tier for a final score, with thin emergency cover barred from `Low`.
///
/// The score itself is not adjusted, so a high score can carry a
/// `Moderate` tier.
pub fn classify_risk(score: u8, emergency_months: Decimal) -> RiskLevel {
    let tier = if score >= 80 {
        RiskLevel::Low
    } else if score >= 50 {
        RiskLevel::Moderate
    } else {
        RiskLevel::High
    };

    if emergency_months < CRITICAL_COVER_MONTHS && tier == RiskLevel::Low {
        RiskLevel::Moderate
    } else {
        tier
    }
}

fn to_score(value: Decimal) -> u8 {
    round_half_up(value)
        .clamp(Decimal::ZERO, dec!(100))
        .to_u8()
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub const SAVINGS_DEFICIT_SUGGESTION: &str = "Expenses exceed income. Reduce spending immediately.";
pub const SAVINGS_LOW_SUGGESTION: &str = "Try to save at least 20% of your income.";
pub const BURN_RATE_SUGGESTION: &str =
    "High burn rate! Expenses are consuming too much of your income.";
pub const EMERGENCY_LOW_SUGGESTION: &str = "Build emergency fund to cover at least 3-6 months.";
pub const EMERGENCY_CRITICAL_SUGGESTION: &str =
    "CRITICAL: Emergency fund is less than 1 month. Prioritize savings.";
pub const DEBT_HIGH_SUGGESTION: &str =
    "Total debt is high relative to annual income. Focus on paying down debt.";

/// A sub-score on the 0..100 scale plus the suggestion its curve emitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    pub score: Decimal,
    pub suggestion: Option<&'static str>,
}

impl CurvePoint {
    fn plain(score: Decimal) -> Self {
        Self {
            score,
            suggestion: None,
        }
    }

    fn with(score: Decimal, suggestion: &'static str) -> Self {
        Self {
            score,
            suggestion: Some(suggestion),
        }
    }
}

/// Linear interpolation of `x` from `[x0, x1]` onto `[y0, y1]`.
///
/// Multiplication precedes division so exact midpoints (e.g. 62.5) are not
/// perturbed by a repeating quotient.
fn lerp(x: Decimal, x0: Decimal, x1: Decimal, y0: Decimal, y1: Decimal) -> Decimal {
    y0 + (x - x0) * (y1 - y0) / (x1 - x0)
}

/// Savings ratio = (income - expenses) / income.
pub fn savings_curve(ratio: Decimal) -> CurvePoint {
    if ratio >= dec!(0.40) {
        CurvePoint::plain(dec!(100))
    } else if ratio >= dec!(0.20) {
        CurvePoint::plain(lerp(ratio, dec!(0.20), dec!(0.40), dec!(50), dec!(99)))
    } else if ratio > Decimal::ZERO {
        CurvePoint::with(
            lerp(ratio, Decimal::ZERO, dec!(0.20), Decimal::ZERO, dec!(49)),
            SAVINGS_LOW_SUGGESTION,
        )
    } else {
        CurvePoint::with(Decimal::ZERO, SAVINGS_DEFICIT_SUGGESTION)
    }
}

/// Burn rate = expenses / income.
pub fn burn_rate_curve(burn_rate: Decimal) -> CurvePoint {
    if burn_rate <= dec!(0.70) {
        CurvePoint::plain(dec!(100))
    } else if burn_rate <= dec!(0.85) {
        CurvePoint::plain(lerp(burn_rate, dec!(0.70), dec!(0.85), dec!(99), dec!(50)))
    } else if burn_rate >= Decimal::ONE {
        CurvePoint::with(Decimal::ZERO, BURN_RATE_SUGGESTION)
    } else {
        CurvePoint::with(
            lerp(burn_rate, dec!(0.85), Decimal::ONE, dec!(49), Decimal::ZERO),
            BURN_RATE_SUGGESTION,
        )
    }
}

/// Emergency cover in months of expenses.
pub fn emergency_curve(months: Decimal) -> CurvePoint {
    if months >= dec!(6) {
        CurvePoint::plain(dec!(100))
    } else if months >= dec!(3) {
        CurvePoint::plain(lerp(months, dec!(3), dec!(6), dec!(50), dec!(99)))
    } else if months >= Decimal::ONE {
        CurvePoint::with(
            lerp(months, Decimal::ONE, dec!(3), dec!(20), dec!(49)),
            EMERGENCY_LOW_SUGGESTION,
        )
    } else {
        CurvePoint::with(months.saturating_mul(dec!(19)), EMERGENCY_CRITICAL_SUGGESTION)
    }
}

/// Debt-to-annual-income ratio.
pub fn debt_curve(ratio: Decimal) -> CurvePoint {
    if ratio <= dec!(0.10) {
        CurvePoint::plain(dec!(100))
    } else if ratio <= dec!(0.40) {
        CurvePoint::plain(lerp(ratio, dec!(0.10), dec!(0.40), dec!(99), dec!(70)))
    } else if ratio <= Decimal::ONE {
        CurvePoint::plain(lerp(ratio, dec!(0.40), Decimal::ONE, dec!(69), dec!(30)))
    } else {
        // Decays by 10 points per whole multiple of annual income
        let decayed = dec!(29).saturating_sub((ratio - Decimal::ONE).saturating_mul(dec!(10)));
        CurvePoint::with(decayed.max(Decimal::ZERO), DEBT_HIGH_SUGGESTION)
    }
}

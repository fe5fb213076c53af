use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{round_half_up, saturating_div, Rate};

pub const MIN_CREDIT_SCORE: u16 = 300;
pub const MAX_CREDIT_SCORE: u16 = 900;

const PAYMENT_POINTS: Decimal = dec!(350);
const UTILIZATION_POINTS: Decimal = dec!(300);
/// Utilization (percent) up to which the full utilization points are kept.
const UTILIZATION_FREE_PCT: Decimal = dec!(30);
/// Points lost per utilization percent above the free band.
const UTILIZATION_DECAY: Decimal = dec!(4);
const AGE_POINTS: Decimal = dec!(150);
/// Account age in months that earns the full age points.
const AGE_FULL_MONTHS: Decimal = dec!(120);
const MIX_POINTS: Decimal = dec!(100);
const INQUIRY_POINTS: Decimal = dec!(100);
const INQUIRY_PENALTY: Decimal = dec!(20);

const EXCELLENT_FLOOR: u16 = 750;
const GOOD_FLOOR: u16 = 650;
const FAIR_FLOOR: u16 = 550;

pub const PAYMENT_TIP: &str = "Pay all EMIs/bills on time to improve payment history";
pub const UTILIZATION_TIP: &str = "Keep credit utilization below 30% for better score";
pub const AGE_TIP: &str = "Older credit accounts positively impact your score";
pub const INQUIRY_TIP: &str = "Reduce loan/credit card applications to avoid inquiries";
pub const MIX_TIP: &str = "Maintain a healthy mix of secured and unsecured credit";
pub const HEALTHY_TIP: &str = "Excellent! Keep maintaining these healthy credit habits";

// ---------------------------------------------------------------------------
// Input / Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditFactors {
    /// Share of payments made on time, in percent (0-100).
    pub payment_history: Rate,
    /// Revolving balance over limit, in percent (0-100).
    pub credit_utilization: Rate,
    /// Age of the credit history in months.
    pub credit_age_months: Decimal,
    /// Quality of the secured/unsecured mix, 0-100.
    pub credit_mix: Rate,
    /// Hard inquiries in the recent window.
    #[serde(default)]
    pub recent_inquiries: u32,
}

impl CreditFactors {
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        for (field, value) in [
            ("payment_history", self.payment_history),
            ("credit_utilization", self.credit_utilization),
            ("credit_mix", self.credit_mix),
        ] {
            if value < Decimal::ZERO || value > dec!(100) {
                warnings.push(format!("{field} of {value} is outside 0-100."));
            }
        }
        if self.credit_age_months < Decimal::ZERO {
            warnings.push("Negative credit age lowers the score below its floor contribution.".into());
        }
        warnings
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreditRating {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl std::fmt::Display for CreditRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreditRating::Excellent => write!(f, "Excellent"),
            CreditRating::Good => write!(f, "Good"),
            CreditRating::Fair => write!(f, "Fair"),
            CreditRating::Poor => write!(f, "Poor"),
        }
    }
}

/// Points earned per factor, before the 300 floor is added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditScoreBreakdown {
    pub payment_points: Decimal,
    pub utilization_points: Decimal,
    pub age_points: Decimal,
    pub mix_points: Decimal,
    pub inquiry_points: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditScoreResult {
    pub score: u16,
    pub rating: CreditRating,
    pub tips: Vec<String>,
    pub breakdown: CreditScoreBreakdown,
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

fn breakdown(factors: &CreditFactors) -> CreditScoreBreakdown {
    let payment_points =
        saturating_div(factors.payment_history, dec!(100)).saturating_mul(PAYMENT_POINTS);

    let utilization_points = if factors.credit_utilization <= UTILIZATION_FREE_PCT {
        UTILIZATION_POINTS
    } else {
        let excess = factors.credit_utilization - UTILIZATION_FREE_PCT;
        UTILIZATION_POINTS
            .saturating_sub(excess.saturating_mul(UTILIZATION_DECAY))
            .max(Decimal::ZERO)
    };

    let age_points = saturating_div(factors.credit_age_months, AGE_FULL_MONTHS)
        .saturating_mul(AGE_POINTS)
        .min(AGE_POINTS);

    let mix_points = saturating_div(factors.credit_mix, dec!(100)).saturating_mul(MIX_POINTS);

    let inquiry_points = INQUIRY_POINTS
        .saturating_sub(Decimal::from(factors.recent_inquiries).saturating_mul(INQUIRY_PENALTY))
        .max(Decimal::ZERO);

    CreditScoreBreakdown {
        payment_points,
        utilization_points,
        age_points,
        mix_points,
        inquiry_points,
    }
}

/// Simulated credit score, its rating band and improvement tips.
pub fn calculate_credit_score(factors: &CreditFactors) -> CreditScoreResult {
    let breakdown = breakdown(factors);
    let raw = Decimal::from(MIN_CREDIT_SCORE)
        .saturating_add(breakdown.payment_points)
        .saturating_add(breakdown.utilization_points)
        .saturating_add(breakdown.age_points)
        .saturating_add(breakdown.mix_points)
        .saturating_add(breakdown.inquiry_points);

    let score = round_half_up(raw)
        .clamp(
            Decimal::from(MIN_CREDIT_SCORE),
            Decimal::from(MAX_CREDIT_SCORE),
        )
        .to_u16()
        .unwrap_or(MIN_CREDIT_SCORE);
    let rating = rating(score);

    debug!(score, %rating, "calculated credit score");

    CreditScoreResult {
        score,
        rating,
        tips: tips(factors).into_iter().map(str::to_string).collect(),
        breakdown,
    }
}

pub fn rating(score: u16) -> CreditRating {
    if score >= EXCELLENT_FLOOR {
        CreditRating::Excellent
    } else if score >= GOOD_FLOOR {
        CreditRating::Good
    } else if score >= FAIR_FLOOR {
        CreditRating::Fair
    } else {
        CreditRating::Poor
    }
}

/// Advice for each weak factor; a single encouragement when none are weak.
pub fn tips(factors: &CreditFactors) -> Vec<&'static str> {
    let mut tips = Vec::new();
    if factors.payment_history < dec!(95) {
        tips.push(PAYMENT_TIP);
    }
    if factors.credit_utilization > UTILIZATION_FREE_PCT {
        tips.push(UTILIZATION_TIP);
    }
    if factors.credit_age_months < dec!(24) {
        tips.push(AGE_TIP);
    }
    if factors.recent_inquiries > 3 {
        tips.push(INQUIRY_TIP);
    }
    if factors.credit_mix < dec!(60) {
        tips.push(MIX_TIP);
    }
    if tips.is_empty() {
        tips.push(HEALTHY_TIP);
    }
    tips
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn factors(
        payment: Decimal,
        utilization: Decimal,
        age: Decimal,
        mix: Decimal,
        inquiries: u32,
    ) -> CreditFactors {
        CreditFactors {
            payment_history: payment,
            credit_utilization: utilization,
            credit_age_months: age,
            credit_mix: mix,
            recent_inquiries: inquiries,
        }
    }

    #[test]
    fn test_default_simulator_profile() {
        // 300 + 315 + 300 + 45 + 70 + 60 = 1090, clamped
        let result = calculate_credit_score(&factors(dec!(90), dec!(30), dec!(36), dec!(70), 2));
        assert_eq!(result.score, 900);
        assert_eq!(result.rating, CreditRating::Excellent);
        assert_eq!(
            result.breakdown,
            CreditScoreBreakdown {
                payment_points: dec!(315),
                utilization_points: dec!(300),
                age_points: dec!(45),
                mix_points: dec!(70),
                inquiry_points: dec!(60),
            }
        );
        assert_eq!(result.tips, vec![PAYMENT_TIP.to_string()]);
    }

    #[test]
    fn test_utilization_decays_past_30_percent() {
        let f = factors(dec!(0), dec!(80), dec!(0), dec!(0), 5);
        let result = calculate_credit_score(&f);
        // 300 + 0 + (300 - 200) + 0 + 0 + 0
        assert_eq!(result.breakdown.utilization_points, dec!(100));
        assert_eq!(result.breakdown.inquiry_points, Decimal::ZERO);
        assert_eq!(result.score, 400);
        assert_eq!(result.rating, CreditRating::Poor);

        let full = calculate_credit_score(&factors(dec!(0), dec!(100), dec!(0), dec!(0), 0));
        assert_eq!(full.breakdown.utilization_points, dec!(20));
    }

    #[test]
    fn test_age_points_cap_at_ten_years() {
        let young = calculate_credit_score(&factors(dec!(0), dec!(100), dec!(60), dec!(0), 5));
        assert_eq!(young.breakdown.age_points, dec!(75));
        let old = calculate_credit_score(&factors(dec!(0), dec!(100), dec!(600), dec!(0), 5));
        assert_eq!(old.breakdown.age_points, dec!(150));
    }

    #[test]
    fn test_score_rounds_half_up() {
        // 300 + 1.75 + 20 + 0 + 0.75 + 0 = 322.5
        let result = calculate_credit_score(&factors(dec!(0.5), dec!(100), dec!(0), dec!(0.75), 5));
        assert_eq!(result.score, 323);
    }

    #[test]
    fn test_floor_clamps_negative_inputs() {
        let result = calculate_credit_score(&factors(dec!(-500), dec!(100), dec!(-240), dec!(0), 9));
        assert_eq!(result.score, MIN_CREDIT_SCORE);
    }

    #[test]
    fn test_rating_bands() {
        assert_eq!(rating(750), CreditRating::Excellent);
        assert_eq!(rating(749), CreditRating::Good);
        assert_eq!(rating(650), CreditRating::Good);
        assert_eq!(rating(649), CreditRating::Fair);
        assert_eq!(rating(550), CreditRating::Fair);
        assert_eq!(rating(549), CreditRating::Poor);
        assert_eq!(rating(300), CreditRating::Poor);
    }

    #[test]
    fn test_tip_rules() {
        let weak = factors(dec!(80), dec!(45), dec!(12), dec!(40), 4);
        assert_eq!(
            tips(&weak),
            vec![PAYMENT_TIP, UTILIZATION_TIP, AGE_TIP, INQUIRY_TIP, MIX_TIP]
        );
        let strong = factors(dec!(95), dec!(30), dec!(24), dec!(60), 3);
        assert_eq!(tips(&strong), vec![HEALTHY_TIP]);
    }

    #[test]
    fn test_extremes_saturate() {
        let high = calculate_credit_score(&factors(
            Decimal::MAX,
            Decimal::MIN,
            Decimal::MAX,
            Decimal::MAX,
            u32::MAX,
        ));
        assert_eq!(high.score, MAX_CREDIT_SCORE);
        let low = calculate_credit_score(&factors(
            Decimal::MIN,
            Decimal::MAX,
            Decimal::MIN,
            Decimal::MIN,
            0,
        ));
        assert_eq!(low.score, MIN_CREDIT_SCORE);
    }

    #[test]
    fn test_warnings_flag_out_of_range_percentages() {
        assert_eq!(factors(dec!(120), dec!(30), dec!(0), dec!(50), 0).warnings().len(), 1);
        assert!(factors(dec!(90), dec!(30), dec!(36), dec!(70), 2).warnings().is_empty());
    }
}

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{format_dp, saturating_div, Money};

const BURN_RATE_THRESHOLD: Decimal = dec!(0.85);
const SAVINGS_RATIO_THRESHOLD: Decimal = dec!(0.20);
const SAVINGS_RATIO_SEVERE: Decimal = dec!(0.10);
const EMERGENCY_MONTHS_THRESHOLD: Decimal = dec!(3);
const EMERGENCY_MONTHS_SEVERE: Decimal = dec!(1);

// ---------------------------------------------------------------------------
// Input / Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskDetectionInput {
    pub monthly_income: Money,
    pub monthly_expenses: Money,
    pub monthly_savings: Money,
    pub emergency_fund: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertSeverity::Low => write!(f, "Low"),
            AlertSeverity::Medium => write!(f, "Medium"),
            AlertSeverity::High => write!(f, "High"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertType {
    #[serde(rename = "Invalid Data")]
    InvalidData,
    #[serde(rename = "High Burn Rate")]
    HighBurnRate,
    #[serde(rename = "Low Savings")]
    LowSavings,
    #[serde(rename = "Financial Vulnerability")]
    FinancialVulnerability,
    #[serde(rename = "Negative Cash Flow")]
    NegativeCashFlow,
    #[serde(rename = "Critical Financial State")]
    CriticalFinancialState,
}

impl std::fmt::Display for AlertType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AlertType::InvalidData => "Invalid Data",
            AlertType::HighBurnRate => "High Burn Rate",
            AlertType::LowSavings => "Low Savings",
            AlertType::FinancialVulnerability => "Financial Vulnerability",
            AlertType::NegativeCashFlow => "Negative Cash Flow",
            AlertType::CriticalFinancialState => "Critical Financial State",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialAlert {
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub message: String,
}

impl FinancialAlert {
    fn new(alert_type: AlertType, severity: AlertSeverity, message: String) -> Self {
        Self {
            alert_type,
            severity,
            message,
        }
    }
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Evaluate every risk rule and return the alerts that fired, in rule order.
pub fn detect_financial_risks(input: &RiskDetectionInput) -> Vec<FinancialAlert> {
    let income = input.monthly_income;
    let expenses = input.monthly_expenses;

    if income <= Decimal::ZERO {
        return vec![FinancialAlert::new(
            AlertType::InvalidData,
            AlertSeverity::High,
            "Income must be greater than zero to perform risk analysis.".into(),
        )];
    }

    let mut alerts = Vec::new();

    let expense_ratio = saturating_div(expenses, income);
    if expense_ratio > BURN_RATE_THRESHOLD {
        alerts.push(FinancialAlert::new(
            AlertType::HighBurnRate,
            AlertSeverity::High,
            format!(
                "Your expenses ({}% of income) exceed the safe limit of {}%. Consider reducing discretionary spending.",
                format_dp(expense_ratio.saturating_mul(dec!(100)), 1),
                (BURN_RATE_THRESHOLD * dec!(100)).normalize()
            ),
        ));
    }

    let savings_ratio = saturating_div(input.monthly_savings, income);
    if savings_ratio < SAVINGS_RATIO_THRESHOLD {
        let severity = if savings_ratio < SAVINGS_RATIO_SEVERE {
            AlertSeverity::High
        } else {
            AlertSeverity::Medium
        };
        alerts.push(FinancialAlert::new(
            AlertType::LowSavings,
            severity,
            format!(
                "Your savings rate ({}%) is below the recommended {}%. Aim to save at least 20% of your income.",
                format_dp(savings_ratio.saturating_mul(dec!(100)), 1),
                (SAVINGS_RATIO_THRESHOLD * dec!(100)).normalize()
            ),
        ));
    }

    // No expenses means no measurable cover
    let months_covered = if expenses > Decimal::ZERO {
        saturating_div(input.emergency_fund, expenses)
    } else {
        Decimal::ZERO
    };
    if months_covered < EMERGENCY_MONTHS_THRESHOLD {
        let severity = if months_covered < EMERGENCY_MONTHS_SEVERE {
            AlertSeverity::High
        } else {
            AlertSeverity::Medium
        };
        alerts.push(FinancialAlert::new(
            AlertType::FinancialVulnerability,
            severity,
            format!(
                "Your emergency fund covers only {} months of expenses. Build it up to at least {} months for financial security.",
                format_dp(months_covered, 1),
                EMERGENCY_MONTHS_THRESHOLD
            ),
        ));
    }

    let net_cash_flow = income.saturating_sub(expenses);
    if net_cash_flow < Decimal::ZERO {
        alerts.push(FinancialAlert::new(
            AlertType::NegativeCashFlow,
            AlertSeverity::High,
            format!(
                "You are spending more than you earn by ₹{} per month. This is unsustainable and requires immediate action.",
                format_dp(net_cash_flow.abs(), 2)
            ),
        ));
    }

    if input.monthly_savings <= Decimal::ZERO && months_covered < EMERGENCY_MONTHS_SEVERE {
        alerts.push(FinancialAlert::new(
            AlertType::CriticalFinancialState,
            AlertSeverity::High,
            "You have no monthly savings and less than 1 month of emergency funds. You are at high risk of financial distress.".into(),
        ));
    }

    debug!(alerts = alerts.len(), "detected financial risks");
    alerts
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn input(income: Decimal, expenses: Decimal, savings: Decimal, fund: Decimal) -> RiskDetectionInput {
        RiskDetectionInput {
            monthly_income: income,
            monthly_expenses: expenses,
            monthly_savings: savings,
            emergency_fund: fund,
        }
    }

    fn types(alerts: &[FinancialAlert]) -> Vec<AlertType> {
        alerts.iter().map(|a| a.alert_type).collect()
    }

    #[test]
    fn test_invalid_income_stops_evaluation() {
        let alerts = detect_financial_risks(&input(dec!(0), dec!(90000), dec!(-90000), dec!(0)));
        assert_eq!(
            alerts,
            vec![FinancialAlert {
                alert_type: AlertType::InvalidData,
                severity: AlertSeverity::High,
                message: "Income must be greater than zero to perform risk analysis.".into(),
            }]
        );
    }

    #[test]
    fn test_healthy_profile_has_no_alerts() {
        let alerts =
            detect_financial_risks(&input(dec!(100000), dec!(50000), dec!(50000), dec!(400000)));
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_burn_rate_message() {
        let alerts =
            detect_financial_risks(&input(dec!(50000), dec!(48000), dec!(2000), dec!(1000000)));
        assert_eq!(alerts[0].alert_type, AlertType::HighBurnRate);
        assert_eq!(
            alerts[0].message,
            "Your expenses (96.0% of income) exceed the safe limit of 85%. Consider reducing discretionary spending."
        );
    }

    #[test]
    fn test_burn_rate_threshold_is_exclusive() {
        let alerts =
            detect_financial_risks(&input(dec!(100000), dec!(85000), dec!(15000), dec!(1000000)));
        assert!(!types(&alerts).contains(&AlertType::HighBurnRate));
    }

    #[test]
    fn test_low_savings_severity_bands() {
        let medium =
            detect_financial_risks(&input(dec!(100000), dec!(50000), dec!(15000), dec!(1000000)));
        assert_eq!(medium.len(), 1);
        assert_eq!(medium[0].severity, AlertSeverity::Medium);
        assert_eq!(
            medium[0].message,
            "Your savings rate (15.0%) is below the recommended 20%. Aim to save at least 20% of your income."
        );

        let high =
            detect_financial_risks(&input(dec!(100000), dec!(50000), dec!(9999), dec!(1000000)));
        assert_eq!(high[0].severity, AlertSeverity::High);
    }

    #[test]
    fn test_vulnerability_severity_bands() {
        let medium =
            detect_financial_risks(&input(dec!(100000), dec!(40000), dec!(60000), dec!(80000)));
        assert_eq!(types(&medium), vec![AlertType::FinancialVulnerability]);
        assert_eq!(medium[0].severity, AlertSeverity::Medium);
        assert_eq!(
            medium[0].message,
            "Your emergency fund covers only 2.0 months of expenses. Build it up to at least 3 months for financial security."
        );

        let high =
            detect_financial_risks(&input(dec!(100000), dec!(40000), dec!(60000), dec!(20000)));
        assert_eq!(high[0].severity, AlertSeverity::High);
    }

    #[test]
    fn test_zero_expenses_count_as_no_cover() {
        let alerts =
            detect_financial_risks(&input(dec!(100000), dec!(0), dec!(100000), dec!(1000000)));
        assert_eq!(types(&alerts), vec![AlertType::FinancialVulnerability]);
        assert_eq!(alerts[0].severity, AlertSeverity::High);
    }

    #[test]
    fn test_negative_cash_flow_message() {
        let alerts =
            detect_financial_risks(&input(dec!(40000), dec!(45500.5), dec!(0), dec!(1000000)));
        let negative = alerts
            .iter()
            .find(|a| a.alert_type == AlertType::NegativeCashFlow)
            .unwrap();
        assert_eq!(
            negative.message,
            "You are spending more than you earn by ₹5500.50 per month. This is unsustainable and requires immediate action."
        );
    }

    #[test]
    fn test_all_rules_fire_in_order() {
        let alerts = detect_financial_risks(&input(dec!(40000), dec!(50000), dec!(-10000), dec!(0)));
        assert_eq!(
            types(&alerts),
            vec![
                AlertType::HighBurnRate,
                AlertType::LowSavings,
                AlertType::FinancialVulnerability,
                AlertType::NegativeCashFlow,
                AlertType::CriticalFinancialState,
            ]
        );
        assert!(alerts.iter().all(|a| a.severity == AlertSeverity::High));
    }

    #[test]
    fn test_alert_type_serializes_with_display_label() {
        let json = serde_json::to_value(AlertType::CriticalFinancialState).unwrap();
        assert_eq!(json, serde_json::json!("Critical Financial State"));
        assert_eq!(AlertType::NegativeCashFlow.to_string(), "Negative Cash Flow");
    }

    #[test]
    fn test_tiny_income_saturates_ratios() {
        let alerts = detect_financial_risks(&input(
            dec!(0.0000001),
            dec!(10000000000000000000000),
            dec!(0),
            dec!(0),
        ));
        let burn = &alerts[0];
        assert_eq!(burn.alert_type, AlertType::HighBurnRate);
        assert!(burn.message.contains(&format!("({}.0% of income)", Decimal::MAX)));
        assert!(alerts.iter().any(|a| a.alert_type == AlertType::NegativeCashFlow));
    }

    #[test]
    fn test_extreme_balances_do_not_overflow() {
        let alerts = detect_financial_risks(&input(Decimal::MAX, Decimal::MIN, Decimal::MIN, Decimal::MAX));
        assert!(alerts.iter().any(|a| a.alert_type == AlertType::LowSavings));
        let alerts = detect_financial_risks(&input(dec!(1), dec!(0.0000001), dec!(0), Decimal::MIN));
        assert!(alerts.iter().any(|a| a.alert_type == AlertType::FinancialVulnerability));
    }
}

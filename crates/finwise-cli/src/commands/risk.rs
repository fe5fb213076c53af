use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

use finwise_core::risk::{self, AlertSummary, FinancialAlert, OverallRisk, RiskDetectionInput};
use finwise_core::with_metadata;

use super::elapsed_us;
use crate::input;

/// Arguments for risk detection
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct RisksArgs {
    /// Monthly income
    #[arg(long)]
    pub monthly_income: Option<Decimal>,

    /// Monthly expenses
    #[arg(long, alias = "expenses")]
    pub monthly_expenses: Option<Decimal>,

    /// Monthly savings (defaults to income minus expenses)
    #[arg(long)]
    pub monthly_savings: Option<Decimal>,

    /// Emergency fund balance
    #[arg(long, default_value = "0")]
    pub emergency_fund: Decimal,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Alerts together with their aggregate view.
#[derive(Debug, Serialize)]
pub struct RiskReport {
    pub overall_risk: OverallRisk,
    pub summary: AlertSummary,
    pub alerts: Vec<FinancialAlert>,
}

impl RiskReport {
    pub fn from_alerts(alerts: Vec<FinancialAlert>) -> Self {
        Self {
            overall_risk: risk::overall_risk_level(&alerts),
            summary: risk::alert_summary(&alerts),
            alerts,
        }
    }
}

pub(crate) fn build_risk_input(
    args: &RisksArgs,
) -> Result<RiskDetectionInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_input(path);
    }
    if let Some(monthly_income) = args.monthly_income {
        let monthly_expenses = args
            .monthly_expenses
            .ok_or("--monthly-expenses is required (or provide --input)")?;
        return Ok(RiskDetectionInput {
            monthly_income,
            monthly_expenses,
            monthly_savings: args
                .monthly_savings
                .unwrap_or(monthly_income.saturating_sub(monthly_expenses)),
            emergency_fund: args.emergency_fund,
        });
    }
    input::stdin::read_stdin()?
        .ok_or_else(|| "--monthly-income is required (or provide --input)".into())
}

pub fn run_risks(args: RisksArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let risk_input = build_risk_input(&args)?;
    let start = Instant::now();
    let report = RiskReport::from_alerts(risk::detect_financial_risks(&risk_input));
    let output = with_metadata(
        "Threshold rules: burn rate 85%, savings 20%, emergency cover 3 months, cash flow",
        &risk_input,
        Vec::new(),
        elapsed_us(start),
        report,
    );
    Ok(serde_json::to_value(output)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_run_risks_reports_overall_level() {
        let args = RisksArgs {
            monthly_income: Some(dec!(50000)),
            monthly_expenses: Some(dec!(48000)),
            monthly_savings: None,
            emergency_fund: dec!(0),
            input: None,
        };
        let value = run_risks(args).unwrap();
        assert_eq!(value["result"]["overall_risk"], "High");
        assert_eq!(value["result"]["summary"]["high"], 3);
        assert_eq!(value["result"]["alerts"][0]["type"], "High Burn Rate");
    }
}

use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use std::time::Instant;

use finwise_core::scoring::{self, ScoringInput};
use finwise_core::with_metadata;

use super::elapsed_us;
use crate::input;

/// Arguments for the financial health score
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ScoreArgs {
    /// Monthly income
    #[arg(long)]
    pub monthly_income: Option<Decimal>,

    /// Total monthly expenses
    #[arg(long, alias = "expenses")]
    pub total_expenses: Option<Decimal>,

    /// Monthly savings as tracked (defaults to income minus expenses)
    #[arg(long)]
    pub savings: Option<Decimal>,

    /// Emergency fund balance
    #[arg(long, default_value = "0")]
    pub emergency_fund: Decimal,

    /// Total outstanding debt
    #[arg(long, default_value = "0")]
    pub debt: Decimal,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub(crate) fn build_scoring_input(
    args: &ScoreArgs,
) -> Result<ScoringInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_input(path);
    }
    if let Some(monthly_income) = args.monthly_income {
        let total_expenses = args
            .total_expenses
            .ok_or("--total-expenses is required (or provide --input)")?;
        return Ok(ScoringInput {
            monthly_income,
            total_expenses,
            savings: args
                .savings
                .unwrap_or(monthly_income.saturating_sub(total_expenses)),
            emergency_fund: args.emergency_fund,
            debt: args.debt,
        });
    }
    input::stdin::read_stdin()?
        .ok_or_else(|| "--monthly-income is required (or provide --input)".into())
}

pub fn run_score(args: ScoreArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let scoring_input = build_scoring_input(&args)?;
    let start = Instant::now();
    let result = scoring::calculate_financial_score(&scoring_input);
    let output = with_metadata(
        "Weighted health score: savings 30%, burn rate 20%, emergency fund 35%, debt 15%",
        &scoring_input,
        scoring_input.warnings(),
        elapsed_us(start),
        result,
    );
    Ok(serde_json::to_value(output)?)
}

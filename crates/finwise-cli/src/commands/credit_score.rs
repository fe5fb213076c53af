use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use std::time::Instant;

use finwise_core::credit_score::{self, CreditFactors};
use finwise_core::with_metadata;

use super::elapsed_us;
use crate::input;

/// Arguments for the credit score simulation
#[derive(Args)]
pub struct CreditScoreArgs {
    /// On-time payments, percent (0-100)
    #[arg(long)]
    pub payment_history: Option<Decimal>,

    /// Credit utilization, percent (0-100)
    #[arg(long, alias = "utilization")]
    pub credit_utilization: Option<Decimal>,

    /// Age of the credit history in months
    #[arg(long, alias = "credit-age", default_value = "0")]
    pub credit_age_months: Decimal,

    /// Credit mix quality (0-100)
    #[arg(long, default_value = "0")]
    pub credit_mix: Decimal,

    /// Hard inquiries in the recent window
    #[arg(long, default_value_t = 0)]
    pub recent_inquiries: u32,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub(crate) fn build_credit_factors(
    args: &CreditScoreArgs,
) -> Result<CreditFactors, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_input(path);
    }
    if let Some(payment_history) = args.payment_history {
        let credit_utilization = args
            .credit_utilization
            .ok_or("--credit-utilization is required (or provide --input)")?;
        return Ok(CreditFactors {
            payment_history,
            credit_utilization,
            credit_age_months: args.credit_age_months,
            credit_mix: args.credit_mix,
            recent_inquiries: args.recent_inquiries,
        });
    }
    input::stdin::read_stdin()?
        .ok_or_else(|| "--payment-history is required (or provide --input)".into())
}

pub fn run_credit_score(args: CreditScoreArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let factors = build_credit_factors(&args)?;
    let start = Instant::now();
    let result = credit_score::calculate_credit_score(&factors);
    let output = with_metadata(
        "300 floor plus payment 350, utilization 300, age 150, mix 100, inquiries 100; clamped to 300-900",
        &factors,
        factors.warnings(),
        elapsed_us(start),
        result,
    );
    Ok(serde_json::to_value(output)?)
}

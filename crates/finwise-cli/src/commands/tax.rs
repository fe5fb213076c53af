use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use std::time::Instant;

use finwise_core::tax::{self, ItrInput, TaxInput};
use finwise_core::with_metadata;

use super::elapsed_us;
use crate::input;

/// Arguments for the Old vs New regime comparison
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct TaxArgs {
    /// Annual gross income
    #[arg(long)]
    pub annual_income: Option<Decimal>,

    /// Itemised deductions under 80C, 80D, etc. (Old regime only)
    #[arg(long, alias = "deductions", default_value = "0")]
    pub section_80_deductions: Decimal,

    /// Taxpayer is not salaried (no standard deduction)
    #[arg(long)]
    pub non_salaried: bool,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for an income-tax return assessment
#[derive(Args)]
pub struct ItrArgs {
    /// Path to JSON/YAML input file with income, deductions and tax paid
    #[arg(long)]
    pub input: Option<String>,
}

pub(crate) fn build_tax_input(args: &TaxArgs) -> Result<TaxInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_input(path);
    }
    if let Some(annual_income) = args.annual_income {
        return Ok(TaxInput::new(annual_income)
            .with_section_80_deductions(args.section_80_deductions)
            .salaried(!args.non_salaried));
    }
    input::stdin::read_stdin()?
        .ok_or_else(|| "--annual-income is required (or provide --input)".into())
}

pub fn run_tax(args: TaxArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let tax_input = build_tax_input(&args)?;
    let start = Instant::now();
    let result = tax::compare_tax_regimes(&tax_input);
    let output = with_metadata(
        "Progressive slab tax under Old and New regimes with 4% cess",
        &tax_input,
        tax_input.warnings(),
        elapsed_us(start),
        result,
    );
    Ok(serde_json::to_value(output)?)
}

pub fn run_itr(args: ItrArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let itr_input: ItrInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        return Err("--input <file> or stdin required for ITR assessment".into());
    };

    let start = Instant::now();
    let result = tax::assess_itr(&itr_input);
    let output = with_metadata(
        "ITR settlement against the recommended regime",
        &itr_input,
        itr_input.tax_input().warnings(),
        elapsed_us(start),
        result,
    );
    Ok(serde_json::to_value(output)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn args(income: Decimal) -> TaxArgs {
        TaxArgs {
            annual_income: Some(income),
            section_80_deductions: dec!(150000),
            non_salaried: false,
            input: None,
        }
    }

    #[test]
    fn test_flags_build_input() {
        let input = build_tax_input(&args(dec!(1200000))).unwrap();
        assert_eq!(input.section_80_deductions, dec!(150000));
        assert!(input.is_salaried);
    }

    #[test]
    fn test_run_tax_wraps_result() {
        let value = run_tax(args(dec!(1200000))).unwrap();
        assert_eq!(value["result"]["recommended_regime"], "New");
        assert_eq!(value["warnings"].as_array().unwrap().len(), 1);
        assert_eq!(value["metadata"]["precision"], "rust_decimal_128bit");
    }

    #[test]
    fn test_run_itr_from_file() {
        let path = std::env::temp_dir().join("finwise_itr_input.json");
        std::fs::write(
            &path,
            r#"{
                "financial_year": "2024-25",
                "gross_income": "1200000",
                "deductions": { "section_80c": "150000", "section_80d": "25000", "home_loan": "200000", "other": "0" },
                "tax_paid": { "tds": "80000", "advance_tax": "10000", "self_assessment": "0" },
                "is_salaried": true
            }"#,
        )
        .unwrap();

        let value = run_itr(ItrArgs {
            input: path.to_str().map(String::from),
        })
        .unwrap();
        assert_eq!(value["result"]["outcome"], "Refund");
        assert_eq!(value["result"]["comparison"]["recommended_regime"], "Old");
        std::fs::remove_file(&path).ok();
    }
}

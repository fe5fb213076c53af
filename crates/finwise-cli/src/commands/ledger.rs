use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

use finwise_core::ledger::{self, MonthlySummary, Transaction};
use finwise_core::scoring::{self, ScoringResult};
use finwise_core::tax::{self, TaxComparisonResult, TaxInput};
use finwise_core::{risk, with_metadata};

use super::elapsed_us;
use super::risk::RiskReport;
use crate::input;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Arguments for the month-end report
#[derive(Args)]
pub struct MonthSummaryArgs {
    /// JSON/YAML file holding a list of transactions
    #[arg(long, alias = "input")]
    pub transactions: String,

    /// Calendar year of the month to report
    #[arg(long)]
    pub year: i32,

    /// Month to report (1-12)
    #[arg(long)]
    pub month: u32,

    /// Emergency fund balance
    #[arg(long, default_value = "0")]
    pub emergency_fund: Decimal,

    /// Total outstanding debt
    #[arg(long, default_value = "0")]
    pub debt: Decimal,

    /// Section 80 deductions used for the annualized tax comparison
    #[arg(long, default_value = "0")]
    pub section_80_deductions: Decimal,

    /// Also report this many months ending at the reported month
    #[arg(long)]
    pub trend: Option<u32>,
}

/// Everything the engines say about one month of transactions.
#[derive(Debug, Serialize)]
pub struct MonthReport {
    pub summary: MonthlySummary,
    pub health: ScoringResult,
    pub risks: RiskReport,
    /// Regime comparison on the month's income annualized
    pub tax: TaxComparisonResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<Vec<MonthlySummary>>,
}

fn annual_tax_input(summary: &MonthlySummary, args: &MonthSummaryArgs) -> TaxInput {
    TaxInput::new(summary.income.saturating_mul(MONTHS_PER_YEAR))
        .with_section_80_deductions(args.section_80_deductions)
}

pub(crate) fn build_report(
    transactions: &[Transaction],
    args: &MonthSummaryArgs,
) -> Result<MonthReport, Box<dyn std::error::Error>> {
    let summary = ledger::summarize_month(transactions, args.year, args.month)?;
    let health = scoring::calculate_financial_score(
        &summary.scoring_input(args.emergency_fund, args.debt),
    );
    let risks = RiskReport::from_alerts(risk::detect_financial_risks(
        &summary.risk_input(args.emergency_fund),
    ));
    let tax = tax::compare_tax_regimes(&annual_tax_input(&summary, args));
    let trend = match args.trend {
        Some(months) => Some(ledger::monthly_trend(
            transactions,
            args.year,
            args.month,
            months,
        )?),
        None => None,
    };

    Ok(MonthReport {
        summary,
        health,
        risks,
        tax,
        trend,
    })
}

pub fn run_month_summary(args: MonthSummaryArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let transactions: Vec<Transaction> = input::file::read_input(&args.transactions)?;

    let start = Instant::now();
    let report = build_report(&transactions, &args)?;

    let mut warnings = Vec::new();
    if report.summary.transaction_count == 0 {
        warnings.push(format!(
            "No transactions dated {}-{:02}; every total is zero.",
            args.year, args.month
        ));
    }
    warnings.extend(annual_tax_input(&report.summary, &args).warnings());

    let output = with_metadata(
        "Monthly totals fed into health scoring, risk detection and an annualized regime comparison",
        &serde_json::json!({
            "transactions": transactions.len(),
            "year": args.year,
            "month": args.month,
            "emergency_fund": args.emergency_fund,
            "debt": args.debt,
            "section_80_deductions": args.section_80_deductions,
        }),
        warnings,
        elapsed_us(start),
        report,
    );
    Ok(serde_json::to_value(output)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use finwise_core::ledger::TransactionType;
    use finwise_core::tax::TaxRegime;

    fn txn(amount: Decimal, kind: TransactionType, category: &str, date: &str) -> Transaction {
        Transaction {
            amount,
            transaction_type: kind,
            category: category.into(),
            description: String::new(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        }
    }

    fn args(trend: Option<u32>) -> MonthSummaryArgs {
        MonthSummaryArgs {
            transactions: String::new(),
            year: 2025,
            month: 3,
            emergency_fund: dec!(400000),
            debt: dec!(100000),
            section_80_deductions: dec!(150000),
            trend,
        }
    }

    fn transactions() -> Vec<Transaction> {
        vec![
            txn(dec!(100000), TransactionType::Income, "Salary", "2025-03-01"),
            txn(dec!(35000), TransactionType::Expense, "Rent", "2025-03-02"),
            txn(dec!(25000), TransactionType::Expense, "Food", "2025-03-20"),
            txn(dec!(90000), TransactionType::Income, "Salary", "2025-02-01"),
        ]
    }

    #[test]
    fn test_report_feeds_every_engine() {
        let report = build_report(&transactions(), &args(None)).unwrap();
        assert_eq!(report.summary.savings, dec!(40000));
        assert_eq!(report.health.score, 100);
        assert!(report.risks.alerts.is_empty());
        assert_eq!(report.tax.new_regime.gross_income, dec!(1200000));
        assert_eq!(report.tax.recommended_regime, TaxRegime::New);
        assert!(report.trend.is_none());
    }

    #[test]
    fn test_report_with_trend() {
        let report = build_report(&transactions(), &args(Some(2))).unwrap();
        let trend = report.trend.unwrap();
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].month, 2);
        assert_eq!(trend[0].income, dec!(90000));
    }

    #[test]
    fn test_invalid_month_is_an_error() {
        let mut a = args(None);
        a.month = 13;
        assert!(build_report(&transactions(), &a).is_err());
    }
}

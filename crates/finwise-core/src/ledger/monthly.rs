use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FinwiseError;
use crate::risk::RiskDetectionInput;
use crate::scoring::ScoringInput;
use crate::types::Money;
use crate::FinwiseResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub amount: Money,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpend {
    pub category: String,
    pub amount: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub income: Money,
    pub expenses: Money,
    /// Income minus expenses; negative in a deficit month.
    pub savings: Money,
    /// Expense totals per category, in order of first appearance.
    pub category_breakdown: Vec<CategorySpend>,
    pub transaction_count: usize,
}

impl MonthlySummary {
    pub fn scoring_input(&self, emergency_fund: Money, debt: Money) -> ScoringInput {
        ScoringInput {
            monthly_income: self.income,
            total_expenses: self.expenses,
            savings: self.savings,
            emergency_fund,
            debt,
        }
    }

    pub fn risk_input(&self, emergency_fund: Money) -> RiskDetectionInput {
        RiskDetectionInput {
            monthly_income: self.income,
            monthly_expenses: self.expenses,
            monthly_savings: self.savings,
            emergency_fund,
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

fn validate_month(month: u32) -> FinwiseResult<()> {
    if !(1..=12).contains(&month) {
        return Err(FinwiseError::InvalidInput {
            field: "month".into(),
            reason: format!("Month must be between 1 and 12, got {month}."),
        });
    }
    Ok(())
}

/// Totals for the transactions dated within `year`/`month`.
pub fn summarize_month(
    transactions: &[Transaction],
    year: i32,
    month: u32,
) -> FinwiseResult<MonthlySummary> {
    validate_month(month)?;

    let mut income = Decimal::ZERO;
    let mut expenses = Decimal::ZERO;
    let mut category_breakdown: Vec<CategorySpend> = Vec::new();
    let mut transaction_count = 0;

    for txn in transactions
        .iter()
        .filter(|t| t.date.year() == year && t.date.month() == month)
    {
        transaction_count += 1;
        match txn.transaction_type {
            TransactionType::Income => income = income.saturating_add(txn.amount),
            TransactionType::Expense => {
                expenses = expenses.saturating_add(txn.amount);
                match category_breakdown
                    .iter_mut()
                    .find(|c| c.category == txn.category)
                {
                    Some(spend) => spend.amount = spend.amount.saturating_add(txn.amount),
                    None => category_breakdown.push(CategorySpend {
                        category: txn.category.clone(),
                        amount: txn.amount,
                    }),
                }
            }
        }
    }

    debug!(year, month, transaction_count, "summarized month");

    Ok(MonthlySummary {
        year,
        month,
        income,
        expenses,
        savings: income.saturating_sub(expenses),
        category_breakdown,
        transaction_count,
    })
}

/// `months` consecutive summaries ending at `year`/`month`, oldest first.
pub fn monthly_trend(
    transactions: &[Transaction],
    year: i32,
    month: u32,
    months: u32,
) -> FinwiseResult<Vec<MonthlySummary>> {
    validate_month(month)?;
    if months == 0 {
        return Err(FinwiseError::InsufficientData(
            "A trend needs at least one month.".into(),
        ));
    }

    // Months since year 0, so stepping back crosses year boundaries cleanly
    let end = i64::from(year) * 12 + i64::from(month) - 1;
    (0..i64::from(months))
        .rev()
        .map(|offset| {
            let index = end - offset;
            let y = index.div_euclid(12) as i32;
            let m = (index.rem_euclid(12) + 1) as u32;
            summarize_month(transactions, y, m)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use finwise_core::categorization::{CategoryRule, CategoryRules};
use finwise_core::ledger::Transaction;
use finwise_core::risk::FinancialAlert;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Tax
// ---------------------------------------------------------------------------

#[napi]
pub fn compare_tax_regimes(input_json: String) -> NapiResult<String> {
    let input: finwise_core::tax::TaxInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = finwise_core::tax::compare_tax_regimes(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_old_regime_tax(input_json: String) -> NapiResult<String> {
    let input: finwise_core::tax::TaxInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = finwise_core::tax::calculate_old_regime_tax(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_new_regime_tax(input_json: String) -> NapiResult<String> {
    let input: finwise_core::tax::TaxInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = finwise_core::tax::calculate_new_regime_tax(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn assess_itr(input_json: String) -> NapiResult<String> {
    let input: finwise_core::tax::ItrInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = finwise_core::tax::assess_itr(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_financial_score(input_json: String) -> NapiResult<String> {
    let input: finwise_core::scoring::ScoringInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = finwise_core::scoring::calculate_financial_score(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Credit score
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_credit_score(input_json: String) -> NapiResult<String> {
    let input: finwise_core::credit_score::CreditFactors =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = finwise_core::credit_score::calculate_credit_score(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Risk
// ---------------------------------------------------------------------------

#[napi]
pub fn detect_financial_risks(input_json: String) -> NapiResult<String> {
    let input: finwise_core::risk::RiskDetectionInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = finwise_core::risk::detect_financial_risks(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Takes the alert array produced by `detectFinancialRisks`.
#[napi]
pub fn overall_risk_level(alerts_json: String) -> NapiResult<String> {
    let alerts: Vec<FinancialAlert> = serde_json::from_str(&alerts_json).map_err(to_napi_error)?;
    let output = finwise_core::risk::overall_risk_level(&alerts);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn alert_summary(alerts_json: String) -> NapiResult<String> {
    let alerts: Vec<FinancialAlert> = serde_json::from_str(&alerts_json).map_err(to_napi_error)?;
    let output = finwise_core::risk::alert_summary(&alerts);
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Categorization
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct CategorizeRequest {
    descriptions: Vec<String>,
    /// Extra rules merged onto the default table
    #[serde(default)]
    rules: Vec<CategoryRule>,
}

#[napi]
pub fn categorize_transactions(input_json: String) -> NapiResult<String> {
    let request: CategorizeRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let mut rules = CategoryRules::default();
    for rule in &request.rules {
        rules = rules
            .with_rule(&rule.category, rule.keywords.as_slice())
            .map_err(to_napi_error)?;
    }
    let output: Vec<&str> = request
        .descriptions
        .iter()
        .map(|d| rules.categorize(d))
        .collect();
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct MonthRequest {
    transactions: Vec<Transaction>,
    year: i32,
    month: u32,
    /// Trend length; only read by `monthlyTrend`
    #[serde(default)]
    months: Option<u32>,
}

#[napi]
pub fn summarize_month(input_json: String) -> NapiResult<String> {
    let request: MonthRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        finwise_core::ledger::summarize_month(&request.transactions, request.year, request.month)
            .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn monthly_trend(input_json: String) -> NapiResult<String> {
    let request: MonthRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = finwise_core::ledger::monthly_trend(
        &request.transactions,
        request.year,
        request.month,
        request.months.unwrap_or(1),
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

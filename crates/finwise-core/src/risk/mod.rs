//! Threshold-based financial risk alerts.
//!
//! The thresholds here are deliberately independent of the scoring curves;
//! both sets are tuned separately.

pub mod detection;
pub mod summary;

pub use detection::{
    detect_financial_risks, AlertSeverity, AlertType, FinancialAlert, RiskDetectionInput,
};
pub use summary::{alert_summary, overall_risk_level, AlertSummary, OverallRisk};

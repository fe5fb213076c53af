use serde::{Deserialize, Serialize};

use super::detection::{AlertSeverity, FinancialAlert};

/// Highest severity across a set of alerts, or `None` when there are none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverallRisk {
    None,
    Low,
    Medium,
    High,
}

impl From<AlertSeverity> for OverallRisk {
    fn from(severity: AlertSeverity) -> Self {
        match severity {
            AlertSeverity::Low => OverallRisk::Low,
            AlertSeverity::Medium => OverallRisk::Medium,
            AlertSeverity::High => OverallRisk::High,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSummary {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

pub fn overall_risk_level(alerts: &[FinancialAlert]) -> OverallRisk {
    alerts
        .iter()
        .map(|a| a.severity)
        .max()
        .map_or(OverallRisk::None, OverallRisk::from)
}

pub fn alert_summary(alerts: &[FinancialAlert]) -> AlertSummary {
    alerts
        .iter()
        .fold(AlertSummary::default(), |mut summary, alert| {
            match alert.severity {
                AlertSeverity::High => summary.high += 1,
                AlertSeverity::Medium => summary.medium += 1,
                AlertSeverity::Low => summary.low += 1,
            }
            summary
        })
}

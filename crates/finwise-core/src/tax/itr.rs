use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::regime::{compare_tax_regimes, TaxComparisonResult, TaxInput};
use crate::types::Money;

fn default_salaried() -> bool {
    true
}

/// Itemised deductions claimed on a return. All are Old-regime only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItrDeductions {
    #[serde(default)]
    pub section_80c: Money,
    #[serde(default)]
    pub section_80d: Money,
    #[serde(default)]
    pub home_loan: Money,
    #[serde(default)]
    pub other: Money,
}

impl ItrDeductions {
    pub fn total(&self) -> Money {
        self.section_80c
            .saturating_add(self.section_80d)
            .saturating_add(self.home_loan)
            .saturating_add(self.other)
    }
}

/// Tax already remitted for the year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxPaid {
    #[serde(default)]
    pub tds: Money,
    #[serde(default)]
    pub advance_tax: Money,
    #[serde(default)]
    pub self_assessment: Money,
}

impl TaxPaid {
    pub fn total(&self) -> Money {
        self.tds
            .saturating_add(self.advance_tax)
            .saturating_add(self.self_assessment)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItrInput {
    pub financial_year: String,
    pub gross_income: Money,
    #[serde(default)]
    pub deductions: ItrDeductions,
    #[serde(default)]
    pub tax_paid: TaxPaid,
    #[serde(default = "default_salaried")]
    pub is_salaried: bool,
}

impl ItrInput {
    pub fn tax_input(&self) -> TaxInput {
        TaxInput {
            annual_income: self.gross_income,
            section_80_deductions: self.deductions.total(),
            is_salaried: self.is_salaried,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItrOutcome {
    Refund,
    Payable,
    Settled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItrAssessment {
    pub financial_year: String,
    pub comparison: TaxComparisonResult,
    /// Total tax under the recommended regime.
    pub tax_liability: Money,
    pub total_tax_paid: Money,
    /// Positive when a refund is due, negative when tax is still payable.
    pub refund_or_payable: Money,
    pub outcome: ItrOutcome,
}

/// Settle a return against the recommended regime's liability.
pub fn assess_itr(input: &ItrInput) -> ItrAssessment {
    let comparison = compare_tax_regimes(&input.tax_input());
    let tax_liability = comparison.recommended().total_tax;
    let total_tax_paid = input.tax_paid.total();
    let refund_or_payable = total_tax_paid.saturating_sub(tax_liability);

    let outcome = if refund_or_payable > Decimal::ZERO {
        ItrOutcome::Refund
    } else if refund_or_payable < Decimal::ZERO {
        ItrOutcome::Payable
    } else {
        ItrOutcome::Settled
    };

    debug!(
        financial_year = %input.financial_year,
        liability = %tax_liability,
        paid = %total_tax_paid,
        ?outcome,
        "assessed return"
    );

    ItrAssessment {
        financial_year: input.financial_year.clone(),
        comparison,
        tax_liability,
        total_tax_paid,
        refund_or_payable,
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tax::TaxRegime;
    use rust_decimal_macros::dec;

    fn sample_return() -> ItrInput {
        ItrInput {
            financial_year: "2024-25".into(),
            gross_income: dec!(1200000),
            deductions: ItrDeductions {
                section_80c: dec!(150000),
                section_80d: dec!(25000),
                home_loan: dec!(200000),
                other: dec!(0),
            },
            tax_paid: TaxPaid {
                tds: dec!(80000),
                advance_tax: dec!(10000),
                self_assessment: dec!(0),
            },
            is_salaried: true,
        }
    }

    #[test]
    fn test_deductions_feed_old_regime() {
        let assessment = assess_itr(&sample_return());
        // Old taxable = 1.2M - 50k - 375k = 775k -> 12.5k + 55k = 67.5k, +4% = 70.2k
        assert_eq!(assessment.comparison.old_regime.taxable_income, dec!(775000));
        assert_eq!(assessment.comparison.old_regime.total_tax, dec!(70200));
        assert_eq!(assessment.comparison.recommended_regime, TaxRegime::Old);
        assert_eq!(assessment.tax_liability, dec!(70200));
    }

    #[test]
    fn test_overpaid_return_is_refund() {
        let assessment = assess_itr(&sample_return());
        assert_eq!(assessment.total_tax_paid, dec!(90000));
        assert_eq!(assessment.refund_or_payable, dec!(19800));
        assert_eq!(assessment.outcome, ItrOutcome::Refund);
    }

    #[test]
    fn test_underpaid_return_is_payable() {
        let mut input = sample_return();
        input.tax_paid = TaxPaid::default();
        let assessment = assess_itr(&input);
        assert_eq!(assessment.refund_or_payable, dec!(-70200));
        assert_eq!(assessment.outcome, ItrOutcome::Payable);
    }

    #[test]
    fn test_exact_payment_is_settled() {
        let mut input = sample_return();
        input.tax_paid = TaxPaid {
            tds: dec!(70200),
            ..TaxPaid::default()
        };
        assert_eq!(assess_itr(&input).outcome, ItrOutcome::Settled);
    }

    #[test]
    fn test_extreme_payments_saturate() {
        let mut input = sample_return();
        input.tax_paid = TaxPaid {
            tds: Decimal::MAX,
            advance_tax: Decimal::MAX,
            self_assessment: dec!(1),
        };
        input.deductions.other = Decimal::MAX;
        let assessment = assess_itr(&input);
        assert_eq!(assessment.total_tax_paid, Decimal::MAX);
        assert_eq!(assessment.outcome, ItrOutcome::Refund);

        input.tax_paid = TaxPaid {
            tds: Decimal::MIN,
            ..TaxPaid::default()
        };
        input.gross_income = Decimal::MAX;
        input.deductions = ItrDeductions::default();
        let assessment = assess_itr(&input);
        assert_eq!(assessment.refund_or_payable, Decimal::MIN);
        assert_eq!(assessment.outcome, ItrOutcome::Payable);
    }
}

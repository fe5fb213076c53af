use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::slabs::{
    calculate_slab_tax, TaxSlab, CESS_RATE, NEW_REGIME_SLABS, OLD_REGIME_SLABS,
    STANDARD_DEDUCTION,
};
use crate::types::{round_dp_half_away, round_half_up, saturating_div, Money, Rate};

// ---------------------------------------------------------------------------
// Input / Output
// ---------------------------------------------------------------------------

fn default_salaried() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxInput {
    /// Annual gross income.
    pub annual_income: Money,
    /// Itemised deductions (80C, 80D, ...). Honoured by the Old regime only.
    #[serde(default)]
    pub section_80_deductions: Money,
    /// Salaried taxpayers receive the standard deduction in both regimes.
    #[serde(default = "default_salaried")]
    pub is_salaried: bool,
}

impl TaxInput {
    /// Salaried taxpayer with no itemised deductions.
    pub fn new(annual_income: Money) -> Self {
        Self {
            annual_income,
            section_80_deductions: Decimal::ZERO,
            is_salaried: true,
        }
    }

    pub fn with_section_80_deductions(mut self, deductions: Money) -> Self {
        self.section_80_deductions = deductions;
        self
    }

    pub fn salaried(mut self, is_salaried: bool) -> Self {
        self.is_salaried = is_salaried;
        self
    }

    /// Advisory notes about the input. They never change the computed tax.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.annual_income <= Decimal::ZERO {
            warnings.push("Annual income is zero or negative; tax is clamped to zero.".into());
        }
        if self.section_80_deductions > Decimal::ZERO {
            warnings.push(format!(
                "Section 80 deductions of {} are not honoured under the New regime.",
                self.section_80_deductions
            ));
        }
        if self.section_80_deductions < Decimal::ZERO {
            warnings.push("Negative section 80 deductions increase Old regime taxable income.".into());
        }
        warnings
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxRegime {
    Old,
    New,
}

impl TaxRegime {
    pub fn slabs(&self) -> &'static [TaxSlab] {
        match self {
            TaxRegime::Old => &OLD_REGIME_SLABS,
            TaxRegime::New => &NEW_REGIME_SLABS,
        }
    }
}

impl std::fmt::Display for TaxRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaxRegime::Old => write!(f, "Old"),
            TaxRegime::New => write!(f, "New"),
        }
    }
}

/// Tax computed under one regime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeBreakdown {
    pub regime: TaxRegime,
    pub gross_income: Money,
    pub deductions: Money,
    pub taxable_income: Money,
    pub tax_before_cess: Money,
    pub cess: Money,
    pub total_tax: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxComparisonResult {
    pub old_regime: RegimeBreakdown,
    pub new_regime: RegimeBreakdown,
    pub recommended_regime: TaxRegime,
    /// Absolute difference in total tax, rounded to a whole unit.
    pub savings: Money,
    /// Savings relative to the lower tax, in percent, 2 dp.
    pub savings_percentage: Rate,
}

impl TaxComparisonResult {
    pub fn recommended(&self) -> &RegimeBreakdown {
        match self.recommended_regime {
            TaxRegime::Old => &self.old_regime,
            TaxRegime::New => &self.new_regime,
        }
    }
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

fn regime_tax(regime: TaxRegime, annual_income: Money, deductions: Money) -> RegimeBreakdown {
    let taxable_income = annual_income.saturating_sub(deductions).max(Decimal::ZERO);
    let tax_before_cess = calculate_slab_tax(taxable_income, regime.slabs());
    let cess = tax_before_cess * CESS_RATE;

    RegimeBreakdown {
        regime,
        gross_income: annual_income,
        deductions,
        taxable_income,
        tax_before_cess,
        cess,
        total_tax: tax_before_cess + cess,
    }
}

fn standard_deduction(input: &TaxInput) -> Money {
    if input.is_salaried {
        STANDARD_DEDUCTION
    } else {
        Decimal::ZERO
    }
}

/// Tax under the Old regime: standard deduction plus itemised deductions.
pub fn calculate_old_regime_tax(input: &TaxInput) -> RegimeBreakdown {
    let deductions = standard_deduction(input).saturating_add(input.section_80_deductions);
    regime_tax(TaxRegime::Old, input.annual_income, deductions)
}

/// Tax under the New regime: standard deduction only.
pub fn calculate_new_regime_tax(input: &TaxInput) -> RegimeBreakdown {
    regime_tax(TaxRegime::New, input.annual_income, standard_deduction(input))
}

/// Compute both regimes and recommend the cheaper one. Ties favour Old.
pub fn compare_tax_regimes(input: &TaxInput) -> TaxComparisonResult {
    let old_regime = calculate_old_regime_tax(input);
    let new_regime = calculate_new_regime_tax(input);

    let recommended_regime = if old_regime.total_tax <= new_regime.total_tax {
        TaxRegime::Old
    } else {
        TaxRegime::New
    };

    let savings = (old_regime.total_tax - new_regime.total_tax).abs();
    let lower_tax = old_regime.total_tax.min(new_regime.total_tax);
    let savings_percentage = if lower_tax > Decimal::ZERO {
        round_dp_half_away(saturating_div(savings, lower_tax).saturating_mul(dec!(100)), 2)
    } else {
        Decimal::ZERO
    };

    debug!(
        old_total = %old_regime.total_tax,
        new_total = %new_regime.total_tax,
        recommended = %recommended_regime,
        "compared tax regimes"
    );

    TaxComparisonResult {
        old_regime,
        new_regime,
        recommended_regime,
        savings: round_half_up(savings),
        savings_percentage,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};

/// A contiguous income band taxed at a single marginal rate.
///
/// Bands share endpoints: income exactly at `max` is fully taxed inside this
/// band and nothing spills into the next one. `max: None` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSlab {
    pub min: Money,
    pub max: Option<Money>,
    pub rate: Rate,
}

pub const OLD_REGIME_SLABS: [TaxSlab; 4] = [
    TaxSlab {
        min: dec!(0),
        max: Some(dec!(250000)),
        rate: dec!(0),
    },
    TaxSlab {
        min: dec!(250000),
        max: Some(dec!(500000)),
        rate: dec!(0.05),
    },
    TaxSlab {
        min: dec!(500000),
        max: Some(dec!(1000000)),
        rate: dec!(0.20),
    },
    TaxSlab {
        min: dec!(1000000),
        max: None,
        rate: dec!(0.30),
    },
];

pub const NEW_REGIME_SLABS: [TaxSlab; 6] = [
    TaxSlab {
        min: dec!(0),
        max: Some(dec!(300000)),
        rate: dec!(0),
    },
    TaxSlab {
        min: dec!(300000),
        max: Some(dec!(600000)),
        rate: dec!(0.05),
    },
    TaxSlab {
        min: dec!(600000),
        max: Some(dec!(900000)),
        rate: dec!(0.10),
    },
    TaxSlab {
        min: dec!(900000),
        max: Some(dec!(1200000)),
        rate: dec!(0.15),
    },
    TaxSlab {
        min: dec!(1200000),
        max: Some(dec!(1500000)),
        rate: dec!(0.20),
    },
    TaxSlab {
        min: dec!(1500000),
        max: None,
        rate: dec!(0.30),
    },
];

/// Flat deduction for salaried taxpayers, honoured by both regimes.
pub const STANDARD_DEDUCTION: Money = dec!(50000);

/// Health & education cess on slab tax.
pub const CESS_RATE: Rate = dec!(0.04);

/// Marginal tax on `taxable_income` across ordered, gap-free `slabs`.
pub fn calculate_slab_tax(taxable_income: Money, slabs: &[TaxSlab]) -> Money {
    let mut tax = Decimal::ZERO;

    for slab in slabs {
        if taxable_income > slab.min {
            let upper = match slab.max {
                Some(max) => taxable_income.min(max),
                None => taxable_income,
            };
            let band = upper.saturating_sub(slab.min).saturating_mul(slab.rate);
            tax = tax.saturating_add(band);
        }
    }

    tax
}

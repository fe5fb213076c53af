//! India-style progressive income tax under the Old and New regimes.
//!
//! The slab tables are a fixed, simplified financial-year snapshot; they are
//! not regulatory data and are not configurable at call time.

pub mod itr;
pub mod regime;
pub mod slabs;

pub use itr::{assess_itr, ItrAssessment, ItrDeductions, ItrInput, ItrOutcome, TaxPaid};
pub use regime::{
    calculate_new_regime_tax, calculate_old_regime_tax, compare_tax_regimes, RegimeBreakdown,
    TaxComparisonResult, TaxInput, TaxRegime,
};
pub use slabs::{calculate_slab_tax, TaxSlab};

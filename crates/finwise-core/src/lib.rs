pub mod error;
pub mod types;

#[cfg(feature = "tax")]
pub mod tax;

#[cfg(feature = "scoring")]
pub mod scoring;

#[cfg(feature = "risk")]
pub mod risk;

#[cfg(feature = "categorization")]
pub mod categorization;

#[cfg(feature = "credit_score")]
pub mod credit_score;

#[cfg(feature = "ledger")]
pub mod ledger;

pub use error::FinwiseError;
pub use types::*;

/// Standard result type for the fallible finwise operations
pub type FinwiseResult<T> = Result<T, FinwiseError>;

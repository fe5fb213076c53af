//! Monthly aggregation of raw transactions into engine inputs.

pub mod monthly;

pub use monthly::{
    monthly_trend, summarize_month, CategorySpend, MonthlySummary, Transaction, TransactionType,
};

pub mod rules;

pub use rules::{CategoryRule, CategoryRules, UNCATEGORIZED};

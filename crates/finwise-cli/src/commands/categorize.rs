use clap::Args;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

use finwise_core::categorization::{CategoryRule, CategoryRules};
use finwise_core::with_metadata;

use super::elapsed_us;
use crate::input;

/// Arguments for keyword categorization
#[derive(Args)]
pub struct CategorizeArgs {
    /// Transaction descriptions to categorize
    pub descriptions: Vec<String>,

    /// JSON/YAML list of extra rules merged onto the defaults
    #[arg(long)]
    pub rules: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Categorized {
    pub description: String,
    pub category: String,
}

pub(crate) fn load_rules(path: Option<&str>) -> Result<CategoryRules, Box<dyn std::error::Error>> {
    let mut rules = CategoryRules::default();
    if let Some(path) = path {
        let extra: Vec<CategoryRule> = input::file::read_input(path)?;
        for rule in extra {
            rules = rules.with_rule(&rule.category, rule.keywords.as_slice())?;
        }
    }
    Ok(rules)
}

pub fn run_categorize(args: CategorizeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if args.descriptions.is_empty() {
        return Err("at least one description is required".into());
    }
    let rules = load_rules(args.rules.as_deref())?;

    let start = Instant::now();
    let result: Vec<Categorized> = args
        .descriptions
        .iter()
        .map(|description| Categorized {
            description: description.clone(),
            category: rules.categorize(description).to_string(),
        })
        .collect();
    let output = with_metadata(
        "First matching keyword rule, case-insensitive substring",
        &args.descriptions,
        Vec::new(),
        elapsed_us(start),
        result,
    );
    Ok(serde_json::to_value(output)?)
}

//! Keyword-based transaction categorisation.
//!
//! Rules are an ordinary value: extending them yields a new table, and every
//! lookup takes the table it should use. There is no process-wide rule state.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::FinwiseError;
use crate::FinwiseResult;

pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: String,
    pub keywords: Vec<String>,
}

/// Ordered category rules. The first category with a matching keyword wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryRules {
    rules: Vec<CategoryRule>,
}

fn rule(category: &str, keywords: &[&str]) -> CategoryRule {
    CategoryRule {
        category: category.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

impl Default for CategoryRules {
    fn default() -> Self {
        Self {
            rules: vec![
                rule(
                    "Food",
                    &[
                        "grocery", "restaurant", "cafe", "coffee", "mcdonalds", "starbucks",
                        "burger", "pizza", "diner",
                    ],
                ),
                rule(
                    "Transport",
                    &[
                        "uber", "lyft", "taxi", "gas", "shell", "bp", "train", "bus", "metro",
                        "subway", "fuel",
                    ],
                ),
                rule(
                    "Utilities",
                    &[
                        "electric", "water", "gas", "internet", "comcast", "verizon", "at&t",
                        "t-mobile", "utility",
                    ],
                ),
                rule(
                    "Entertainment",
                    &[
                        "netflix", "spotify", "hulu", "movie", "cinema", "concert", "ticket",
                        "disney",
                    ],
                ),
                rule(
                    "Shopping",
                    &[
                        "amazon", "walmart", "target", "clothing", "shoe", "mall", "store",
                        "market",
                    ],
                ),
                rule(
                    "Health",
                    &[
                        "doctor", "pharmacy", "hospital", "clinic", "medical", "drug", "cvs",
                        "walgreens",
                    ],
                ),
            ],
        }
    }
}

impl CategoryRules {
    /// A table with no rules; everything is uncategorised.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// Return a table with `keywords` added to `category`.
    ///
    /// Keywords merge into an existing category without duplicates; an
    /// unknown category is appended after the existing ones.
    pub fn with_rule<S: AsRef<str>>(mut self, category: &str, keywords: &[S]) -> FinwiseResult<Self> {
        let category = category.trim();
        if category.is_empty() {
            return Err(FinwiseError::InvalidInput {
                field: "category".into(),
                reason: "Category name must not be empty.".into(),
            });
        }
        if keywords.iter().any(|k| k.as_ref().trim().is_empty()) {
            return Err(FinwiseError::InvalidInput {
                field: "keywords".into(),
                reason: format!("Keywords for '{category}' must not be empty."),
            });
        }

        let index = match self.rules.iter().position(|r| r.category == category) {
            Some(index) => index,
            None => {
                self.rules.push(CategoryRule {
                    category: category.to_string(),
                    keywords: Vec::new(),
                });
                self.rules.len() - 1
            }
        };

        let existing = &mut self.rules[index].keywords;
        for keyword in keywords {
            let keyword = keyword.as_ref();
            if !existing.iter().any(|k| k == keyword) {
                existing.push(keyword.to_string());
            }
        }

        Ok(self)
    }

    /// Category for a transaction description, or [`UNCATEGORIZED`].
    pub fn categorize(&self, description: &str) -> &str {
        let normalized = description.to_lowercase();

        let matched = self.rules.iter().find(|rule| {
            rule.keywords
                .iter()
                .any(|keyword| normalized.contains(&keyword.to_lowercase()))
        });

        match matched {
            Some(rule) => {
                trace!(category = %rule.category, "categorized transaction");
                &rule.category
            }
            None => UNCATEGORIZED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_rules_match_case_insensitively() {
        let rules = CategoryRules::default();
        assert_eq!(rules.categorize("STARBUCKS #1234"), "Food");
        assert_eq!(rules.categorize("Uber trip"), "Transport");
        assert_eq!(rules.categorize("Netflix subscription"), "Entertainment");
        assert_eq!(rules.categorize("CVS Pharmacy"), "Health");
    }

    #[test]
    fn test_first_category_wins_on_shared_keyword() {
        // "gas" is listed under both Transport and Utilities
        assert_eq!(CategoryRules::default().categorize("Gas bill"), "Transport");
    }

    #[test]
    fn test_unmatched_is_uncategorized() {
        assert_eq!(CategoryRules::default().categorize("Rent"), UNCATEGORIZED);
        assert_eq!(CategoryRules::empty().categorize("pizza"), UNCATEGORIZED);
    }

    #[test]
    fn test_with_rule_appends_new_category() {
        let rules = CategoryRules::default()
            .with_rule("Housing", &["rent", "landlord"])
            .unwrap();
        assert_eq!(rules.categorize("Monthly RENT"), "Housing");
        assert_eq!(rules.rules().last().unwrap().category, "Housing");
    }

    #[test]
    fn test_with_rule_merges_without_duplicates() {
        let rules = CategoryRules::default()
            .with_rule("Food", &["pizza", "bakery"])
            .unwrap();
        let food = &rules.rules()[0];
        assert_eq!(food.keywords.iter().filter(|k| *k == "pizza").count(), 1);
        assert_eq!(food.keywords.last().unwrap(), "bakery");
        assert_eq!(rules.categorize("Corner Bakery"), "Food");
    }

    #[test]
    fn test_original_table_is_untouched() {
        let base = CategoryRules::default();
        let extended = base.clone().with_rule("Housing", &["rent"]).unwrap();
        assert_eq!(base.categorize("rent"), UNCATEGORIZED);
        assert_eq!(extended.categorize("rent"), "Housing");
    }

    #[test]
    fn test_rejects_blank_names() {
        assert!(CategoryRules::default().with_rule("  ", &["x"]).is_err());
        assert!(CategoryRules::default().with_rule("Misc", &[""]).is_err());
    }

    #[test]
    fn test_rules_round_trip_through_json_list() {
        let json = r#"[{"category": "Pets", "keywords": ["vet", "petco"]}]"#;
        let rules: CategoryRules = serde_json::from_str(json).unwrap();
        assert_eq!(rules.categorize("PETCO store"), "Pets");
    }
}

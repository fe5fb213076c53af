use serde_json::Value;

use super::format_scalar;

/// Headline answers, in priority order, as JSON pointers into the result.
const HEADLINE_FIELDS: [&str; 5] = [
    "/recommended_regime",
    "/refund_or_payable",
    "/score",
    "/overall_risk",
    "/health/score",
];

/// Print just the headline answer of a computation.
pub fn print_minimal(value: &Value) {
    println!("{}", render_minimal(value));
}

pub(crate) fn render_minimal(value: &Value) -> String {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Array(records) = result {
        return records
            .iter()
            .map(|r| r.get("category").map(format_scalar).unwrap_or_else(|| format_scalar(r)))
            .collect::<Vec<_>>()
            .join("\n");
    }

    HEADLINE_FIELDS
        .iter()
        .filter_map(|pointer| result.pointer(pointer))
        .find(|v| !v.is_null())
        .map(format_scalar)
        .unwrap_or_else(|| format_scalar(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_headline_per_command() {
        assert_eq!(
            render_minimal(&json!({ "result": { "savings": "31200", "recommended_regime": "New" } })),
            "New"
        );
        assert_eq!(
            render_minimal(&json!({ "result": { "outcome": "Refund", "refund_or_payable": "19800" } })),
            "19800"
        );
        assert_eq!(
            render_minimal(&json!({ "result": { "summary": {}, "health": { "score": 72 } } })),
            "72"
        );
    }

    #[test]
    fn test_categories_one_per_line() {
        let value = json!({ "result": [{ "category": "Food" }, { "category": "Transport" }] });
        assert_eq!(render_minimal(&value), "Food\nTransport");
    }
}

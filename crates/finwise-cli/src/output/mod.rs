pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// A result object split into dotted scalar rows and nested record lists.
///
/// `old_regime.total_tax` style paths keep nested breakdowns on one table;
/// lists of objects (alerts, category spend, trend months) are kept apart so
/// they can be rendered as their own tables.
#[derive(Debug, Default)]
pub(crate) struct Sections {
    pub fields: Vec<(String, String)>,
    pub lists: Vec<(String, Vec<Value>)>,
}

pub(crate) fn split_result(value: &Value) -> Sections {
    let mut sections = Sections::default();
    walk(value, "", &mut sections);
    sections
}

fn walk(value: &Value, path: &str, sections: &mut Sections) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let child = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                walk(val, &child, sections);
            }
        }
        Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_object) => {
            sections.lists.push((path.to_string(), items.clone()));
        }
        _ => sections.fields.push((path.to_string(), format_scalar(value))),
    }
}

pub(crate) fn format_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(items) => items
            .iter()
            .map(format_scalar)
            .collect::<Vec<_>>()
            .join("; "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Headers of a record list: keys in first-seen order across every record.
pub(crate) fn record_headers(records: &[Value]) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for record in records {
        if let Value::Object(map) = record {
            for key in map.keys() {
                if !headers.contains(key) {
                    headers.push(key.clone());
                }
            }
        }
    }
    headers
}

pub(crate) fn record_row(record: &Value, headers: &[String]) -> Vec<String> {
    headers
        .iter()
        .map(|h| record.get(h).map(format_scalar).unwrap_or_default())
        .collect()
}

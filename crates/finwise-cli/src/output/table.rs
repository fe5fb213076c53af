use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{record_headers, record_row, split_result};

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    println!("{}", render_table(value));
}

pub(crate) fn render_table(value: &Value) -> String {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let mut out = match result {
        Value::Array(records) => records_table(records),
        _ => result_tables(result),
    };

    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            out.push_str("\n\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                out.push_str(&format!("\n  - {w}"));
            }
        }
    }
    if let Some(Value::String(meth)) = value.get("methodology") {
        out.push_str(&format!("\n\nMethodology: {meth}"));
    }
    out
}

fn result_tables(result: &Value) -> String {
    let sections = split_result(result);

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in &sections.fields {
        builder.push_record([key.as_str(), val.as_str()]);
    }
    let mut out = Table::from(builder).to_string();

    for (name, records) in &sections.lists {
        out.push_str(&format!("\n\n{name}:\n"));
        out.push_str(&records_table(records));
    }
    out
}

fn records_table(records: &[Value]) -> String {
    if records.is_empty() {
        return "(none)".to_string();
    }
    let headers = record_headers(records);
    let mut builder = Builder::default();
    builder.push_record(headers.iter().map(String::as_str));
    for record in records {
        builder.push_record(record_row(record, &headers));
    }
    Table::from(builder).to_string()
}

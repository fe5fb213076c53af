use serde_json::Value;
use std::io::{self, Write};

use super::{record_headers, record_row, split_result};

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    if let Err(e) = write_csv(&mut io::stdout().lock(), value) {
        eprintln!("CSV output error: {e}");
    }
}

pub(crate) fn write_csv<W: Write>(
    out: &mut W,
    value: &Value,
) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = render_csv(value)?;
    out.write_all(&bytes)?;
    out.flush()?;
    Ok(())
}

/// Record results become one row per record; object results become
/// `field,value` rows, with nested lists addressed as `alerts.0.type`.
pub(crate) fn render_csv(value: &Value) -> Result<Vec<u8>, csv::Error> {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let mut wtr = csv::Writer::from_writer(Vec::new());
    match result {
        Value::Array(records) if records.iter().all(Value::is_object) => {
            let headers = record_headers(records);
            if !headers.is_empty() {
                wtr.write_record(&headers)?;
            }
            for record in records {
                wtr.write_record(record_row(record, &headers))?;
            }
        }
        _ => {
            wtr.write_record(["field", "value"])?;
            write_fields(&mut wtr, result, "")?;
        }
    }
    wtr.flush()?;
    wtr.into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

fn write_fields(
    wtr: &mut csv::Writer<Vec<u8>>,
    value: &Value,
    prefix: &str,
) -> Result<(), csv::Error> {
    let sections = split_result(value);
    for (key, val) in &sections.fields {
        wtr.write_record([join(prefix, key).as_str(), val.as_str()])?;
    }
    for (name, records) in &sections.lists {
        for (i, record) in records.iter().enumerate() {
            write_fields(wtr, record, &join(prefix, &format!("{name}.{i}")))?;
        }
    }
    Ok(())
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: Value) -> String {
        String::from_utf8(render_csv(&value).unwrap()).unwrap()
    }

    #[test]
    fn test_object_result_rows() {
        let out = render(json!({
            "result": {
                "score": 68,
                "breakdown": { "debt_score": 83 },
                "alerts": [{ "type": "Low Savings" }],
            }
        }));
        assert!(out.starts_with("field,value\n"));
        assert!(out.contains("score,68\n"));
        assert!(out.contains("breakdown.debt_score,83\n"));
        assert!(out.contains("alerts.0.type,Low Savings\n"));
    }

    #[test]
    fn test_record_result_rows() {
        let out = render(json!({
            "result": [
                { "description": "Uber trip", "category": "Transport" },
                { "description": "rent", "category": "Uncategorized" },
            ]
        }));
        assert_eq!(
            out,
            "category,description\nTransport,Uber trip\nUncategorized,rent\n"
        );
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_reported() {
        let err = write_csv(&mut ClosedPipe, &json!({ "result": { "score": 68 } })).unwrap_err();
        assert!(err.to_string().contains("pipe"));
    }

    #[test]
    fn test_write_csv_to_buffer() {
        let mut out = Vec::new();
        write_csv(&mut out, &json!({ "result": { "score": 68 } })).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "field,value\nscore,68\n");
    }
}

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use csv::Writer;
use indexmap::IndexSet;
use serde_json::Value;
use tracing::debug;

use crate::reader::Row;

/// Serialize `rows` to `path` as comma-delimited CSV.
///
/// The header is the union of every row's keys in first-seen order, not
/// just the first row's keys. Cells a row has no value for, and null
/// values, render as empty strings. An empty row sequence produces a
/// zero-byte file with no header.
pub fn write_csv(rows: &[Row], path: &Path) -> Result<()> {
    if rows.is_empty() {
        File::create(path)
            .with_context(|| format!("Cannot create output file: {}", path.display()))?;
        return Ok(());
    }

    let mut columns: IndexSet<String> = IndexSet::new();
    for row in rows {
        for key in row.keys() {
            if !columns.contains(key.as_str()) {
                columns.insert(key.clone());
            }
        }
    }
    debug!(rows = rows.len(), columns = columns.len(), "writing csv");

    let mut wtr = Writer::from_path(path)
        .with_context(|| format!("Cannot create output file: {}", path.display()))?;
    wtr.write_record(&columns)?;

    for row in rows {
        let record: Vec<String> = columns
            .iter()
            .map(|name| row.get(name).map(cell_text).unwrap_or_default())
            .collect();
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        // For arrays/objects, fall back to compact JSON representation
        other => other.to_string(),
    }
}

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};
use tracing::debug;

/// One output record: column name to value, in insertion order.
///
/// Requires serde_json's `preserve_order` feature so that keys iterate in
/// the order the source presented them.
pub type Row = Map<String, Value>;

/// Number of leading characters inspected by the delimiter heuristic.
const SNIFF_LEN: usize = 2048;

/// Load `path` and produce its ordered row sequence.
///
/// A `.json` path must decode to an array of objects or an object of
/// arrays; any other path is parsed as delimited text with the delimiter
/// picked by [`sniff_delimiter`].
pub fn read_rows(path: &Path) -> Result<Vec<Row>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Cannot open input file: {}", path.display()))?;

    if path.extension().is_some_and(|ext| ext == "json") {
        let data: Value = serde_json::from_str(&text)
            .with_context(|| format!("JSON parse error in {}", path.display()))?;
        json_to_rows(data)
    } else {
        read_delimited(&text)
    }
}

/// Flatten a decoded JSON document into rows.
///
/// An array of objects is used directly. An object of arrays is transposed
/// positionally: one row per index up to the longest array, shorter arrays
/// padded with null.
fn json_to_rows(data: Value) -> Result<Vec<Row>> {
    match data {
        Value::Array(items) => {
            let mut rows = Vec::with_capacity(items.len());
            for (idx, item) in items.into_iter().enumerate() {
                match item {
                    Value::Object(map) => rows.push(map),
                    _ => bail!("unsupported JSON structure: element {idx} is not an object"),
                }
            }
            Ok(rows)
        }
        Value::Object(map) => {
            let mut columns = Vec::with_capacity(map.len());
            for (key, value) in map {
                match value {
                    Value::Array(items) => columns.push((key, items)),
                    _ => bail!("unsupported JSON structure: value of {key:?} is not an array"),
                }
            }
            let height = columns.iter().map(|(_, items)| items.len()).max().unwrap_or(0);
            let mut rows = Vec::with_capacity(height);
            for i in 0..height {
                let mut row = Row::new();
                for (key, items) in &columns {
                    row.insert(key.clone(), items.get(i).cloned().unwrap_or(Value::Null));
                }
                rows.push(row);
            }
            debug!(columns = columns.len(), rows = rows.len(), "transposed object of arrays");
            Ok(rows)
        }
        _ => bail!("unsupported JSON structure: expected an array of objects or an object of arrays"),
    }
}

/// Parse delimited text, first line as header, each following line keyed by
/// that header. Short records leave their trailing columns null; fields
/// beyond the header width are dropped.
fn read_delimited(text: &str) -> Result<Vec<Row>> {
    let delimiter = sniff_delimiter(text);
    debug!(
        delimiter = if delimiter == b'\t' { "tab" } else { "comma" },
        "sniffed delimiter"
    );

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers: Vec<String> = reader
        .headers()
        .context("malformed header line")?
        .iter()
        .map(str::to_owned)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("malformed delimited record")?;
        let mut row = Row::new();
        for (i, name) in headers.iter().enumerate() {
            let cell = match record.get(i) {
                Some(field) => Value::String(field.to_owned()),
                None => Value::Null,
            };
            row.insert(name.clone(), cell);
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Pick tab or comma by counting both in the first [`SNIFF_LEN`] characters.
/// Tab wins only when present and strictly more frequent than comma.
fn sniff_delimiter(text: &str) -> u8 {
    let mut tabs = 0usize;
    let mut commas = 0usize;
    for c in text.chars().take(SNIFF_LEN) {
        match c {
            '\t' => tabs += 1,
            ',' => commas += 1,
            _ => {}
        }
    }
    if tabs > 0 && tabs > commas { b'\t' } else { b',' }
}

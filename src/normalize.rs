use crate::error::DoqlError;
use crate::runner::{Column, NOOP_QUERY, QueryResult, Row};
use serde_json::Value;

/// Decode a comma-delimited payload with a header row into keyed rows.
///
/// Every row carries the full header key set: short records are padded with
/// empty strings and fields beyond the header are dropped. Cell values stay
/// strings regardless of what they look like.
pub fn parse_rows(payload: &str) -> Result<Vec<Row>, DoqlError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(payload.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| DoqlError::Decode {
            message: format!("invalid header row: {}", e),
        })?
        .clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| DoqlError::Decode {
            message: format!("invalid row: {}", e),
        })?;
        let mut row = Row::new();
        for (i, key) in headers.iter().enumerate() {
            let value = record.get(i).unwrap_or("");
            row.insert(key.to_string(), Value::String(value.to_string()));
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Columns inferred from the first row's keys, or `None` when there are no
/// rows. Types are unknown, so every column comes out untyped.
pub fn infer_columns(rows: &[Row]) -> Option<Vec<Column>> {
    rows.first()
        .map(|first| first.keys().map(|name| Column::untyped(name.as_str())).collect())
}

/// True when decoded output has the probe's expected shape: exactly one row
/// with exactly one column whose value parses as the integer 1.
fn is_probe_hit(rows: &[Row]) -> bool {
    if rows.len() != 1 {
        return false;
    }
    let row = &rows[0];
    if row.len() != 1 {
        return false;
    }
    match row.values().next() {
        Some(Value::String(value)) => matches!(value.trim().parse::<i64>(), Ok(1)),
        _ => false,
    }
}

/// Normalize a raw payload for `query` into a result, applying the probe
/// short-circuit and the empty-result policy.
///
/// `query` is the text as submitted by the host, before comment stripping:
/// an annotated probe is an ordinary query, not a connectivity check.
pub fn normalize(query: &str, payload: &str) -> Result<QueryResult, DoqlError> {
    let rows = parse_rows(payload)?;

    if query == NOOP_QUERY && is_probe_hit(&rows) {
        return Ok(QueryResult::empty());
    }

    match infer_columns(&rows) {
        Some(columns) => Ok(QueryResult {
            columns: Some(columns),
            rows,
        }),
        None => Err(DoqlError::NoResults),
    }
}

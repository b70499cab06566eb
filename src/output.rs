use crate::error::DoqlError;
use crate::runner::{QueryResult, SchemaEntry};
use std::path::Path;

/// Serialize a query result as the wire JSON object.
pub fn result_json(result: &QueryResult) -> Result<String, DoqlError> {
    serde_json::to_string_pretty(result).map_err(|e| DoqlError::Format {
        message: e.to_string(),
    })
}

/// Serialize introspected schema entries as a JSON array.
pub fn schema_json(entries: &[SchemaEntry]) -> Result<String, DoqlError> {
    serde_json::to_string_pretty(entries).map_err(|e| DoqlError::Format {
        message: e.to_string(),
    })
}

/// Print serialized JSON to stdout.
pub fn print_result(json: &str) {
    println!("{}", json);
}

/// Print error to stderr in the contract format: error: <message>
pub fn print_error(err: &DoqlError) {
    eprintln!("error: {}", err);
}

/// Write serialized JSON to a file.
pub fn write_file(json: &str, path: &Path) -> Result<(), DoqlError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        return Err(DoqlError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("parent directory does not exist: {}", parent.display()),
        )));
    }
    std::fs::write(path, json)?;
    Ok(())
}

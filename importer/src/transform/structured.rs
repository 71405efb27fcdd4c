//! Tolerant parsing of cells that carry embedded JSON.
//!
//! Spreadsheet exports often wrap a JSON cell in an extra pair of quotes and
//! double the inner ones (`"{""a"":1}"`). This unwraps that form before
//! parsing. Anything that still fails to parse falls back to the caller's
//! default with a warning; it is never an error.

use serde_json::Value;
use tracing::warn;

/// Parse `value` as JSON, falling back to `default` when empty or malformed.
pub fn parse_structured_field(value: &str, default: Value) -> Value {
    if value.trim().is_empty() {
        return default;
    }

    let unwrapped;
    let candidate = if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        unwrapped = value[1..value.len() - 1].replace("\"\"", "\"");
        unwrapped.as_str()
    } else {
        value
    };

    match serde_json::from_str(candidate) {
        Ok(parsed) => parsed,
        Err(e) => {
            let preview: String = value.chars().take(50).collect();
            warn!("Failed to parse structured field: {preview}... Error: {e}");
            default
        }
    }
}

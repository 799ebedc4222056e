//! JSON output formatting

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Wrapper for JSON output with metadata
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T> {
    /// The actual data
    pub data: T,

    /// Metadata about the response
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct Metadata {
    /// Timestamp of the response
    pub timestamp: String,

    /// CLI version
    pub version: String,
}

impl<T> JsonOutput<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}

/// Format data as pretty-printed JSON inside the `{data, meta}` wrapper
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data))
}

/// Print a single result (a mutation outcome, a record) as wrapped JSON
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> crate::error::Result<()> {
    println!("{}", format_json(data)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn test_wrapper_carries_version() {
        let output = JsonOutput::new("ok");
        assert_eq!(output.meta.version, env!("CARGO_PKG_VERSION"));
        assert!(!output.meta.timestamp.is_empty());
    }

    #[test]
    fn test_format_json_shape() {
        let result = format_json(&json!({"code": "ABCD-1234", "status": "ACTIVE"})).unwrap();
        let parsed: Value = serde_json::from_str(&result).unwrap();

        assert_eq!(parsed["data"]["code"], "ABCD-1234");
        assert!(parsed["meta"]["timestamp"].is_string());
    }

    #[test]
    fn test_format_json_empty_list() {
        let items: Vec<String> = vec![];
        assert!(format_json(&items).unwrap().contains("\"data\": []"));
    }
}

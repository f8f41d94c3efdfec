use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::{LinkError, Result};

/// A decoded result row: column name to scalar value.
pub type Row = serde_json::Map<String, JsonValue>;

/// Response envelope returned by the remote query endpoint.
///
/// ```json
/// {
///   "success": true,
///   "result": [{ "results": [...], "success": true, "meta": {...} }],
///   "errors": [],
///   "messages": []
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Whether the provider accepted and executed the call
    pub success: bool,

    /// One result set per executed statement
    #[serde(default)]
    pub result: Vec<ResultSet>,

    /// Provider error list, populated when `success` is false
    #[serde(default)]
    pub errors: Vec<String>,

    /// Informational messages from the provider
    #[serde(default)]
    pub messages: Vec<String>,
}

/// A single result set within a [`QueryResponse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultSet {
    /// Decoded rows for this statement
    #[serde(default)]
    pub results: Vec<Row>,

    /// Per-statement success flag
    #[serde(default = "default_true")]
    pub success: bool,

    /// Execution statistics, when the provider reports them
    #[serde(default)]
    pub meta: Option<QueryMeta>,
}

/// Execution statistics attached to a result set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryMeta {
    #[serde(default)]
    pub changed_db: bool,
    #[serde(default)]
    pub changes: u64,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub last_row_id: i64,
    #[serde(default)]
    pub rows_read: u64,
    #[serde(default)]
    pub rows_written: u64,
}

fn default_true() -> bool {
    true
}

impl QueryResponse {
    /// Interpret the envelope into rows.
    ///
    /// `success == false` becomes [`LinkError::Remote`] with the provider's
    /// error list. An empty or missing `result` collection is a valid empty
    /// row set, not an error.
    ///
    /// Only the FIRST result set is surfaced. The provider returns one entry
    /// per statement of a multi-statement call; callers must issue one
    /// statement per call to get predictable results.
    pub fn into_rows(self) -> Result<Vec<Row>> {
        if !self.success {
            return Err(LinkError::Remote {
                errors: self.errors,
            });
        }
        Ok(self
            .result
            .into_iter()
            .next()
            .map(|set| set.results)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: JsonValue) -> QueryResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_result_is_empty_rows_not_error() {
        let envelope = decode(json!({ "success": true, "result": [] }));
        assert_eq!(envelope.into_rows().unwrap(), Vec::<Row>::new());
    }

    #[test]
    fn test_missing_result_is_empty_rows() {
        let envelope = decode(json!({ "success": true }));
        assert_eq!(envelope.into_rows().unwrap(), Vec::<Row>::new());
    }

    #[test]
    fn test_failure_carries_provider_errors() {
        let envelope = decode(json!({
            "success": false,
            "result": [],
            "errors": ["no such table: users"],
            "messages": []
        }));
        match envelope.into_rows() {
            Err(LinkError::Remote { errors }) => {
                assert_eq!(errors, vec!["no such table: users".to_string()]);
            }
            other => panic!("expected Remote error, got {:?}", other),
        }
    }

    #[test]
    fn test_only_first_result_set_is_surfaced() {
        let envelope = decode(json!({
            "success": true,
            "result": [
                { "results": [{ "name": "users" }], "success": true },
                { "results": [{ "name": "toasts" }], "success": true }
            ]
        }));
        let rows = envelope.into_rows().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["name"], json!("users"));
    }

    #[test]
    fn test_meta_fields_all_optional() {
        let envelope = decode(json!({
            "success": true,
            "result": [{ "results": [], "success": true, "meta": { "changes": 2 } }]
        }));
        let meta = envelope.result[0].meta.clone().unwrap();
        assert_eq!(meta.changes, 2);
        assert_eq!(meta.rows_written, 0);
    }
}

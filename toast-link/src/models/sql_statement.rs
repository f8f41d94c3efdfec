use serde::Serialize;
use serde_json::Value as JsonValue;

/// A single SQL statement with its ordered bind parameters.
///
/// This is also the request payload for the remote query endpoint: it
/// serializes to `{ "sql": ..., "params": [...] }`, with `params` omitted
/// entirely when the statement has none.
///
/// Parameter count is never validated against the number of `?`
/// placeholders; a mismatch surfaces as a remote execution error.
///
/// # Examples
///
/// ```rust
/// use toast_link::SqlStatement;
/// use serde_json::json;
///
/// let plain = SqlStatement::new("SELECT userID, name FROM users");
///
/// let bound = SqlStatement::with_params(
///     "SELECT userID, name FROM users WHERE userID = ?",
///     vec![json!("550e8400-e29b-41d4-a716-446655440001")],
/// );
/// # let _ = (plain, bound);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct SqlStatement {
    /// SQL text (may contain `?` placeholders)
    pub sql: String,

    /// Ordered values for the placeholders; JSON scalars only
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<JsonValue>,
}

impl SqlStatement {
    /// Create a statement without parameters
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Create a statement with bind parameters
    pub fn with_params(sql: impl Into<String>, params: Vec<JsonValue>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }
}

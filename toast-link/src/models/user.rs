use serde::{Deserialize, Serialize};

/// A registered user.
///
/// Serde names match the database column names (`userID`, `name`) so a
/// decoded [`Row`](super::Row) deserializes directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// UUID stored as text
    #[serde(rename = "userID")]
    pub user_id: String,

    /// Display name
    pub name: String,
}

impl User {
    pub fn new(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
        }
    }
}

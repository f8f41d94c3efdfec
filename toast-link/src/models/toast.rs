use serde::{Deserialize, Serialize};

/// A directed "cheers" event from one user (toaster) to another (toastie).
///
/// Serde names match the database column names so a decoded
/// [`Row`](super::Row) deserializes directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    /// UUID stored as text
    #[serde(rename = "toastID")]
    pub toast_id: String,

    /// Sender, references `users.userID`
    #[serde(rename = "toasterID")]
    pub toaster_id: String,

    /// Recipient, references `users.userID`
    #[serde(rename = "toastieID")]
    pub toastie_id: String,

    /// ISO timestamp; empty on a toast that has not been inserted yet
    /// (the database assigns CURRENT_TIMESTAMP on insert)
    #[serde(rename = "toastTime", default)]
    pub toast_time: String,
}

impl Toast {
    /// A new toast whose timestamp will be assigned by the database.
    pub fn new(
        toast_id: impl Into<String>,
        toaster_id: impl Into<String>,
        toastie_id: impl Into<String>,
    ) -> Self {
        Self {
            toast_id: toast_id.into(),
            toaster_id: toaster_id.into(),
            toastie_id: toastie_id.into(),
            toast_time: String::new(),
        }
    }
}

/// Toasts involving one user, split by role.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserToasts {
    /// Toasts the user sent (as toaster)
    pub sent: Vec<Toast>,

    /// Toasts the user received (as toastie)
    pub received: Vec<Toast>,
}

//! The fixed sample dataset used by the seed commands.
//!
//! Stable UUIDs keep re-seeding idempotent: every run inserts the same
//! primary keys with INSERT OR IGNORE.

use toast_link::{Toast, User};

/// The four sample users.
pub fn sample_users() -> Vec<User> {
    vec![
        User::new("550e8400-e29b-41d4-a716-446655440001", "Alice Johnson"),
        User::new("550e8400-e29b-41d4-a716-446655440002", "Bob Smith"),
        User::new("550e8400-e29b-41d4-a716-446655440003", "Charlie Brown"),
        User::new("550e8400-e29b-41d4-a716-446655440004", "Diana Prince"),
    ]
}

/// The four sample toasts; every foreign key references a sample user.
pub fn sample_toasts() -> Vec<Toast> {
    vec![
        // Alice -> Bob
        Toast::new(
            "650e8400-e29b-41d4-a716-446655440001",
            "550e8400-e29b-41d4-a716-446655440001",
            "550e8400-e29b-41d4-a716-446655440002",
        ),
        // Bob -> Charlie
        Toast::new(
            "650e8400-e29b-41d4-a716-446655440002",
            "550e8400-e29b-41d4-a716-446655440002",
            "550e8400-e29b-41d4-a716-446655440003",
        ),
        // Charlie -> Alice
        Toast::new(
            "650e8400-e29b-41d4-a716-446655440003",
            "550e8400-e29b-41d4-a716-446655440003",
            "550e8400-e29b-41d4-a716-446655440001",
        ),
        // Diana -> Alice
        Toast::new(
            "650e8400-e29b-41d4-a716-446655440004",
            "550e8400-e29b-41d4-a716-446655440004",
            "550e8400-e29b-41d4-a716-446655440001",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_toast_references_a_sample_user() {
        let user_ids: HashSet<String> =
            sample_users().into_iter().map(|u| u.user_id).collect();
        for toast in sample_toasts() {
            assert!(user_ids.contains(&toast.toaster_id));
            assert!(user_ids.contains(&toast.toastie_id));
        }
    }

    #[test]
    fn test_sample_ids_are_unique() {
        let users = sample_users();
        let unique: HashSet<_> = users.iter().map(|u| &u.user_id).collect();
        assert_eq!(unique.len(), users.len());

        let toasts = sample_toasts();
        let unique: HashSet<_> = toasts.iter().map(|t| &t.toast_id).collect();
        assert_eq!(unique.len(), toasts.len());
    }
}

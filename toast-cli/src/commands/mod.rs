//! One module per maintenance subcommand.

pub mod clear;
pub mod migrate;
pub mod seed;
pub mod setup;
pub mod sync;
pub mod test_connection;

/// Truncated id for log lines (`650e8400...`).
pub(crate) fn short_id(id: &str) -> String {
    let prefix: String = id.chars().take(8).collect();
    format!("{}...", prefix)
}

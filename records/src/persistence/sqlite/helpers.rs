//! Shared helpers for SQLite ↔ domain conversions.

use std::str::FromStr;

use crate::persistence::{ListOrder, PersistenceError};

/// Decode a status column back into its enum.
///
/// The schema CHECK constraints make a failure here a sign of a corrupt
/// or hand-edited database file.
pub fn decode_status<S>(column: &'static str, text: &str) -> Result<S, PersistenceError>
where
    S: FromStr,
    S::Err: std::fmt::Display,
{
    text.parse::<S>()
        .map_err(|e| PersistenceError::Corrupt(format!("{column}: {e}")))
}

/// `ORDER BY` clause for a list call. `timestamp_column` is the creation
/// timestamp used for newest-first ordering.
pub fn order_clause(order: ListOrder, timestamp_column: &str) -> String {
    match order {
        ListOrder::Id => "ORDER BY id ASC".to_string(),
        ListOrder::NewestFirst => format!("ORDER BY {timestamp_column} DESC, id DESC"),
    }
}

/// Comma-separated `?` placeholders for an `IN (...)` list of `n` values.
pub fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

//! Stateless helpers shared across pipeline stages.

use chrono::{DateTime, Utc};

/// Epoch milliseconds for a timestamp, the unit used by header error
/// timestamps and stage metrics.
pub fn time_to_millis(time: DateTime<Utc>) -> i64 {
    time.timestamp_millis()
}

/// Uppercases the first character.
pub fn uc_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercases the first character.
pub fn lc_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The final `/`-separated segment of a field path, e.g. `c` for `/a/b/c`.
pub fn last_field_name_from_path(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

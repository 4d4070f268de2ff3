//! Configuration for the `municipal` CLI.
//!
//! Paths default to locations under `./data` and can be overridden with
//! `--db` and `export --output`.

use std::path::PathBuf;

/// Default export file path.
const DEFAULT_EXPORT_PATH: &str = "data/export.json";

/// Log filter used when `RUST_LOG` is unset. Kept quiet so tables and
/// confirmation lines are the only thing on a normal run.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Get the default database path.
pub fn get_db_path() -> PathBuf {
    PathBuf::from(records::DEFAULT_DB_PATH)
}

/// Get the default file `export` writes to.
pub fn get_export_path() -> PathBuf {
    PathBuf::from(DEFAULT_EXPORT_PATH)
}

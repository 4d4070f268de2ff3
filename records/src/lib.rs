//! Municipal back-office records: residents, service requests, permits,
//! department contacts, and follow-up tasks, stored in SQLite.
//!
//! Both front-ends (`municipal-server` and the `municipal` CLI) open a
//! [`Database`], wrap it in a [`Registry`], and call the repository traits
//! in [`persistence`]. Each call performs one insert, filtered scan, or
//! point update.

pub mod export;
pub mod model;
pub mod persistence;
mod registry;

pub use export::ExportDocument;
pub use persistence::sqlite::Database;
pub use persistence::{ListOrder, PersistenceError};
pub use registry::Registry;

/// Default location of the database file, relative to the working
/// directory.
pub const DEFAULT_DB_PATH: &str = "data/municipal.db";

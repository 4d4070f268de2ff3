//! SQLite-backed repository implementations.
//!
//! ## Database setup
//!
//! [`Database`] wraps a `sqlx::SqlitePool` configured with:
//! - **WAL mode**: one writer and multiple concurrent readers; writers are
//!   serialized by SQLite's file lock, with a busy timeout instead of an
//!   immediate failure.
//! - **Embedded migrations**: `sqlx::migrate!` applies
//!   `migrations/0001_initial_schema.sql` when [`Database::open`] is called.
//!   The schema is only created once and existing rows are never touched.
//!
//! ## Repository types
//!
//! Each `Sqlite*Repository` holds a clone of the pool and implements the
//! corresponding trait from [`crate::persistence::traits`]:
//!
//! | Type | Trait |
//! |------|-------|
//! | [`SqliteResidentRepository`] | `ResidentRepository` |
//! | [`SqliteServiceRequestRepository`] | `ServiceRequestRepository` |
//! | [`SqlitePermitRepository`] | `PermitRepository` |
//! | [`SqliteContactRepository`] | `ContactRepository` |
//! | [`SqliteTaskRepository`] | `TaskRepository` |
//!
//! Status columns are stored as `TEXT` guarded by CHECK constraints and
//! decoded through [`helpers::decode_status`]. Status changes and permit
//! decisions are single conditional `UPDATE ... RETURNING` statements, so
//! the check and the write cannot interleave with another writer.

mod contact_repo;
mod database;
mod permit_repo;
mod resident_repo;
mod service_request_repo;
mod task_repo;
pub(crate) mod helpers;

pub use contact_repo::SqliteContactRepository;
pub use database::Database;
pub use permit_repo::SqlitePermitRepository;
pub use resident_repo::SqliteResidentRepository;
pub use service_request_repo::SqliteServiceRequestRepository;
pub use task_repo::SqliteTaskRepository;

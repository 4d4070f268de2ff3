//! Persistence layer: repository traits and their SQLite implementations.

pub mod sqlite;
pub mod traits;

use crate::model::{PermitStatus, RecordId, RecordKind};

pub use traits::{
    ContactRepository, PermitRepository, ResidentRepository, ServiceRequestRepository,
    TaskRepository,
};

/// Row ordering requested by a list call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListOrder {
    /// Insertion order (ascending id).
    #[default]
    Id,
    /// Most recent creation/submission timestamp first, ties broken by id.
    NewestFirst,
}

/// Errors from the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("{kind} {id} not found")]
    NotFound { kind: RecordKind, id: RecordId },
    #[error("invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: &'static str,
    },
    #[error("{kind} {id} cannot move from {from} to {to}")]
    InvalidTransition {
        kind: RecordKind,
        id: RecordId,
        from: &'static str,
        to: &'static str,
    },
    #[error("permit {id} was already decided as {status}")]
    AlreadyDecided { id: RecordId, status: PermitStatus },
    #[error("corrupt row: {0}")]
    Corrupt(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl PersistenceError {
    /// True for failures of the storage engine itself, as opposed to
    /// rejections of the caller's request.
    pub fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            PersistenceError::Corrupt(_)
                | PersistenceError::Io(_)
                | PersistenceError::Database(_)
                | PersistenceError::Migration(_)
        )
    }
}

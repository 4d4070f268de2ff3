//! One handle bundling the five repositories over a shared pool.

use crate::persistence::sqlite::{
    Database, SqliteContactRepository, SqlitePermitRepository, SqliteResidentRepository,
    SqliteServiceRequestRepository, SqliteTaskRepository,
};

/// The repositories both front-ends talk to.
///
/// Cloning is cheap: every repository only holds a clone of the pool.
#[derive(Clone)]
pub struct Registry {
    residents: SqliteResidentRepository,
    service_requests: SqliteServiceRequestRepository,
    permits: SqlitePermitRepository,
    contacts: SqliteContactRepository,
    tasks: SqliteTaskRepository,
}

impl Registry {
    pub fn new(db: &Database) -> Self {
        let pool = db.pool();
        Self {
            residents: SqliteResidentRepository::new(pool.clone()),
            service_requests: SqliteServiceRequestRepository::new(pool.clone()),
            permits: SqlitePermitRepository::new(pool.clone()),
            contacts: SqliteContactRepository::new(pool.clone()),
            tasks: SqliteTaskRepository::new(pool.clone()),
        }
    }

    pub fn residents(&self) -> &SqliteResidentRepository {
        &self.residents
    }

    pub fn service_requests(&self) -> &SqliteServiceRequestRepository {
        &self.service_requests
    }

    pub fn permits(&self) -> &SqlitePermitRepository {
        &self.permits
    }

    pub fn contacts(&self) -> &SqliteContactRepository {
        &self.contacts
    }

    pub fn tasks(&self) -> &SqliteTaskRepository {
        &self.tasks
    }
}

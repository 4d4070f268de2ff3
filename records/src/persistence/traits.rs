//! Async repository trait definitions for the persistence layer.
//!
//! Each trait covers one entity kind. Methods return `impl Future + Send`
//! rather than using `async fn` so that the futures are guaranteed `Send`,
//! which axum handlers require.
//!
//! Every update method must fail with [`PersistenceError::NotFound`] and
//! leave the store untouched when the id does not exist.

use super::{ListOrder, PersistenceError};
use crate::model::{
    Contact, NewContact, NewPermit, NewResident, NewServiceRequest, NewTask, Permit,
    PermitStatus, RecordId, Resident, ServiceRequest, ServiceRequestStatus, Task, TaskStatus,
};
use std::future::Future;

pub trait ResidentRepository: Send + Sync {
    fn create_resident(
        &self,
        new: &NewResident,
    ) -> impl Future<Output = Result<Resident, PersistenceError>> + Send;
    fn list_residents(&self) -> impl Future<Output = Result<Vec<Resident>, PersistenceError>> + Send;
    fn get_resident(
        &self,
        id: RecordId,
    ) -> impl Future<Output = Result<Option<Resident>, PersistenceError>> + Send;
}

/// Repository for service requests.
///
/// `update_status` enforces [`ServiceRequestStatus::can_transition_to`] and
/// stamps `updated_at`.
pub trait ServiceRequestRepository: Send + Sync {
    fn open_request(
        &self,
        new: &NewServiceRequest,
    ) -> impl Future<Output = Result<ServiceRequest, PersistenceError>> + Send;
    fn list_requests(
        &self,
        status: Option<ServiceRequestStatus>,
        order: ListOrder,
    ) -> impl Future<Output = Result<Vec<ServiceRequest>, PersistenceError>> + Send;
    fn get_request(
        &self,
        id: RecordId,
    ) -> impl Future<Output = Result<Option<ServiceRequest>, PersistenceError>> + Send;
    fn update_status(
        &self,
        id: RecordId,
        status: ServiceRequestStatus,
    ) -> impl Future<Output = Result<ServiceRequest, PersistenceError>> + Send;
}

/// Repository for permits.
///
/// `decide` maps the outcome through [`PermitStatus::from_outcome`]. A
/// permit that is already decided is returned unchanged when the outcome
/// matches its status, and rejected with
/// [`PersistenceError::AlreadyDecided`] otherwise.
pub trait PermitRepository: Send + Sync {
    fn apply(
        &self,
        new: &NewPermit,
    ) -> impl Future<Output = Result<Permit, PersistenceError>> + Send;
    fn list_permits(
        &self,
        status: Option<PermitStatus>,
        order: ListOrder,
    ) -> impl Future<Output = Result<Vec<Permit>, PersistenceError>> + Send;
    fn get_permit(
        &self,
        id: RecordId,
    ) -> impl Future<Output = Result<Option<Permit>, PersistenceError>> + Send;
    fn decide(
        &self,
        id: RecordId,
        outcome: &str,
    ) -> impl Future<Output = Result<Permit, PersistenceError>> + Send;
}

pub trait ContactRepository: Send + Sync {
    fn create_contact(
        &self,
        new: &NewContact,
    ) -> impl Future<Output = Result<Contact, PersistenceError>> + Send;
    fn list_contacts(
        &self,
        department: Option<&str>,
    ) -> impl Future<Output = Result<Vec<Contact>, PersistenceError>> + Send;
    fn get_contact(
        &self,
        id: RecordId,
    ) -> impl Future<Output = Result<Option<Contact>, PersistenceError>> + Send;
}

pub trait TaskRepository: Send + Sync {
    fn create_task(
        &self,
        new: &NewTask,
    ) -> impl Future<Output = Result<Task, PersistenceError>> + Send;
    fn list_tasks(
        &self,
        status: Option<TaskStatus>,
    ) -> impl Future<Output = Result<Vec<Task>, PersistenceError>> + Send;
    fn get_task(
        &self,
        id: RecordId,
    ) -> impl Future<Output = Result<Option<Task>, PersistenceError>> + Send;
    fn update_task_status(
        &self,
        id: RecordId,
        status: TaskStatus,
    ) -> impl Future<Output = Result<Task, PersistenceError>> + Send;
}

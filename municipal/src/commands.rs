//! One function per CLI action.
//!
//! Each function performs a single repository call and writes either a
//! table or one confirmation line to `out`. Failures return before anything
//! is written.

use std::io::Write;
use std::path::Path;

use records::model::{
    NewContact, NewPermit, NewResident, NewServiceRequest, NewTask, PermitStatus, RecordId,
    ServiceRequestStatus, TaskStatus,
};
use records::persistence::{
    ContactRepository, PermitRepository, ResidentRepository, ServiceRequestRepository,
    TaskRepository,
};
use records::{ExportDocument, ListOrder, Registry};

use crate::render;
use crate::CliError;

// ── Residents ──────────────────────────────────────────────────────────

pub async fn add_resident(
    registry: &Registry,
    new: NewResident,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let resident = registry.residents().create_resident(&new).await?;
    writeln!(out, "Added resident {} (id={})", resident.name, resident.id)?;
    Ok(())
}

pub async fn list_residents(registry: &Registry, out: &mut impl Write) -> Result<(), CliError> {
    let residents = registry.residents().list_residents().await?;
    render::residents_table(&residents).write_to(out)?;
    Ok(())
}

// ── Service requests ───────────────────────────────────────────────────

pub async fn open_request(
    registry: &Registry,
    new: NewServiceRequest,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let sr = registry.service_requests().open_request(&new).await?;
    writeln!(out, "Opened SR id={} category={}", sr.id, sr.category)?;
    Ok(())
}

pub async fn list_requests(
    registry: &Registry,
    status: Option<ServiceRequestStatus>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let requests = registry
        .service_requests()
        .list_requests(status, ListOrder::NewestFirst)
        .await?;
    render::service_requests_table(&requests).write_to(out)?;
    Ok(())
}

pub async fn update_request(
    registry: &Registry,
    id: RecordId,
    status: ServiceRequestStatus,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let sr = registry.service_requests().update_status(id, status).await?;
    writeln!(out, "Updated SR id={} -> status={}", sr.id, sr.status)?;
    Ok(())
}

// ── Permits ────────────────────────────────────────────────────────────

pub async fn apply_permit(
    registry: &Registry,
    new: NewPermit,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let permit = registry.permits().apply(&new).await?;
    writeln!(
        out,
        "Permit submitted id={} type={}",
        permit.id, permit.permit_type
    )?;
    Ok(())
}

pub async fn decide_permit(
    registry: &Registry,
    id: RecordId,
    outcome: &str,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let permit = registry.permits().decide(id, outcome).await?;
    writeln!(out, "Permit id={} -> {}", permit.id, permit.status)?;
    Ok(())
}

pub async fn list_permits(
    registry: &Registry,
    status: Option<PermitStatus>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let permits = registry
        .permits()
        .list_permits(status, ListOrder::NewestFirst)
        .await?;
    render::permits_table(&permits).write_to(out)?;
    Ok(())
}

// ── Contacts ───────────────────────────────────────────────────────────

pub async fn add_contact(
    registry: &Registry,
    new: NewContact,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let contact = registry.contacts().create_contact(&new).await?;
    writeln!(
        out,
        "Added contact id={} for {}",
        contact.id, contact.department
    )?;
    Ok(())
}

pub async fn list_contacts(
    registry: &Registry,
    department: Option<&str>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    // A blank department lists everyone.
    let department = department.filter(|d| !d.trim().is_empty());
    let contacts = registry.contacts().list_contacts(department).await?;
    render::contacts_table(&contacts).write_to(out)?;
    Ok(())
}

// ── Tasks ──────────────────────────────────────────────────────────────

pub async fn add_task(
    registry: &Registry,
    new: NewTask,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let task = registry.tasks().create_task(&new).await?;
    writeln!(out, "Added task id={} -> {}", task.id, task.title)?;
    Ok(())
}

pub async fn list_tasks(
    registry: &Registry,
    status: Option<TaskStatus>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let tasks = registry.tasks().list_tasks(status).await?;
    render::tasks_table(&tasks).write_to(out)?;
    Ok(())
}

pub async fn update_task(
    registry: &Registry,
    id: RecordId,
    status: TaskStatus,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let task = registry.tasks().update_task_status(id, status).await?;
    writeln!(out, "Task id={} -> {}", task.id, task.status)?;
    Ok(())
}

// ── Export ─────────────────────────────────────────────────────────────

pub async fn export(
    registry: &Registry,
    output: &Path,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let doc = ExportDocument::collect(registry).await?;
    doc.write_to(output)?;
    tracing::info!(records = doc.record_count(), path = %output.display(), "export written");
    writeln!(out, "Exported data to {}", output.display())?;
    Ok(())
}

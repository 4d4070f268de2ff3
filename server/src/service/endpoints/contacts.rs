use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use records::model::{Contact, NewContact};
use records::persistence::ContactRepository;

use crate::service::parsers::DepartmentFilter;
use crate::service::{ApiError, AppState};

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewContact>, JsonRejection>,
) -> Result<Json<Contact>, ApiError> {
    let Json(new) = payload?;
    tracing::info!(department = %new.department, name = %new.name, "POST /contacts");
    let contact = state.registry().contacts().create_contact(&new).await?;
    Ok(Json(contact))
}

pub async fn list(
    State(state): State<AppState>,
    filter: Result<Query<DepartmentFilter>, QueryRejection>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    let Query(filter) = filter?;
    tracing::info!(department = ?filter.department, "GET /contacts");
    let contacts = state
        .registry()
        .contacts()
        .list_contacts(filter.department.as_deref())
        .await?;
    Ok(Json(contacts))
}

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use records::model::{NewPermit, Permit, PermitStatus, RecordId};
use records::persistence::PermitRepository;
use records::ListOrder;

use crate::service::parsers::{DecideParams, StatusFilter};
use crate::service::{ApiError, AppState};

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewPermit>, JsonRejection>,
) -> Result<Json<Permit>, ApiError> {
    let Json(new) = payload?;
    tracing::info!(permit_type = %new.permit_type, resident_id = ?new.resident_id, "POST /permits");
    let permit = state.registry().permits().apply(&new).await?;
    Ok(Json(permit))
}

pub async fn list(
    State(state): State<AppState>,
    filter: Result<Query<StatusFilter<PermitStatus>>, QueryRejection>,
) -> Result<Json<Vec<Permit>>, ApiError> {
    let Query(filter) = filter?;
    tracing::info!(status = ?filter.status, "GET /permits");
    let permits = state
        .registry()
        .permits()
        .list_permits(filter.status, ListOrder::Id)
        .await?;
    Ok(Json(permits))
}

/// `POST /permits/:id/decide?outcome=...`
///
/// Only the literal outcome `approved` approves; anything else rejects.
pub async fn decide(
    State(state): State<AppState>,
    id: Result<Path<RecordId>, PathRejection>,
    params: Result<Query<DecideParams>, QueryRejection>,
) -> Result<Json<Permit>, ApiError> {
    let Path(id) = id?;
    let Query(params) = params?;
    tracing::info!(id, outcome = %params.outcome, "POST /permits/:id/decide");
    let permit = state.registry().permits().decide(id, &params.outcome).await?;
    Ok(Json(permit))
}

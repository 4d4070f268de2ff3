use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use records::model::{NewServiceRequest, ServiceRequest, ServiceRequestStatus};
use records::persistence::ServiceRequestRepository;
use records::ListOrder;

use crate::service::parsers::StatusFilter;
use crate::service::{ApiError, AppState};

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewServiceRequest>, JsonRejection>,
) -> Result<Json<ServiceRequest>, ApiError> {
    let Json(new) = payload?;
    tracing::info!(category = %new.category, resident_id = ?new.resident_id, "POST /service-requests");
    let request = state.registry().service_requests().open_request(&new).await?;
    Ok(Json(request))
}

pub async fn list(
    State(state): State<AppState>,
    filter: Result<Query<StatusFilter<ServiceRequestStatus>>, QueryRejection>,
) -> Result<Json<Vec<ServiceRequest>>, ApiError> {
    let Query(filter) = filter?;
    tracing::info!(status = ?filter.status, "GET /service-requests");
    let requests = state
        .registry()
        .service_requests()
        .list_requests(filter.status, ListOrder::Id)
        .await?;
    Ok(Json(requests))
}

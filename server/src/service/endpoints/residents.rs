use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use records::model::{NewResident, Resident};
use records::persistence::ResidentRepository;

use crate::service::{ApiError, AppState};

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewResident>, JsonRejection>,
) -> Result<Json<Resident>, ApiError> {
    let Json(new) = payload?;
    tracing::info!(name = %new.name, "POST /residents");
    let resident = state.registry().residents().create_resident(&new).await?;
    Ok(Json(resident))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Resident>>, ApiError> {
    tracing::info!("GET /residents");
    let residents = state.registry().residents().list_residents().await?;
    Ok(Json(residents))
}

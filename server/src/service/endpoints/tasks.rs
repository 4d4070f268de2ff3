use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use records::model::{NewTask, Task, TaskStatus};
use records::persistence::TaskRepository;

use crate::service::parsers::{StatusFilter, TaskIn};
use crate::service::{ApiError, AppState};

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<TaskIn>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let Json(task_in) = payload?;
    tracing::info!(title = %task_in.title, due = ?task_in.due, "POST /tasks");
    let new = NewTask::try_from(task_in)?;
    let task = state.registry().tasks().create_task(&new).await?;
    Ok(Json(task))
}

pub async fn list(
    State(state): State<AppState>,
    filter: Result<Query<StatusFilter<TaskStatus>>, QueryRejection>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let Query(filter) = filter?;
    tracing::info!(status = ?filter.status, "GET /tasks");
    let tasks = state.registry().tasks().list_tasks(filter.status).await?;
    Ok(Json(tasks))
}

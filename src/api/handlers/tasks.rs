//! Handlers for maintenance tasks nested under an appliance.

use axum::{
    Extension, Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::task::{CreateTaskRequest, TaskResponse, UpdateTaskRequest};
use crate::application::services::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// `POST /api/appliances/{id}/tasks` → 201 with the stored task.
pub async fn create_task_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskResponse>), AppError> {
    let Path(appliance_id) = path?;
    let Json(payload) = payload?;
    payload.validate()?;

    let task = state
        .appliance_service
        .add_task(auth.id(), appliance_id, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(task.into())))
}

/// Partially updates a task.
///
/// # Endpoint
///
/// `PUT /api/appliances/{id}/tasks/{task_id}`
///
/// # Errors
///
/// Returns 400 Bad Request for an empty body, 404 Not Found if the appliance
/// or task does not exist.
pub async fn update_task_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    path: Result<Path<(Uuid, Uuid)>, PathRejection>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Json<TaskResponse>, AppError> {
    let Path((appliance_id, task_id)) = path?;
    let Json(payload) = payload?;
    payload.validate_all()?;

    if payload.is_empty() {
        return Err(AppError::bad_request(
            "Update must change at least one field",
            json!({ "task_id": task_id }),
        ));
    }

    let task = state
        .appliance_service
        .update_task(auth.id(), appliance_id, task_id, payload.into())
        .await?;

    Ok(Json(task.into()))
}

/// `DELETE /api/appliances/{id}/tasks/{task_id}` → 204.
pub async fn delete_task_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    path: Result<Path<(Uuid, Uuid)>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path((appliance_id, task_id)) = path?;

    state
        .appliance_service
        .remove_task(auth.id(), appliance_id, task_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

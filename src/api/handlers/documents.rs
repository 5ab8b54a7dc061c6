//! Handlers for linked documents nested under an appliance.

use axum::{
    Extension, Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::document::{CreateDocumentRequest, DocumentResponse};
use crate::application::services::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// `POST /api/appliances/{id}/documents` → 201 with the stored link.
pub async fn create_document_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<CreateDocumentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<DocumentResponse>), AppError> {
    let Path(appliance_id) = path?;
    let Json(payload) = payload?;
    payload.validate()?;

    let document = state
        .appliance_service
        .add_document(auth.id(), appliance_id, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(document.into())))
}

/// `DELETE /api/appliances/{id}/documents/{document_id}` → 204.
pub async fn delete_document_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    path: Result<Path<(Uuid, Uuid)>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path((appliance_id, document_id)) = path?;

    state
        .appliance_service
        .remove_document(auth.id(), appliance_id, document_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

//! Handlers for support contacts nested under an appliance.

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

use crate::api::dto::contact::{ContactResponse, CreateContactRequest};
use crate::application::services::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// `POST /api/appliances/{id}/contacts` → 201 with the stored contact.
pub async fn create_contact_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<CreateContactRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ContactResponse>), AppError> {
    let Path(appliance_id) = path?;
    let Json(payload) = payload?;
    payload.validate()?;

    let contact = state
        .appliance_service
        .add_contact(auth.id(), appliance_id, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(contact.into())))
}

/// `DELETE /api/appliances/{id}/contacts/{contact_id}` → 204.
pub async fn delete_contact_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    path: Result<Path<(Uuid, Uuid)>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path((appliance_id, contact_id)) = path?;

    state
        .appliance_service
        .remove_contact(auth.id(), appliance_id, contact_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

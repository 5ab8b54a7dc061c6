//! Handler for the current-user endpoint.

use axum::{Extension, Json};

use crate::api::dto::user::MeResponse;
use crate::application::services::AuthUser;

/// Returns the user the Bearer token was issued for.
///
/// # Endpoint
///
/// `GET /api/me`
pub async fn me_handler(Extension(auth): Extension<AuthUser>) -> Json<MeResponse> {
    Json(auth.user.into())
}

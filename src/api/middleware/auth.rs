//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{error::AppError, state::AppState};

/// Authenticates requests using Bearer tokens from Authorization header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Authentication Flow
///
/// 1. Extract token from `Authorization` header
/// 2. Resolve the token hash to an active token and its user
/// 3. Update `last_used_at` timestamp
/// 4. Insert [`AuthUser`](crate::application::services::AuthUser) into the
///    request extensions so handlers scope every query to that user
///
/// # Errors
///
/// Returns `401 Unauthorized` if:
/// - Authorization header is missing
/// - Token format is invalid
/// - Token is not found or revoked
/// - The token's user no longer exists
///
/// Adds `WWW-Authenticate: Bearer` header to 401 responses per RFC 6750.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::auth;
///
/// let protected = Router::new()
///     .route("/appliances", get(list_appliances_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            metrics::counter!("auth_failures_total", "reason" => "missing_header").increment(1);
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let auth_user = match st.auth_service.authenticate(&token).await {
        Ok(user) => user,
        Err(e) => {
            if matches!(e, AppError::Unauthorized { .. }) {
                metrics::counter!("auth_failures_total", "reason" => "invalid_token")
                    .increment(1);
            }
            return Err(e);
        }
    };

    parts.extensions.insert(auth_user);
    let req = Request::from_parts(parts, body);

    Ok(next.run(req).await)
}

//! Handlers for appliance endpoints.

use axum::{
    Extension, Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::appliance::{
    ApplianceListQuery, ApplianceResponse, CreateApplianceRequest, UpdateApplianceRequest,
};
use crate::api::dto::stats::StatsResponse;
use crate::application::services::{ApplianceQuery, AuthUser};
use crate::error::AppError;
use crate::state::AppState;

/// Lists the caller's appliances.
///
/// # Endpoint
///
/// `GET /api/appliances?status=all|active|expiring|expired&search=`
///
/// `search` matches name, brand, or model (case-insensitive) and is applied
/// before the status filter. Each item carries `warrantyEndDate` and
/// `warrantyStatus` computed for today.
pub async fn list_appliances_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    query: Result<Query<ApplianceListQuery>, QueryRejection>,
) -> Result<Json<Vec<ApplianceResponse>>, AppError> {
    let Query(params) = query?;

    let appliances = state
        .appliance_service
        .list_appliances(
            auth.id(),
            ApplianceQuery {
                status: params.status,
                search: params.search,
            },
        )
        .await?;

    Ok(Json(appliances.into_iter().map(Into::into).collect()))
}

/// Counts the caller's appliances per warranty status.
///
/// # Endpoint
///
/// `GET /api/appliances/stats`
///
/// # Response
///
/// ```json
/// { "total": 4, "active": 2, "expiring": 1, "expired": 1, "asOf": "2025-01-01" }
/// ```
pub async fn appliance_stats_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<StatsResponse>, AppError> {
    let as_of = state.appliance_service.today();
    let summary = state.appliance_service.summarize(auth.id()).await?;

    Ok(Json(StatsResponse { summary, as_of }))
}

/// Creates an appliance.
///
/// # Endpoint
///
/// `POST /api/appliances`
///
/// # Errors
///
/// Returns 400 Bad Request for unknown fields, malformed dates, blank
/// names, or a warranty duration outside 1..=1200 months.
pub async fn create_appliance_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    payload: Result<Json<CreateApplianceRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApplianceResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let created = state
        .appliance_service
        .create_appliance(payload.into_new(auth.id()))
        .await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Returns one appliance with its nested records.
///
/// # Endpoint
///
/// `GET /api/appliances/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the caller has no appliance with this id.
pub async fn get_appliance_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ApplianceResponse>, AppError> {
    let Path(id) = path?;

    let appliance = state.appliance_service.get_appliance(auth.id(), id).await?;

    Ok(Json(appliance.into()))
}

/// Partially updates an appliance.
///
/// # Endpoint
///
/// `PUT /api/appliances/{id}`
///
/// Absent fields stay unchanged; `null` clears `serialNumber`,
/// `purchaseLocation`, or `notes`.
pub async fn update_appliance_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateApplianceRequest>, JsonRejection>,
) -> Result<Json<ApplianceResponse>, AppError> {
    let Path(id) = path?;
    let Json(payload) = payload?;
    payload.validate()?;

    let updated = state
        .appliance_service
        .update_appliance(auth.id(), id, payload.into())
        .await?;

    Ok(Json(updated.into()))
}

/// Deletes an appliance and all of its nested records.
///
/// # Endpoint
///
/// `DELETE /api/appliances/{id}` → 204 No Content
pub async fn delete_appliance_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = path?;

    state
        .appliance_service
        .delete_appliance(auth.id(), id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

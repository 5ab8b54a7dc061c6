//! API route configuration.
//!
//! All API endpoints require Bearer token authentication via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{
    appliance_stats_handler, create_appliance_handler, create_contact_handler,
    create_document_handler, create_task_handler, delete_appliance_handler,
    delete_contact_handler, delete_document_handler, delete_task_handler, get_appliance_handler,
    list_appliances_handler, me_handler, update_appliance_handler, update_task_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post, put},
};

/// All API routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `GET    /me`                                      - The authenticated user
/// - `GET    /appliances`                              - List with `status` / `search` filters
/// - `POST   /appliances`                              - Create an appliance
/// - `GET    /appliances/stats`                        - Warranty status counts
/// - `GET    /appliances/{id}`                         - Appliance detail
/// - `PUT    /appliances/{id}`                         - Partial update
/// - `DELETE /appliances/{id}`                         - Delete with nested records
/// - `POST   /appliances/{id}/contacts`                - Add a support contact
/// - `DELETE /appliances/{id}/contacts/{contact_id}`   - Remove a support contact
/// - `POST   /appliances/{id}/tasks`                   - Schedule a maintenance task
/// - `PUT    /appliances/{id}/tasks/{task_id}`         - Update a task
/// - `DELETE /appliances/{id}/tasks/{task_id}`         - Remove a task
/// - `POST   /appliances/{id}/documents`               - Link a document
/// - `DELETE /appliances/{id}/documents/{document_id}` - Unlink a document
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(me_handler))
        .route(
            "/appliances",
            get(list_appliances_handler).post(create_appliance_handler),
        )
        .route("/appliances/stats", get(appliance_stats_handler))
        .route(
            "/appliances/{id}",
            get(get_appliance_handler)
                .put(update_appliance_handler)
                .delete(delete_appliance_handler),
        )
        .route("/appliances/{id}/contacts", post(create_contact_handler))
        .route(
            "/appliances/{id}/contacts/{contact_id}",
            delete(delete_contact_handler),
        )
        .route("/appliances/{id}/tasks", post(create_task_handler))
        .route(
            "/appliances/{id}/tasks/{task_id}",
            put(update_task_handler).delete(delete_task_handler),
        )
        .route("/appliances/{id}/documents", post(create_document_handler))
        .route(
            "/appliances/{id}/documents/{document_id}",
            delete(delete_document_handler),
        )
}

mod common;

use axum::http::StatusCode;
use common::{TestApp, appliance_body, spawn_app};
use serde_json::{Value, json};
use uuid::Uuid;

async fn app_with_fridge() -> (TestApp, Uuid) {
    let app = spawn_app().await;
    let id = app
        .create_appliance(appliance_body("Fridge", "2024-06-01", 24))
        .await;
    (app, id)
}

async fn detail(app: &TestApp, id: Uuid) -> Value {
    app.server
        .get(&format!("/api/appliances/{id}"))
        .add_header("Authorization", app.bearer())
        .await
        .json::<Value>()
}

// ─── CONTACTS ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_add_and_remove_contact() {
    let (app, id) = app_with_fridge().await;

    let response = app
        .server
        .post(&format!("/api/appliances/{id}/contacts"))
        .add_header("Authorization", app.bearer())
        .json(&json!({
            "name": "Acme Support",
            "phone": "+1 555 0100",
            "email": "support@acme.example",
            "website": "https://acme.example/support"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let contact = response.json::<Value>();
    assert_eq!(contact["name"], "Acme Support");
    assert!(contact.get("company").is_none());
    let contact_id = contact["id"].as_str().unwrap().to_string();

    let json = detail(&app, id).await;
    assert_eq!(json["supportContacts"][0]["id"], contact_id.as_str());

    app.server
        .delete(&format!("/api/appliances/{id}/contacts/{contact_id}"))
        .add_header("Authorization", app.bearer())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    assert_eq!(detail(&app, id).await["supportContacts"], json!([]));

    app.server
        .delete(&format!("/api/appliances/{id}/contacts/{contact_id}"))
        .add_header("Authorization", app.bearer())
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_contact_rejects_bad_email() {
    let (app, id) = app_with_fridge().await;

    app.server
        .post(&format!("/api/appliances/{id}/contacts"))
        .add_header("Authorization", app.bearer())
        .json(&json!({ "name": "Acme", "email": "not-an-email" }))
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_contact_accepts_blank_optional_email() {
    let (app, id) = app_with_fridge().await;

    let response = app
        .server
        .post(&format!("/api/appliances/{id}/contacts"))
        .add_header("Authorization", app.bearer())
        .json(&json!({ "name": "Acme", "email": "", "website": " " }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let contact = response.json::<Value>();
    assert!(contact.get("email").is_none());
    assert!(contact.get("website").is_none());
}

#[tokio::test]
async fn test_contact_on_unknown_appliance() {
    let app = spawn_app().await;

    app.server
        .post(&format!("/api/appliances/{}/contacts", Uuid::new_v4()))
        .add_header("Authorization", app.bearer())
        .json(&json!({ "name": "Acme" }))
        .await
        .assert_status_not_found();
}

// ─── TASKS ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_schedule_and_complete_task() {
    let (app, id) = app_with_fridge().await;

    let response = app
        .server
        .post(&format!("/api/appliances/{id}/tasks"))
        .add_header("Authorization", app.bearer())
        .json(&json!({
            "taskName": "Clean coils",
            "scheduledDate": "2025-03-01",
            "frequency": "Yearly",
            "serviceProvider": { "name": "CoolFix", "phone": "555-0199" }
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let task = response.json::<Value>();
    assert_eq!(task["status"], "Upcoming");
    assert_eq!(task["frequency"], "Yearly");
    assert_eq!(task["applianceId"], id.to_string());
    assert_eq!(
        task["serviceProvider"],
        json!({ "name": "CoolFix", "phone": "555-0199" })
    );
    let task_id = task["id"].as_str().unwrap().to_string();

    let response = app
        .server
        .put(&format!("/api/appliances/{id}/tasks/{task_id}"))
        .add_header("Authorization", app.bearer())
        .json(&json!({
            "status": "Completed",
            "completedDate": "2025-03-02",
            "serviceProvider": null
        }))
        .await;

    response.assert_status_ok();

    let task = response.json::<Value>();
    assert_eq!(task["status"], "Completed");
    assert_eq!(task["completedDate"], "2025-03-02");
    assert_eq!(task["taskName"], "Clean coils");
    assert!(task.get("serviceProvider").is_none());

    let json = detail(&app, id).await;
    assert_eq!(json["maintenanceTasks"][0]["status"], "Completed");
}

#[tokio::test]
async fn test_task_accepts_blank_provider_email() {
    let (app, id) = app_with_fridge().await;

    let response = app
        .server
        .post(&format!("/api/appliances/{id}/tasks"))
        .add_header("Authorization", app.bearer())
        .json(&json!({
            "taskName": "Clean coils",
            "scheduledDate": "2025-03-01",
            "frequency": "Yearly",
            "serviceProvider": { "name": "CoolFix", "email": "" }
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(
        response.json::<Value>()["serviceProvider"],
        json!({ "name": "CoolFix" })
    );

    app.server
        .post(&format!("/api/appliances/{id}/tasks"))
        .add_header("Authorization", app.bearer())
        .json(&json!({
            "taskName": "Clean coils",
            "scheduledDate": "2025-03-01",
            "frequency": "Yearly",
            "serviceProvider": { "name": "CoolFix", "email": "coolfix" }
        }))
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_one_time_frequency_label() {
    let (app, id) = app_with_fridge().await;

    let task = app
        .server
        .post(&format!("/api/appliances/{id}/tasks"))
        .add_header("Authorization", app.bearer())
        .json(&json!({
            "taskName": "Install water filter",
            "scheduledDate": "2025-02-01",
            "frequency": "One-time"
        }))
        .await
        .json::<Value>();

    assert_eq!(task["frequency"], "One-time");
}

#[tokio::test]
async fn test_task_rejects_unknown_frequency() {
    let (app, id) = app_with_fridge().await;

    app.server
        .post(&format!("/api/appliances/{id}/tasks"))
        .add_header("Authorization", app.bearer())
        .json(&json!({
            "taskName": "Defrost",
            "scheduledDate": "2025-02-01",
            "frequency": "Weekly"
        }))
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_update_task_validation() {
    let (app, id) = app_with_fridge().await;

    let task = app
        .server
        .post(&format!("/api/appliances/{id}/tasks"))
        .add_header("Authorization", app.bearer())
        .json(&json!({
            "taskName": "Defrost",
            "scheduledDate": "2025-02-01",
            "frequency": "Monthly"
        }))
        .await
        .json::<Value>();
    let task_id = task["id"].as_str().unwrap();

    app.server
        .put(&format!("/api/appliances/{id}/tasks/{task_id}"))
        .add_header("Authorization", app.bearer())
        .json(&json!({}))
        .await
        .assert_status_bad_request();

    app.server
        .put(&format!("/api/appliances/{id}/tasks/{task_id}"))
        .add_header("Authorization", app.bearer())
        .json(&json!({ "serviceProvider": { "name": " " } }))
        .await
        .assert_status_bad_request();

    app.server
        .put(&format!("/api/appliances/{id}/tasks/{}", Uuid::new_v4()))
        .add_header("Authorization", app.bearer())
        .json(&json!({ "status": "Overdue" }))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_remove_task() {
    let (app, id) = app_with_fridge().await;

    let task = app
        .server
        .post(&format!("/api/appliances/{id}/tasks"))
        .add_header("Authorization", app.bearer())
        .json(&json!({
            "taskName": "Defrost",
            "scheduledDate": "2025-02-01",
            "frequency": "Monthly"
        }))
        .await
        .json::<Value>();
    let task_id = task["id"].as_str().unwrap();

    app.server
        .delete(&format!("/api/appliances/{id}/tasks/{task_id}"))
        .add_header("Authorization", app.bearer())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    assert_eq!(detail(&app, id).await["maintenanceTasks"], json!([]));
}

// ─── DOCUMENTS ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_link_and_unlink_document() {
    let (app, id) = app_with_fridge().await;

    let response = app
        .server
        .post(&format!("/api/appliances/{id}/documents"))
        .add_header("Authorization", app.bearer())
        .json(&json!({
            "title": "User manual",
            "url": "https://acme.example/manuals/fridge.pdf",
            "documentType": "Manual"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let document = response.json::<Value>();
    assert_eq!(document["documentType"], "Manual");
    let document_id = document["id"].as_str().unwrap().to_string();

    let json = detail(&app, id).await;
    assert_eq!(json["linkedDocuments"][0]["title"], "User manual");

    app.server
        .delete(&format!("/api/appliances/{id}/documents/{document_id}"))
        .add_header("Authorization", app.bearer())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    assert_eq!(detail(&app, id).await["linkedDocuments"], json!([]));
}

#[tokio::test]
async fn test_document_type_defaults_to_other() {
    let (app, id) = app_with_fridge().await;

    let document = app
        .server
        .post(&format!("/api/appliances/{id}/documents"))
        .add_header("Authorization", app.bearer())
        .json(&json!({ "title": "Receipt photo", "url": "https://photos.example/r/1" }))
        .await
        .json::<Value>();

    assert_eq!(document["documentType"], "Other");
}

#[tokio::test]
async fn test_document_rejects_bad_url() {
    let (app, id) = app_with_fridge().await;

    app.server
        .post(&format!("/api/appliances/{id}/documents"))
        .add_header("Authorization", app.bearer())
        .json(&json!({ "title": "Manual", "url": "not a url" }))
        .await
        .assert_status_bad_request();
}

// ─── CASCADE / ISOLATION ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_nested_records_follow_owner() {
    let (app, id) = app_with_fridge().await;
    let other = app.sign_in("neighbour@example.com").await;

    app.server
        .post(&format!("/api/appliances/{id}/documents"))
        .add_header("Authorization", other.clone())
        .json(&json!({ "title": "Manual", "url": "https://acme.example/m.pdf" }))
        .await
        .assert_status_not_found();

    app.server
        .post(&format!("/api/appliances/{id}/tasks"))
        .add_header("Authorization", other)
        .json(&json!({
            "taskName": "Defrost",
            "scheduledDate": "2025-02-01",
            "frequency": "Monthly"
        }))
        .await
        .assert_status_not_found();

    let json = detail(&app, id).await;
    assert_eq!(json["linkedDocuments"], json!([]));
    assert_eq!(json["maintenanceTasks"], json!([]));
}

#[tokio::test]
async fn test_delete_appliance_removes_nested_records() {
    let (app, id) = app_with_fridge().await;

    let contact = app
        .server
        .post(&format!("/api/appliances/{id}/contacts"))
        .add_header("Authorization", app.bearer())
        .json(&json!({ "name": "Acme Support" }))
        .await
        .json::<Value>();
    let contact_id = contact["id"].as_str().unwrap();

    app.server
        .delete(&format!("/api/appliances/{id}"))
        .add_header("Authorization", app.bearer())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    app.server
        .delete(&format!("/api/appliances/{id}/contacts/{contact_id}"))
        .add_header("Authorization", app.bearer())
        .await
        .assert_status_not_found();
}

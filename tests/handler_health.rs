mod common;

#[tokio::test]
async fn test_health_endpoint_success() {
    let app = common::spawn_app().await;

    let response = app.server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["database"]["message"], "in-memory reachable");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let app = common::spawn_app().await;

    let json = app.server.get("/health").await.json::<serde_json::Value>();

    assert!(json.get("status").is_some());
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(json["checks"].get("database").is_some());
}

#[tokio::test]
async fn test_health_needs_no_token() {
    let app = common::spawn_app().await;

    app.server.get("/health").await.assert_status_ok();
    app.server
        .get("/api/appliances")
        .await
        .assert_status_unauthorized();
}

#[tokio::test]
async fn test_trailing_slash_is_normalized() {
    use appliance_buddy::routes::app_router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    let app = common::spawn_app().await;
    let router = app_router(app.state.clone(), None);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/health/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#![allow(dead_code)]

use appliance_buddy::domain::clock::FixedClock;
use appliance_buddy::domain::entities::{NewUser, User};
use appliance_buddy::domain::repositories::{TokenRepository, UserRepository};
use appliance_buddy::routes::build_router;
use appliance_buddy::state::{AppState, Repositories, Storage};
use axum_test::TestServer;
use chrono::NaiveDate;
use serde_json::{Value, json};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

pub const TEST_SECRET: &str = "test-signing-secret";

/// Date every test app treats as "today".
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

/// Running app over the in-memory store with one signed-in user.
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<dyn TokenRepository>,
    pub user: User,
    pub token: String,
    pub token_id: i64,
}

impl TestApp {
    /// `Authorization` header value for the default user.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Registers another user and returns a bearer header value for them.
    pub async fn sign_in(&self, email: &str) -> String {
        let user = self.users.create(NewUser::new(email, None)).await.unwrap();
        let (raw, _) = self
            .state
            .auth_service
            .issue_token(user.id, "test", None)
            .await
            .unwrap();
        format!("Bearer {raw}")
    }

    /// Creates an appliance through the API and returns its id.
    pub async fn create_appliance(&self, body: Value) -> Uuid {
        let response = self
            .server
            .post("/api/appliances")
            .add_header("Authorization", self.bearer())
            .json(&body)
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);

        let json = response.json::<Value>();
        json["id"].as_str().unwrap().parse().unwrap()
    }
}

pub async fn spawn_app() -> TestApp {
    let repositories = Repositories::in_memory();
    let users = repositories.users.clone();
    let tokens = repositories.tokens.clone();
    let state = AppState::new(
        repositories,
        Arc::new(FixedClock(today())),
        TEST_SECRET.to_string(),
        Storage::InMemory,
    );

    let user = users
        .create(NewUser::new("owner@example.com", Some("Owner")))
        .await
        .unwrap();
    let (token, record) = state
        .auth_service
        .issue_token(user.id, "test", None)
        .await
        .unwrap();

    let server = TestServer::new(build_router(state.clone(), None)).unwrap();

    TestApp {
        server,
        state,
        users,
        tokens,
        user,
        token,
        token_id: record.id,
    }
}

pub fn appliance_body(name: &str, purchase_date: &str, months: u32) -> Value {
    json!({
        "name": name,
        "brand": "Acme",
        "model": format!("{name}-1000"),
        "purchaseDate": purchase_date,
        "warrantyDurationMonths": months,
    })
}

/// Four appliances covering every bucket as of [`today`]:
/// two active, one expiring soon, one expired.
pub async fn seed_fleet(app: &TestApp) {
    app.create_appliance(appliance_body("Toaster", "2020-01-01", 12))
        .await;
    app.create_appliance(appliance_body("Dishwasher", "2024-01-20", 12))
        .await;
    app.create_appliance(appliance_body("Oven", "2024-12-01", 12))
        .await;
    app.create_appliance(appliance_body("Fridge", "2024-06-01", 24))
        .await;
}

pub async fn create_test_user(pool: &PgPool, email: &str) -> Uuid {
    sqlx::query_scalar("INSERT INTO users (id, email, name) VALUES ($1, $2, $3) RETURNING id")
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(email.split('@').next().unwrap_or(email))
        .fetch_one(pool)
        .await
        .unwrap()
}

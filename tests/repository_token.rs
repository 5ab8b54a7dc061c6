//! PostgreSQL token repository tests. Run with `cargo test -- --ignored`
//! against a database reachable through `DATABASE_URL`.

mod common;

use appliance_buddy::domain::repositories::TokenRepository;
use appliance_buddy::error::AppError;
use appliance_buddy::infrastructure::persistence::PgTokenRepository;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_create_token(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "token@example.com").await;
    let repo = PgTokenRepository::new(Arc::new(pool));

    let token = repo
        .create_token(user_id, "test-token", "hash123")
        .await
        .unwrap();

    assert_eq!(token.user_id, user_id);
    assert_eq!(token.name, "test-token");
    assert_eq!(token.token_hash, "hash123");
    assert!(token.revoked_at.is_none());
    assert!(token.last_used_at.is_none());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_create_token_duplicate_hash(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "token@example.com").await;
    let repo = PgTokenRepository::new(Arc::new(pool));

    repo.create_token(user_id, "first", "samehash").await.unwrap();
    let result = repo.create_token(user_id, "second", "samehash").await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_find_active(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "token@example.com").await;
    let repo = PgTokenRepository::new(Arc::new(pool));

    repo.create_token(user_id, "valid-token", "validhash")
        .await
        .unwrap();

    let found = repo.find_active("validhash").await.unwrap();
    assert_eq!(found.unwrap().user_id, user_id);

    assert!(repo.find_active("nonexistent").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_find_active_skips_revoked(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "token@example.com").await;
    let repo = PgTokenRepository::new(Arc::new(pool));

    let token = repo
        .create_token(user_id, "revoked-token", "revokedhash")
        .await
        .unwrap();
    repo.revoke_token(token.id).await.unwrap();

    assert!(repo.find_active("revokedhash").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_update_last_used(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "token@example.com").await;
    let repo = PgTokenRepository::new(Arc::new(pool.clone()));

    let token = repo
        .create_token(user_id, "update-token", "updatehash")
        .await
        .unwrap();

    repo.update_last_used("updatehash").await.unwrap();

    let last_used: Option<DateTime<Utc>> =
        sqlx::query_scalar("SELECT last_used_at FROM api_tokens WHERE id = $1")
            .bind(token.id)
            .fetch_one(&pool)
            .await
            .unwrap();

    assert!(last_used.is_some());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_list_and_find(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "token@example.com").await;
    let repo = PgTokenRepository::new(Arc::new(pool));

    let first = repo.create_token(user_id, "token1", "hash1").await.unwrap();
    repo.create_token(user_id, "token2", "hash2").await.unwrap();

    assert_eq!(repo.list_tokens().await.unwrap().len(), 2);
    assert_eq!(
        repo.find_by_id(first.id).await.unwrap().unwrap().name,
        "token1"
    );
    assert_eq!(
        repo.find_by_name("token2").await.unwrap().unwrap().token_hash,
        "hash2"
    );
    assert!(repo.find_by_name("missing").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_revoke_already_revoked(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "token@example.com").await;
    let repo = PgTokenRepository::new(Arc::new(pool));

    let token = repo
        .create_token(user_id, "double-revoke", "doublehash")
        .await
        .unwrap();

    repo.revoke_token(token.id).await.unwrap();
    let first_revoked_at = repo.find_by_id(token.id).await.unwrap().unwrap().revoked_at;

    repo.revoke_token(token.id).await.unwrap();
    let second_revoked_at = repo.find_by_id(token.id).await.unwrap().unwrap().revoked_at;

    assert!(first_revoked_at.is_some());
    assert_eq!(first_revoked_at, second_revoked_at);
}

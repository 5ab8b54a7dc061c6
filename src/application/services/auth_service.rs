//! Authentication service for per-user API tokens.

use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::entities::User;
use crate::domain::repositories::{ApiToken, TokenRepository, UserRepository};
use crate::error::AppError;
use serde_json::json;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

const TOKEN_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const TOKEN_LEN: usize = 48;

/// The caller behind a validated Bearer token.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser {
    pub user: User,
    pub token_id: i64,
}

impl AuthUser {
    pub fn id(&self) -> Uuid {
        self.user.id
    }
}

/// Service for authenticating API requests via Bearer tokens.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before storage
/// and comparison. An attacker with read-only access to the database cannot verify
/// or forge tokens without the server-side secret.
pub struct AuthService<T: TokenRepository + ?Sized, U: UserRepository + ?Sized> {
    tokens: Arc<T>,
    users: Arc<U>,
    signing_secret: String,
}

impl<T: TokenRepository + ?Sized, U: UserRepository + ?Sized> AuthService<T, U> {
    /// Creates a new authentication service.
    ///
    /// `signing_secret` must match the value used when tokens were issued.
    pub fn new(tokens: Arc<T>, users: Arc<U>, signing_secret: String) -> Self {
        Self {
            tokens,
            users,
            signing_secret,
        }
    }

    /// Hashes a raw token with HMAC-SHA256 using the server signing secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    pub fn hash_token(&self, token: &str) -> String {
        hash_token_with(&self.signing_secret, token)
    }

    /// Resolves a raw token to the user it was issued for.
    ///
    /// On success the token's `last_used_at` is refreshed; a failure to do so
    /// is logged and does not reject the request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown, revoked, or
    /// its user no longer exists. Returns [`AppError::Internal`] on storage errors.
    pub async fn authenticate(&self, token: &str) -> Result<AuthUser, AppError> {
        let token_hash = self.hash_token(token);

        let Some(api_token) = self.tokens.find_active(&token_hash).await? else {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Invalid or revoked token"}),
            ));
        };

        let Some(user) = self.users.find_by_id(api_token.user_id).await? else {
            tracing::warn!(token_id = api_token.id, "Token refers to a missing user");
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Unknown user"}),
            ));
        };

        if let Err(e) = self.tokens.update_last_used(&token_hash).await {
            tracing::warn!(error = %e, token_id = api_token.id, "Failed to update token last_used_at");
        }

        Ok(AuthUser {
            user,
            token_id: api_token.id,
        })
    }

    /// Issues a new token for an existing user.
    ///
    /// Returns the raw token, which is never stored, with its record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist and
    /// [`AppError::Conflict`] if the token value is already registered.
    pub async fn issue_token(
        &self,
        user_id: Uuid,
        name: &str,
        raw_token: Option<String>,
    ) -> Result<(String, ApiToken), AppError> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(AppError::not_found(
                "User not found",
                json!({ "user_id": user_id }),
            ));
        }

        let raw = raw_token.unwrap_or_else(generate_token);
        let record = self
            .tokens
            .create_token(user_id, name, &self.hash_token(&raw))
            .await?;

        tracing::info!(token_id = record.id, user_id = %user_id, "API token issued");
        Ok((raw, record))
    }
}

/// Hashes `token` with an explicit secret, for callers without a service.
pub fn hash_token_with(secret: &str, token: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(token.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Generates a random 48-character alphanumeric token.
pub fn generate_token() -> String {
    let mut rng = rand::rng();

    (0..TOKEN_LEN)
        .map(|_| TOKEN_CHARSET[rng.random_range(0..TOKEN_CHARSET.len())] as char)
        .collect()
}

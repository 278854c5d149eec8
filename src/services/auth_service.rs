//! Authentication service - registration, login and token verification.
//!
//! Password hashing lives in the domain Password value object; token
//! signing and verification are delegated to jsonwebtoken. Each successful
//! login revokes the user's previously issued tokens so that at most one
//! valid token record remains.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::Stores;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user and return a bearer token for it
    async fn register(
        &self,
        username: String,
        password: String,
        full_name: Option<String>,
        address: Option<String>,
    ) -> AppResult<TokenResponse>;

    /// Login, rotate the persisted token record and return a new token
    async fn login(&self, username: String, password: String) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Generate JWT token for a user (shared helper to avoid duplication)
fn generate_token(user: &User, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

/// Verify JWT token and extract claims (shared helper)
fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Concrete implementation of AuthService.
pub struct Authenticator<S: Stores> {
    stores: Arc<S>,
    config: Config,
}

impl<S: Stores> Authenticator<S> {
    /// Create new auth service instance
    pub fn new(stores: Arc<S>, config: Config) -> Self {
        Self { stores, config }
    }
}

#[async_trait]
impl<S: Stores> AuthService for Authenticator<S> {
    async fn register(
        &self,
        username: String,
        password: String,
        full_name: Option<String>,
        address: Option<String>,
    ) -> AppResult<TokenResponse> {
        // Username format is validated by the handler's ValidatedJson extractor
        if self
            .stores
            .users()
            .find_by_username(&username)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("User"));
        }

        let password_hash = Password::new(&password)?.into_string();
        let user = self
            .stores
            .users()
            .create(username, password_hash, full_name, address)
            .await?;

        tracing::info!(user_id = %user.id, "user registered");
        generate_token(&user, &self.config)
    }

    async fn login(&self, username: String, password: String) -> AppResult<TokenResponse> {
        let user = self
            .stores
            .users()
            .find_by_username(&username)
            .await?
            .ok_or(AppError::NotFound)?;

        let stored_password = Password::from_hash(user.password_hash.clone());
        if !stored_password.verify(&password) {
            return Err(AppError::InvalidCredentials);
        }

        let response = generate_token(&user, &self.config)?;

        // Rotate the persisted token record: at most one valid token per user
        self.stores.tokens().revoke_all_for_user(user.id).await?;
        self.stores
            .tokens()
            .insert(response.access_token.clone(), user.id)
            .await?;

        tracing::debug!(user_id = %user.id, "login succeeded, prior tokens revoked");
        Ok(response)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }
}

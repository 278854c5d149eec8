//! Authentication flow integration tests.
//!
//! Runs the real Authenticator against SeaORM repositories backed by an
//! in-memory SQLite database, with the production migrations applied.

use std::sync::Arc;

use sea_orm::{ConnectOptions, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use secondhand_market::config::Config;
use secondhand_market::errors::AppError;
use secondhand_market::infra::{Migrator, Persistence, Stores};
use secondhand_market::services::{AuthService, Authenticator};

async fn setup_db() -> DatabaseConnection {
    // A single pooled connection keeps the in-memory database alive
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    options.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = sea_orm::Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None).await.expect("Migrations failed");
    db
}

fn test_config() -> Config {
    Config::with_secret("test-secret-key-for-testing-only-32chars", 24)
}

async fn setup() -> (Arc<Persistence>, Authenticator<Persistence>) {
    let stores = Arc::new(Persistence::new(setup_db().await));
    let auth = Authenticator::new(stores.clone(), test_config());
    (stores, auth)
}

#[tokio::test]
async fn register_returns_verifiable_token() {
    let (_, auth) = setup().await;

    let response = auth
        .register("alice".to_string(), "password1".to_string(), None, None)
        .await
        .unwrap();

    assert_eq!(response.token_type, "Bearer");
    let claims = auth.verify_token(&response.access_token).unwrap();
    assert_eq!(claims.username, "alice");
}

#[tokio::test]
async fn register_duplicate_username_is_conflict() {
    let (stores, auth) = setup().await;

    auth.register("alice".to_string(), "password1".to_string(), None, None)
        .await
        .unwrap();

    let result = auth
        .register(
            "alice".to_string(),
            "password2".to_string(),
            Some("Other Alice".to_string()),
            None,
        )
        .await;
    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));

    // No second user was persisted
    let user = stores.users().find_by_username("alice").await.unwrap().unwrap();
    assert!(user.full_name.is_none());
}

#[tokio::test]
async fn login_unknown_user_is_not_found() {
    let (_, auth) = setup().await;

    let result = auth
        .login("nobody".to_string(), "password1".to_string())
        .await;
    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn login_wrong_password_is_rejected_and_stores_nothing() {
    let (stores, auth) = setup().await;

    auth.register("alice".to_string(), "password1".to_string(), None, None)
        .await
        .unwrap();
    let user = stores.users().find_by_username("alice").await.unwrap().unwrap();

    let result = auth
        .login("alice".to_string(), "wrong-password".to_string())
        .await;
    assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));

    // No token record was created by the failed login
    let valid = stores.tokens().find_valid_by_user(user.id).await.unwrap();
    assert!(valid.is_empty());
}

#[tokio::test]
async fn login_rotates_persisted_token() {
    let (stores, auth) = setup().await;

    auth.register("alice".to_string(), "password1".to_string(), None, None)
        .await
        .unwrap();
    let user = stores.users().find_by_username("alice").await.unwrap().unwrap();

    let first = auth
        .login("alice".to_string(), "password1".to_string())
        .await
        .unwrap();

    let valid = stores.tokens().find_valid_by_user(user.id).await.unwrap();
    assert_eq!(valid.len(), 1);
    assert_eq!(valid[0].token, first.access_token);

    let second = auth
        .login("alice".to_string(), "password1".to_string())
        .await
        .unwrap();
    assert_ne!(first.access_token, second.access_token);

    // Exactly one valid token remains and it is the new one
    let valid = stores.tokens().find_valid_by_user(user.id).await.unwrap();
    assert_eq!(valid.len(), 1);
    assert_eq!(valid[0].token, second.access_token);
    assert!(valid[0].is_valid());
}

#[tokio::test]
async fn password_hash_is_salted_one_way() {
    let (stores, auth) = setup().await;

    auth.register("alice".to_string(), "password1".to_string(), None, None)
        .await
        .unwrap();
    let user = stores.users().find_by_username("alice").await.unwrap().unwrap();

    // Stored value is a hash, not the plain-text password
    assert_ne!(user.password_hash, "password1");
    assert!(user.password_hash.starts_with("$argon2"));
}

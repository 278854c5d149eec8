//! Garment flow integration tests.
//!
//! Exercises the real GarmentManager and SeaORM repositories against an
//! in-memory SQLite database, including the OR-combined listing filters.

use std::sync::Arc;

use sea_orm::{ConnectOptions, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

use secondhand_market::config::Config;
use secondhand_market::domain::{GarmentFilter, GarmentRequest, Principal};
use secondhand_market::errors::AppError;
use secondhand_market::infra::{Migrator, Persistence, Stores};
use secondhand_market::services::{AuthService, Authenticator, GarmentManager, GarmentService};

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

async fn setup() -> (Arc<Persistence>, GarmentManager<Persistence>) {
    let stores = Arc::new(Persistence::new(setup_db().await));
    let service = GarmentManager::new(stores.clone());
    (stores, service)
}

/// Register a user through the real auth service and return their principal.
async fn register_user(stores: &Arc<Persistence>, username: &str) -> Principal {
    let config = Config::with_secret("test-secret-key-for-testing-only-32chars", 24);
    let auth = Authenticator::new(stores.clone(), config);
    auth.register(username.to_string(), "password1".to_string(), None, None)
        .await
        .expect("Registration failed");

    let user = stores
        .users()
        .find_by_username(username)
        .await
        .unwrap()
        .unwrap();
    Principal {
        id: user.id,
        username: user.username,
    }
}

fn request(
    publisher_id: Uuid,
    kind: &str,
    size: &str,
    price: f64,
) -> GarmentRequest {
    GarmentRequest {
        kind: Some(kind.to_string()),
        description: Some("Barely worn".to_string()),
        size: Some(size.to_string()),
        publisher_id,
        price,
    }
}

#[tokio::test]
async fn publish_then_get_round_trip() {
    let (stores, service) = setup().await;
    let alice = register_user(&stores, "alice").await;

    let published = service
        .publish_garment(request(alice.id, "Shirt", "M", 20.0), &alice)
        .await
        .unwrap();

    let fetched = service.get_garment(published.id).await.unwrap();
    assert_eq!(fetched, published);
    assert_eq!(fetched.kind.as_deref(), Some("Shirt"));
    assert_eq!(fetched.size.as_deref(), Some("M"));
    assert_eq!(fetched.price, 20.0);
    assert_eq!(fetched.owner_id, alice.id);
}

#[tokio::test]
async fn list_without_filters_returns_everything() {
    let (stores, service) = setup().await;
    let alice = register_user(&stores, "alice").await;

    service
        .publish_garment(request(alice.id, "Shirt", "M", 20.0), &alice)
        .await
        .unwrap();
    service
        .publish_garment(request(alice.id, "Jeans", "38", 35.0), &alice)
        .await
        .unwrap();

    let all = service.list_garments(GarmentFilter::default()).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn type_filter_matches_substring_case_insensitively() {
    let (stores, service) = setup().await;
    let alice = register_user(&stores, "alice").await;

    service
        .publish_garment(request(alice.id, "T-Shirt", "M", 15.0), &alice)
        .await
        .unwrap();
    service
        .publish_garment(request(alice.id, "Jeans", "38", 35.0), &alice)
        .await
        .unwrap();

    let filter = GarmentFilter {
        kind: Some("shirt".to_string()),
        ..Default::default()
    };
    let matched = service.list_garments(filter).await.unwrap();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].kind.as_deref(), Some("T-Shirt"));
}

#[tokio::test]
async fn filters_combine_with_logical_or() {
    let (stores, service) = setup().await;
    let alice = register_user(&stores, "alice").await;

    // Matches the type filter only
    service
        .publish_garment(request(alice.id, "Shirt", "M", 80.0), &alice)
        .await
        .unwrap();
    // Matches the price range only
    service
        .publish_garment(request(alice.id, "Jeans", "38", 30.0), &alice)
        .await
        .unwrap();
    // Matches neither
    service
        .publish_garment(request(alice.id, "Coat", "L", 120.0), &alice)
        .await
        .unwrap();

    let filter = GarmentFilter {
        kind: Some("shirt".to_string()),
        min_price: Some(25.0),
        max_price: Some(40.0),
        ..Default::default()
    };
    let matched = service.list_garments(filter).await.unwrap();
    assert_eq!(matched.len(), 2);
    assert!(matched.iter().all(|g| g.kind.as_deref() != Some("Coat")));
}

#[tokio::test]
async fn price_bounds_are_inclusive() {
    let (stores, service) = setup().await;
    let alice = register_user(&stores, "alice").await;

    service
        .publish_garment(request(alice.id, "Shirt", "M", 20.0), &alice)
        .await
        .unwrap();
    service
        .publish_garment(request(alice.id, "Jeans", "38", 40.0), &alice)
        .await
        .unwrap();
    service
        .publish_garment(request(alice.id, "Coat", "L", 41.0), &alice)
        .await
        .unwrap();

    let filter = GarmentFilter {
        min_price: Some(20.0),
        max_price: Some(40.0),
        ..Default::default()
    };
    let matched = service.list_garments(filter).await.unwrap();
    assert_eq!(matched.len(), 2);
}

#[tokio::test]
async fn single_filter_variants_match_independently() {
    let (stores, service) = setup().await;
    let alice = register_user(&stores, "alice").await;

    service
        .publish_garment(request(alice.id, "Shirt", "M", 20.0), &alice)
        .await
        .unwrap();
    service
        .publish_garment(request(alice.id, "Jeans", "XL", 35.0), &alice)
        .await
        .unwrap();

    // Size substring match
    let by_size = service
        .list_garments(GarmentFilter {
            size: Some("xl".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_size.len(), 1);
    assert_eq!(by_size[0].size.as_deref(), Some("XL"));

    // Open-ended lower price bound
    let by_price = service
        .list_garments(GarmentFilter {
            min_price: Some(30.0),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_price.len(), 1);
    assert_eq!(by_price[0].kind.as_deref(), Some("Jeans"));
}

#[tokio::test]
async fn update_replaces_fields_and_preserves_owner() {
    let (stores, service) = setup().await;
    let alice = register_user(&stores, "alice").await;

    let published = service
        .publish_garment(request(alice.id, "Shirt", "M", 20.0), &alice)
        .await
        .unwrap();

    let updated = service
        .update_garment(
            published.id,
            GarmentRequest {
                kind: Some("Blouse".to_string()),
                description: None,
                size: Some("S".to_string()),
                publisher_id: alice.id,
                price: 18.5,
            },
            &alice,
        )
        .await
        .unwrap();

    assert_eq!(updated.id, published.id);
    assert_eq!(updated.kind.as_deref(), Some("Blouse"));
    // Omitted fields are cleared, not kept
    assert!(updated.description.is_none());
    assert_eq!(updated.size.as_deref(), Some("S"));
    assert_eq!(updated.price, 18.5);
    assert_eq!(updated.owner_id, alice.id);
}

#[tokio::test]
async fn update_of_another_users_garment_is_forbidden() {
    let (stores, service) = setup().await;
    let alice = register_user(&stores, "alice").await;
    let bob = register_user(&stores, "bob").await;

    let published = service
        .publish_garment(request(alice.id, "Shirt", "M", 20.0), &alice)
        .await
        .unwrap();

    let result = service
        .update_garment(published.id, request(bob.id, "Shirt", "M", 1.0), &bob)
        .await;
    assert!(matches!(result.unwrap_err(), AppError::Forbidden));

    // Record is untouched
    let fetched = service.get_garment(published.id).await.unwrap();
    assert_eq!(fetched.price, 20.0);
}

#[tokio::test]
async fn delete_of_another_users_garment_is_forbidden() {
    let (stores, service) = setup().await;
    let alice = register_user(&stores, "alice").await;
    let bob = register_user(&stores, "bob").await;

    let published = service
        .publish_garment(request(alice.id, "Shirt", "M", 20.0), &alice)
        .await
        .unwrap();

    let result = service.delete_garment(published.id, &bob).await;
    assert!(matches!(result.unwrap_err(), AppError::Forbidden));

    // Record survives
    assert!(service.get_garment(published.id).await.is_ok());
}

#[tokio::test]
async fn delete_by_owner_removes_the_record() {
    let (stores, service) = setup().await;
    let alice = register_user(&stores, "alice").await;

    let published = service
        .publish_garment(request(alice.id, "Shirt", "M", 20.0), &alice)
        .await
        .unwrap();

    service.delete_garment(published.id, &alice).await.unwrap();

    let result = service.get_garment(published.id).await;
    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn delete_missing_garment_is_not_found() {
    let (stores, service) = setup().await;
    let alice = register_user(&stores, "alice").await;

    let result = service.delete_garment(Uuid::new_v4(), &alice).await;
    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

//! Garment service - listing, retrieval and owner-scoped mutation.
//!
//! Reads are public. Mutations resolve the request's publisher against the
//! caller's principal and check the persisted owner of the target record;
//! the owner field in a request body is only trusted for initial
//! attribution at creation.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Garment, GarmentFilter, GarmentRequest, Principal, User};
use crate::errors::{AppError, AppResult};
use crate::infra::Stores;

/// Garment service trait for dependency injection.
#[async_trait]
pub trait GarmentService: Send + Sync {
    /// List garments matching any of the supplied filters (all when none)
    async fn list_garments(&self, filter: GarmentFilter) -> AppResult<Vec<Garment>>;

    /// Get a garment by ID
    async fn get_garment(&self, id: Uuid) -> AppResult<Garment>;

    /// Publish a new garment attributed to the caller
    async fn publish_garment(
        &self,
        request: GarmentRequest,
        principal: &Principal,
    ) -> AppResult<Garment>;

    /// Replace the mutable fields of a garment owned by the caller
    async fn update_garment(
        &self,
        id: Uuid,
        request: GarmentRequest,
        principal: &Principal,
    ) -> AppResult<Garment>;

    /// Delete a garment owned by the caller
    async fn delete_garment(&self, id: Uuid, principal: &Principal) -> AppResult<()>;
}

/// Authorization guard: the persisted owner must be the caller.
fn assert_owner(garment: &Garment, principal: &Principal) -> AppResult<()> {
    if garment.owner_id == principal.id {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Concrete implementation of GarmentService.
pub struct GarmentManager<S: Stores> {
    stores: Arc<S>,
}

impl<S: Stores> GarmentManager<S> {
    /// Create new garment service instance
    pub fn new(stores: Arc<S>) -> Self {
        Self { stores }
    }

    /// Resolve the request's publisher and require it to be the caller.
    async fn resolve_publisher(
        &self,
        publisher_id: Uuid,
        principal: &Principal,
    ) -> AppResult<User> {
        let publisher = self
            .stores
            .users()
            .find_by_id(publisher_id)
            .await?
            .ok_or_else(|| AppError::bad_request("invalid publisher id"))?;

        if publisher.id != principal.id {
            return Err(AppError::bad_request(
                "garments can only be published under your own account",
            ));
        }

        Ok(publisher)
    }
}

#[async_trait]
impl<S: Stores> GarmentService for GarmentManager<S> {
    async fn list_garments(&self, filter: GarmentFilter) -> AppResult<Vec<Garment>> {
        self.stores.garments().list(&filter).await
    }

    async fn get_garment(&self, id: Uuid) -> AppResult<Garment> {
        self.stores
            .garments()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn publish_garment(
        &self,
        request: GarmentRequest,
        principal: &Principal,
    ) -> AppResult<Garment> {
        let publisher = self
            .resolve_publisher(request.publisher_id, principal)
            .await?;

        let garment = self
            .stores
            .garments()
            .create(
                request.kind,
                request.description,
                request.size,
                request.price,
                publisher.id,
            )
            .await?;

        tracing::info!(garment_id = %garment.id, owner_id = %garment.owner_id, "garment published");
        Ok(garment)
    }

    async fn update_garment(
        &self,
        id: Uuid,
        request: GarmentRequest,
        principal: &Principal,
    ) -> AppResult<Garment> {
        self.resolve_publisher(request.publisher_id, principal)
            .await?;

        let existing = self
            .stores
            .garments()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;
        assert_owner(&existing, principal)?;

        self.stores
            .garments()
            .update(
                id,
                request.kind,
                request.description,
                request.size,
                request.price,
            )
            .await
    }

    async fn delete_garment(&self, id: Uuid, principal: &Principal) -> AppResult<()> {
        let existing = self
            .stores
            .garments()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;
        assert_owner(&existing, principal)?;

        self.stores.garments().delete(id).await?;
        tracing::info!(garment_id = %id, "garment deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mockall::predicate::eq;

    use crate::infra::{
        GarmentRepository, MockGarmentRepository, MockTokenRepository, MockUserRepository,
        TokenRepository, UserRepository,
    };

    struct TestStores {
        users: Arc<MockUserRepository>,
        garments: Arc<MockGarmentRepository>,
        tokens: Arc<MockTokenRepository>,
    }

    impl TestStores {
        fn new(users: MockUserRepository, garments: MockGarmentRepository) -> Self {
            Self {
                users: Arc::new(users),
                garments: Arc::new(garments),
                tokens: Arc::new(MockTokenRepository::new()),
            }
        }
    }

    impl Stores for TestStores {
        fn users(&self) -> Arc<dyn UserRepository> {
            self.users.clone()
        }

        fn garments(&self) -> Arc<dyn GarmentRepository> {
            self.garments.clone()
        }

        fn tokens(&self) -> Arc<dyn TokenRepository> {
            self.tokens.clone()
        }
    }

    fn test_user(id: Uuid) -> User {
        User::new(id, "alice".to_string(), "hashed".to_string(), None, None)
    }

    fn test_garment(id: Uuid, owner_id: Uuid) -> Garment {
        let now = Utc::now();
        Garment {
            id,
            kind: Some("Shirt".to_string()),
            description: None,
            size: Some("M".to_string()),
            price: 20.0,
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }

    fn test_request(publisher_id: Uuid) -> GarmentRequest {
        GarmentRequest {
            kind: Some("Shirt".to_string()),
            description: Some("Barely worn".to_string()),
            size: Some("M".to_string()),
            publisher_id,
            price: 20.0,
        }
    }

    fn principal(id: Uuid) -> Principal {
        Principal {
            id,
            username: "alice".to_string(),
        }
    }

    #[tokio::test]
    async fn publish_for_unknown_publisher_is_rejected() {
        let publisher_id = Uuid::new_v4();

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .with(eq(publisher_id))
            .returning(|_| Ok(None));

        let mut garments = MockGarmentRepository::new();
        garments.expect_create().never();

        let service = GarmentManager::new(Arc::new(TestStores::new(users, garments)));
        let result = service
            .publish_garment(test_request(publisher_id), &principal(publisher_id))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn publish_for_another_user_is_rejected() {
        let publisher_id = Uuid::new_v4();
        let caller_id = Uuid::new_v4();

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .with(eq(publisher_id))
            .returning(move |id| Ok(Some(test_user(id))));

        let mut garments = MockGarmentRepository::new();
        garments.expect_create().never();

        let service = GarmentManager::new(Arc::new(TestStores::new(users, garments)));
        let result = service
            .publish_garment(test_request(publisher_id), &principal(caller_id))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn update_by_non_owner_is_forbidden() {
        let owner_id = Uuid::new_v4();
        let caller_id = Uuid::new_v4();
        let garment_id = Uuid::new_v4();

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .with(eq(caller_id))
            .returning(move |id| Ok(Some(test_user(id))));

        let mut garments = MockGarmentRepository::new();
        garments
            .expect_find_by_id()
            .with(eq(garment_id))
            .returning(move |id| Ok(Some(test_garment(id, owner_id))));
        garments.expect_update().never();

        let service = GarmentManager::new(Arc::new(TestStores::new(users, garments)));
        let result = service
            .update_garment(garment_id, test_request(caller_id), &principal(caller_id))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Forbidden));
    }

    #[tokio::test]
    async fn update_missing_garment_is_not_found() {
        let caller_id = Uuid::new_v4();
        let garment_id = Uuid::new_v4();

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(move |id| Ok(Some(test_user(id))));

        let mut garments = MockGarmentRepository::new();
        garments.expect_find_by_id().returning(|_| Ok(None));
        garments.expect_update().never();

        let service = GarmentManager::new(Arc::new(TestStores::new(users, garments)));
        let result = service
            .update_garment(garment_id, test_request(caller_id), &principal(caller_id))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound));
    }

    #[tokio::test]
    async fn delete_by_non_owner_is_forbidden() {
        let owner_id = Uuid::new_v4();
        let caller_id = Uuid::new_v4();
        let garment_id = Uuid::new_v4();

        let users = MockUserRepository::new();
        let mut garments = MockGarmentRepository::new();
        garments
            .expect_find_by_id()
            .with(eq(garment_id))
            .returning(move |id| Ok(Some(test_garment(id, owner_id))));
        garments.expect_delete().never();

        let service = GarmentManager::new(Arc::new(TestStores::new(users, garments)));
        let result = service.delete_garment(garment_id, &principal(caller_id)).await;

        assert!(matches!(result.unwrap_err(), AppError::Forbidden));
    }

    #[tokio::test]
    async fn delete_by_owner_succeeds() {
        let owner_id = Uuid::new_v4();
        let garment_id = Uuid::new_v4();

        let users = MockUserRepository::new();
        let mut garments = MockGarmentRepository::new();
        garments
            .expect_find_by_id()
            .with(eq(garment_id))
            .returning(move |id| Ok(Some(test_garment(id, owner_id))));
        garments
            .expect_delete()
            .with(eq(garment_id))
            .returning(|_| Ok(()));

        let service = GarmentManager::new(Arc::new(TestStores::new(users, garments)));
        assert!(service
            .delete_garment(garment_id, &principal(owner_id))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn get_missing_garment_is_not_found() {
        let mut garments = MockGarmentRepository::new();
        garments.expect_find_by_id().returning(|_| Ok(None));

        let service =
            GarmentManager::new(Arc::new(TestStores::new(MockUserRepository::new(), garments)));
        let result = service.get_garment(Uuid::new_v4()).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound));
    }
}

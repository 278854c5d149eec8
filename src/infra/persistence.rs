//! Store access bundle.
//!
//! Centralizes repository construction so that services depend on a single
//! abstraction instead of individual store types. Each request is handled
//! as one independent unit of work; the database provides per-row atomicity
//! and no cross-repository transactions are coordinated here.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::repositories::{
    GarmentRepository, GarmentStore, TokenRepository, TokenStore, UserRepository, UserStore,
};

/// Store access trait for dependency injection.
pub trait Stores: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get garment repository
    fn garments(&self) -> Arc<dyn GarmentRepository>;

    /// Get token repository
    fn tokens(&self) -> Arc<dyn TokenRepository>;
}

/// Concrete implementation of Stores backed by SeaORM repositories
pub struct Persistence {
    user_repo: Arc<UserStore>,
    garment_repo: Arc<GarmentStore>,
    token_repo: Arc<TokenStore>,
}

impl Persistence {
    /// Create new store bundle sharing one connection pool
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            garment_repo: Arc::new(GarmentStore::new(db.clone())),
            token_repo: Arc::new(TokenStore::new(db)),
        }
    }
}

impl Stores for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn garments(&self) -> Arc<dyn GarmentRepository> {
        self.garment_repo.clone()
    }

    fn tokens(&self) -> Arc<dyn TokenRepository> {
        self.token_repo.clone()
    }
}

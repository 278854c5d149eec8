//! Service Container - Centralized service construction and access.
//!
//! Services are built once at startup with explicit references to their
//! store collaborators; there is no ambient registry.

use std::sync::Arc;

use super::{AuthService, GarmentService};
use crate::config::Config;
use crate::infra::Persistence;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get garment service
    fn garments(&self) -> Arc<dyn GarmentService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    garment_service: Arc<dyn GarmentService>,
}

impl Services {
    /// Create a new service container with all services initialized
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        garment_service: Arc<dyn GarmentService>,
    ) -> Self {
        Self {
            auth_service,
            garment_service,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        use super::{Authenticator, GarmentManager};

        let stores = Arc::new(Persistence::new(db));
        let auth_service = Arc::new(Authenticator::new(stores.clone(), config));
        let garment_service = Arc::new(GarmentManager::new(stores));

        Self {
            auth_service,
            garment_service,
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn garments(&self) -> Arc<dyn GarmentService> {
        self.garment_service.clone()
    }
}

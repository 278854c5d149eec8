//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::infra::Database;
use crate::services::{AuthService, GarmentService, ServiceContainer, Services};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Garment service
    pub garment_service: Arc<dyn GarmentService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: crate::config::Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);

        Self {
            auth_service: container.auth(),
            garment_service: container.garments(),
            database,
        }
    }

    /// Create new application state with manually injected services (tests).
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        garment_service: Arc<dyn GarmentService>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            auth_service,
            garment_service,
            database,
        }
    }
}

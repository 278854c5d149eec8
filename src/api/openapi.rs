//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, garment_handler};
use crate::domain::{Garment, GarmentRequest};
use crate::services::TokenResponse;
use crate::types::MessageResponse;

/// OpenAPI documentation for the Second-hand Market API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Second-hand Market API",
        version = "0.1.0",
        description = "Marketplace backend for listing and trading second-hand clothing",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        // Garment endpoints
        garment_handler::list_garments,
        garment_handler::get_garment,
        garment_handler::publish_garment,
        garment_handler::update_garment,
        garment_handler::delete_garment,
    ),
    components(
        schemas(
            // Domain types
            Garment,
            GarmentRequest,
            // Auth types
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            TokenResponse,
            // Shared types
            MessageResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "User registration and login"),
        (name = "Garments", description = "Clothing listings and owner-scoped mutations")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}

//! Garment handlers.
//!
//! Reads are public; writes require a bearer token and are split into a
//! separate router so the auth middleware can be layered onto them only.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Extension, Router,
};
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{Garment, GarmentFilter, GarmentRequest, Principal};
use crate::errors::AppResult;
use crate::types::MessageResponse;

/// Create public garment routes (no authentication)
pub fn garment_read_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_garments))
        .route("/:id", get(get_garment))
}

/// Create protected garment routes (bearer token required)
pub fn garment_write_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(publish_garment))
        .route("/:id", put(update_garment).delete(delete_garment))
}

/// List garments with optional filters
#[utoipa::path(
    get,
    path = "/clothes",
    tag = "Garments",
    params(GarmentFilter),
    responses(
        (status = 200, description = "Garments matching any active filter", body = [Garment])
    )
)]
pub async fn list_garments(
    State(state): State<AppState>,
    Query(filter): Query<GarmentFilter>,
) -> AppResult<Json<Vec<Garment>>> {
    let garments = state.garment_service.list_garments(filter).await?;
    Ok(Json(garments))
}

/// Get garment details by ID
#[utoipa::path(
    get,
    path = "/clothes/{id}",
    tag = "Garments",
    params(("id" = Uuid, Path, description = "Garment ID")),
    responses(
        (status = 200, description = "Garment details", body = Garment),
        (status = 404, description = "Garment not found")
    )
)]
pub async fn get_garment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Garment>> {
    let garment = state.garment_service.get_garment(id).await?;
    Ok(Json(garment))
}

/// Publish a new garment
#[utoipa::path(
    post,
    path = "/clothes",
    tag = "Garments",
    request_body = GarmentRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Garment published", body = Garment),
        (status = 400, description = "Invalid publisher reference"),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
pub async fn publish_garment(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ValidatedJson(payload): ValidatedJson<GarmentRequest>,
) -> AppResult<(StatusCode, Json<Garment>)> {
    let garment = state
        .garment_service
        .publish_garment(payload, &principal)
        .await?;

    Ok((StatusCode::CREATED, Json(garment)))
}

/// Update an existing garment
#[utoipa::path(
    put,
    path = "/clothes/{id}",
    tag = "Garments",
    params(("id" = Uuid, Path, description = "Garment ID")),
    request_body = GarmentRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Garment updated", body = MessageResponse),
        (status = 403, description = "Garment is owned by another user"),
        (status = 404, description = "Garment not found")
    )
)]
pub async fn update_garment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(principal): Extension<Principal>,
    ValidatedJson(payload): ValidatedJson<GarmentRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .garment_service
        .update_garment(id, payload, &principal)
        .await?;

    Ok(Json(MessageResponse::new("Garment updated")))
}

/// Delete an existing garment
#[utoipa::path(
    delete,
    path = "/clothes/{id}",
    tag = "Garments",
    params(("id" = Uuid, Path, description = "Garment ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Garment deleted", body = MessageResponse),
        (status = 403, description = "Garment is owned by another user"),
        (status = 404, description = "Garment not found")
    )
)]
pub async fn delete_garment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(principal): Extension<Principal>,
) -> AppResult<Json<MessageResponse>> {
    state.garment_service.delete_garment(id, &principal).await?;

    Ok(Json(MessageResponse::new("Garment deleted")))
}

//! Garment domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// A single clothing listing.
///
/// `kind` is the free-text category ("type" on the wire); `owner_id`
/// references the publishing user and never changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Garment {
    pub id: Uuid,
    /// Free-text category, e.g. "Shirt"
    #[serde(rename = "type")]
    #[schema(example = "Shirt")]
    pub kind: Option<String>,
    pub description: Option<String>,
    /// Free-text size, e.g. "M" or "38"
    pub size: Option<String>,
    /// Listing price, non-negative
    #[schema(example = 20.0)]
    pub price: f64,
    /// Owning user; only the owner may update or delete the listing
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Transient input for publishing or updating a garment.
///
/// `publisher_id` is used only for initial attribution; authorization
/// decisions compare the persisted owner against the caller's principal.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GarmentRequest {
    /// Free-text category
    #[serde(rename = "type")]
    #[schema(example = "Shirt")]
    pub kind: Option<String>,
    pub description: Option<String>,
    pub size: Option<String>,
    /// User the garment is attributed to (must match the caller)
    pub publisher_id: Uuid,
    /// Listing price, must be non-negative
    #[validate(range(min = 0.0, message = "Price must be non-negative"))]
    #[schema(example = 20.0)]
    pub price: f64,
}

/// Optional listing filters.
///
/// Active filters combine with logical OR: a garment matching any one of
/// them is included. With no filters, all garments are returned.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct GarmentFilter {
    /// Case-insensitive substring match on the garment type
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Case-insensitive substring match on the garment size
    pub size: Option<String>,
    /// Inclusive lower price bound
    pub min_price: Option<f64>,
    /// Inclusive upper price bound
    pub max_price: Option<f64>,
}

impl GarmentFilter {
    /// True when no filter is active (list everything).
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.size.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
    }
}

//! Garment repository implementation with OR-combined listing filters.

use async_trait::async_trait;
use sea_orm::sea_query::{Condition, Expr, Func};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::entities::garment::{self, ActiveModel, Entity as GarmentEntity};
use crate::domain::{Garment, GarmentFilter};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Garment repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait GarmentRepository: Send + Sync {
    /// Find garment by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Garment>>;

    /// List garments matching any of the active filters (all when none)
    async fn list(&self, filter: &GarmentFilter) -> AppResult<Vec<Garment>>;

    /// Persist a new garment owned by `owner_id`
    async fn create(
        &self,
        kind: Option<String>,
        description: Option<String>,
        size: Option<String>,
        price: f64,
        owner_id: Uuid,
    ) -> AppResult<Garment>;

    /// Replace all mutable fields, preserving id and owner
    async fn update(
        &self,
        id: Uuid,
        kind: Option<String>,
        description: Option<String>,
        size: Option<String>,
        price: f64,
    ) -> AppResult<Garment>;

    /// Remove a garment by ID
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of GarmentRepository
pub struct GarmentStore {
    db: DatabaseConnection,
}

impl GarmentStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Case-insensitive substring predicate: LOWER(column) LIKE %value%
fn contains_ignore_case(column: garment::Column, value: &str) -> sea_orm::sea_query::SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).like(format!("%{}%", value.to_lowercase()))
}

/// Build the OR condition for the active filters.
///
/// Matches the observed semantics: type OR size OR price-range, where the
/// price range degrades to a single bound when only one of min/max is set.
fn filter_condition(filter: &GarmentFilter) -> Condition {
    let mut cond = Condition::any();

    if let Some(kind) = &filter.kind {
        cond = cond.add(contains_ignore_case(garment::Column::Kind, kind));
    }
    if let Some(size) = &filter.size {
        cond = cond.add(contains_ignore_case(garment::Column::Size, size));
    }
    match (filter.min_price, filter.max_price) {
        (Some(min), Some(max)) => {
            cond = cond.add(garment::Column::Price.between(min, max));
        }
        (Some(min), None) => {
            cond = cond.add(garment::Column::Price.gte(min));
        }
        (None, Some(max)) => {
            cond = cond.add(garment::Column::Price.lte(max));
        }
        (None, None) => {}
    }

    cond
}

#[async_trait]
impl GarmentRepository for GarmentStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Garment>> {
        let result = GarmentEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Garment::from))
    }

    async fn list(&self, filter: &GarmentFilter) -> AppResult<Vec<Garment>> {
        let query = if filter.is_empty() {
            GarmentEntity::find()
        } else {
            GarmentEntity::find().filter(filter_condition(filter))
        };

        let models = query.all(&self.db).await.map_err(AppError::from)?;
        Ok(models.into_iter().map(Garment::from).collect())
    }

    async fn create(
        &self,
        kind: Option<String>,
        description: Option<String>,
        size: Option<String>,
        price: f64,
        owner_id: Uuid,
    ) -> AppResult<Garment> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            kind: Set(kind),
            description: Set(description),
            size: Set(size),
            price: Set(price),
            user_id: Set(owner_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Garment::from(model))
    }

    async fn update(
        &self,
        id: Uuid,
        kind: Option<String>,
        description: Option<String>,
        size: Option<String>,
        price: f64,
    ) -> AppResult<Garment> {
        let existing = GarmentEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.kind = Set(kind);
        active.description = Set(description);
        active.size = Set(size);
        active.price = Set(price);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Garment::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = GarmentEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}

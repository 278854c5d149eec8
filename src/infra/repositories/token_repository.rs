//! Issued-token repository implementation (per-user revocation list).

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::entities::token::{self, ActiveModel, Entity as TokenEntity};
use crate::config::TOKEN_TYPE_BEARER;
use crate::domain::Token;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Token repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// List unexpired, unrevoked tokens for a user
    async fn find_valid_by_user(&self, user_id: Uuid) -> AppResult<Vec<Token>>;

    /// Mark all valid tokens for a user as expired and revoked
    async fn revoke_all_for_user(&self, user_id: Uuid) -> AppResult<()>;

    /// Persist a freshly issued bearer token
    async fn insert(&self, token: String, user_id: Uuid) -> AppResult<Token>;
}

/// Concrete implementation of TokenRepository
pub struct TokenStore {
    db: DatabaseConnection,
}

impl TokenStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TokenRepository for TokenStore {
    async fn find_valid_by_user(&self, user_id: Uuid) -> AppResult<Vec<Token>> {
        let models = TokenEntity::find()
            .filter(token::Column::UserId.eq(user_id))
            .filter(token::Column::Expired.eq(false))
            .filter(token::Column::Revoked.eq(false))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Token::from).collect())
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> AppResult<()> {
        TokenEntity::update_many()
            .col_expr(token::Column::Expired, Expr::value(true))
            .col_expr(token::Column::Revoked, Expr::value(true))
            .filter(token::Column::UserId.eq(user_id))
            .filter(token::Column::Expired.eq(false))
            .filter(token::Column::Revoked.eq(false))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(())
    }

    async fn insert(&self, token: String, user_id: Uuid) -> AppResult<Token> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            token: Set(token),
            user_id: Set(user_id),
            token_type: Set(TOKEN_TYPE_BEARER.to_string()),
            expired: Set(false),
            revoked: Set(false),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Token::from(model))
    }
}

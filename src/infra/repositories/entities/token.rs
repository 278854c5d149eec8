//! Issued-token database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Token;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tokens")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub token: String,
    pub user_id: Uuid,
    pub token_type: String,
    pub expired: bool,
    pub revoked: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Token {
    fn from(model: Model) -> Self {
        Token {
            id: model.id,
            token: model.token,
            user_id: model.user_id,
            token_type: model.token_type,
            expired: model.expired,
            revoked: model.revoked,
            created_at: model.created_at,
        }
    }
}

//! Garment database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Garment;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "garments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Free-text category ("type" column)
    #[sea_orm(column_name = "type")]
    pub kind: Option<String>,
    pub description: Option<String>,
    pub size: Option<String>,
    pub price: f64,
    pub user_id: Uuid,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
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
impl From<Model> for Garment {
    fn from(model: Model) -> Self {
        Garment {
            id: model.id,
            kind: model.kind,
            description: model.description,
            size: model.size,
            price: model.price,
            owner_id: model.user_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

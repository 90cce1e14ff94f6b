use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Append-only record of a trackable user action.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "usage_event")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub user_id: Uuid,
    #[sea_orm(belongs_to, from = "user_id", to = "id", on_delete = "Cascade")]
    pub user: HasOne<super::user::Entity>,

    pub action: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub details: Json,
    pub timestamp: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

use common::MediaKind;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "media")]
pub struct Model {
    /// UUIDv7 primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub user_id: Uuid,
    #[sea_orm(belongs_to, from = "user_id", to = "id", on_delete = "Cascade")]
    pub user: HasOne<super::user::Entity>,

    /// NULL for media not attached to a blog, or whose blog was deleted.
    pub blog_id: Option<Uuid>,
    #[sea_orm(belongs_to, from = "blog_id", to = "id", on_delete = "SetNull")]
    pub blog: HasOne<super::blog::Entity>,

    #[sea_orm(column_name = "type")]
    pub kind: MediaKind,
    /// Public delivery URL on the image host.
    pub url: String,
    pub filename: String,
    pub size: i64,
    pub mime_type: String,
    /// Host-specific details (public id, dimensions, format, tags).
    #[sea_orm(column_type = "JsonBinary")]
    pub metadata: Json,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

use common::{BlogLength, BlogStatus, BlogStyle, BlogTone};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "blog")]
pub struct Model {
    /// UUIDv7 primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub user_id: Uuid,
    #[sea_orm(belongs_to, from = "user_id", to = "id", on_delete = "Cascade")]
    pub user: HasOne<super::user::Entity>,

    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub topic: String,
    pub tone: BlogTone,
    pub style: BlogStyle,
    pub length: BlogLength,
    /// Generated body in Markdown.
    #[sea_orm(column_type = "Text")]
    pub content: String,
    /// Section headings, stored as a JSON array of strings.
    #[sea_orm(column_type = "JsonBinary")]
    pub outline: Json,
    pub status: BlogStatus,
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: Json,
    pub featured: bool,
    pub published_at: Option<DateTimeUtc>,

    pub hero_image_url: Option<String>,
    pub hero_image_prompt: Option<String>,
    pub hero_image_caption: Option<String>,
    pub hero_image_alt: Option<String>,

    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub seo_score: Option<Json>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,

    #[sea_orm(has_many)]
    pub media: HasMany<super::media::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

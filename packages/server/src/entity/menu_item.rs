use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "menu_item")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    pub category: String,
    pub image_url: Option<String>,
    /// Content tags (allergens, "vegan", ...) as a JSON array of strings.
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub contents: Option<serde_json::Value>,
    #[sea_orm(default_value = true)]
    pub available: bool,

    pub menu_id: Uuid,
    #[sea_orm(belongs_to, from = "menu_id", to = "id")]
    pub menu: HasOne<super::menu::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "menu")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Subject of the owning customer's identity token.
    pub customer_id: String,
    pub display_name: String,

    /// Ordered category names, stored as a JSON array of strings.
    #[sea_orm(column_type = "JsonBinary")]
    pub categories: serde_json::Value,

    #[sea_orm(has_many)]
    pub items: HasMany<super::menu_item::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{menu, menu_item};
use crate::error::AppError;

use super::shared::{
    double_option, validate_categories, validate_display_name, validate_non_blank,
    validate_price,
};

/// A customer's menu with all of its items.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub id: Uuid,
    /// Identity subject of the owning customer.
    pub customer_id: String,
    #[schema(example = "Dinner")]
    pub display_name: String,
    /// Category names in display order.
    #[schema(example = json!(["Starters", "Mains"]))]
    pub categories: Vec<String>,
    /// Items in creation order.
    pub items: Vec<MenuItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: Uuid,
    #[schema(example = "Margherita")]
    pub name: String,
    pub description: String,
    /// Exact decimal amount, serialized as a string.
    #[schema(value_type = String, example = "12.50")]
    pub price: Decimal,
    #[schema(example = "Mains")]
    pub category: String,
    pub image_url: Option<String>,
    #[schema(example = json!(["vegetarian", "gluten"]))]
    pub contents: Option<Vec<String>>,
    pub available: bool,
    pub menu_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /menus`.
///
/// Ownership and timestamps are never taken from the body.
#[derive(Clone, Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuDraft {
    #[schema(example = "Dinner")]
    pub display_name: String,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// Body of `PUT /menus/{id}`; absent fields are left untouched.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuPatch {
    pub display_name: Option<String>,
    pub categories: Option<Vec<String>>,
}

/// Body of `POST /menus/{id}/items`.
#[derive(Clone, Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Accepts a JSON string (`"12.50"`) or number.
    #[schema(value_type = String, example = "12.50")]
    pub price: Decimal,
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub contents: Option<Vec<String>>,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

/// Body of `PUT /menus/{menuId}/items/{itemId}`; absent fields are left
/// untouched, `null` clears `imageUrl` or `contents`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>, example = "13.00")]
    pub price: Option<Decimal>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Vec<String>>)]
    pub contents: Option<Option<Vec<String>>>,
    pub available: Option<bool>,
}

/// Body of `POST /menus/{id}/categories`.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct AddCategoryRequest {
    #[schema(example = "Desserts")]
    pub name: String,
}

/// Body of `PUT /menus/{id}/category-order`.
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryOrderRequest {
    /// Preferred order. Names not used by any item are dropped; used names
    /// missing here are appended.
    #[schema(example = json!(["Mains", "Starters"]))]
    pub category_order: Vec<String>,
}

impl Menu {
    /// Assemble a menu from its row and its item rows.
    pub fn from_models(menu: menu::Model, items: Vec<menu_item::Model>) -> Self {
        Self {
            id: menu.id,
            customer_id: menu.customer_id,
            display_name: menu.display_name,
            categories: json_strings(&menu.categories),
            items: items.into_iter().map(MenuItem::from).collect(),
            created_at: menu.created_at,
            updated_at: menu.updated_at,
        }
    }

    pub fn has_item(&self, item_id: Uuid) -> bool {
        self.items.iter().any(|item| item.id == item_id)
    }
}

impl From<menu_item::Model> for MenuItem {
    fn from(m: menu_item::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            price: m.price,
            category: m.category,
            image_url: m.image_url,
            contents: m.contents.as_ref().map(json_strings),
            available: m.available,
            menu_id: m.menu_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Read a JSON array of strings, skipping anything that is not a string.
fn json_strings(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .map(|values| {
            values
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

pub fn validate_menu_draft(draft: &MenuDraft) -> Result<(), AppError> {
    validate_display_name(&draft.display_name)?;
    validate_categories(&draft.categories)
}

pub fn validate_menu_patch(patch: &MenuPatch) -> Result<(), AppError> {
    if let Some(ref name) = patch.display_name {
        validate_display_name(name)?;
    }
    if let Some(ref categories) = patch.categories {
        validate_categories(categories)?;
    }
    Ok(())
}

pub fn validate_menu_item_draft(draft: &MenuItemDraft) -> Result<(), AppError> {
    validate_non_blank(&draft.name, "Name")?;
    validate_non_blank(&draft.category, "Category")?;
    validate_price(draft.price)?;
    if let Some(ref contents) = draft.contents {
        validate_contents(contents)?;
    }
    Ok(())
}

pub fn validate_menu_item_patch(patch: &MenuItemPatch) -> Result<(), AppError> {
    if let Some(ref name) = patch.name {
        validate_non_blank(name, "Name")?;
    }
    if let Some(ref category) = patch.category {
        validate_non_blank(category, "Category")?;
    }
    if let Some(price) = patch.price {
        validate_price(price)?;
    }
    if let Some(Some(ref contents)) = patch.contents {
        validate_contents(contents)?;
    }
    Ok(())
}

fn validate_contents(contents: &[String]) -> Result<(), AppError> {
    contents
        .iter()
        .try_for_each(|tag| validate_non_blank(tag, "Content tag"))
}

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use super::{MenuRepository, OwnerScope, RepositoryError};
use crate::entity::{menu, menu_item};
use crate::models::menu::{Menu, MenuDraft, MenuItemDraft, MenuItemPatch};

/// Postgres-backed menu storage.
pub struct SeaOrmMenuRepository {
    db: DatabaseConnection,
}

impl SeaOrmMenuRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

async fn items_of<C: ConnectionTrait>(
    db: &C,
    menu_ids: Vec<Uuid>,
) -> Result<Vec<menu_item::Model>, DbErr> {
    menu_item::Entity::find()
        .filter(menu_item::Column::MenuId.is_in(menu_ids))
        .order_by_asc(menu_item::Column::CreatedAt)
        .order_by_asc(menu_item::Column::Id)
        .all(db)
        .await
}

fn string_array(values: Vec<String>) -> serde_json::Value {
    serde_json::Value::from(values)
}

#[async_trait]
impl MenuRepository for SeaOrmMenuRepository {
    async fn list_by_customer(&self, customer_id: &str) -> Result<Vec<Menu>, RepositoryError> {
        let menus = menu::Entity::find()
            .filter(menu::Column::CustomerId.eq(customer_id))
            .order_by_asc(menu::Column::CreatedAt)
            .order_by_asc(menu::Column::Id)
            .all(&self.db)
            .await?;
        if menus.is_empty() {
            return Ok(Vec::new());
        }

        let mut items_by_menu: HashMap<Uuid, Vec<menu_item::Model>> = HashMap::new();
        for item in items_of(&self.db, menus.iter().map(|m| m.id).collect()).await? {
            items_by_menu.entry(item.menu_id).or_default().push(item);
        }

        Ok(menus
            .into_iter()
            .map(|m| {
                let items = items_by_menu.remove(&m.id).unwrap_or_default();
                Menu::from_models(m, items)
            })
            .collect())
    }

    async fn find(
        &self,
        id: Uuid,
        scope: OwnerScope<'_>,
    ) -> Result<Option<Menu>, RepositoryError> {
        let mut select = menu::Entity::find_by_id(id);
        if let OwnerScope::Customer(customer_id) = scope {
            select = select.filter(menu::Column::CustomerId.eq(customer_id));
        }

        let Some(model) = select.one(&self.db).await? else {
            return Ok(None);
        };
        let items = items_of(&self.db, vec![model.id]).await?;
        Ok(Some(Menu::from_models(model, items)))
    }

    async fn insert_menu(
        &self,
        customer_id: &str,
        draft: MenuDraft,
    ) -> Result<Menu, RepositoryError> {
        let now = Utc::now();
        let model = menu::ActiveModel {
            id: Set(Uuid::new_v4()),
            customer_id: Set(customer_id.to_string()),
            display_name: Set(draft.display_name),
            categories: Set(string_array(draft.categories)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(Menu::from_models(model, Vec::new()))
    }

    async fn save_menu(&self, menu: &Menu) -> Result<(), RepositoryError> {
        let result = menu::Entity::update_many()
            .col_expr(
                menu::Column::DisplayName,
                Expr::value(menu.display_name.clone()),
            )
            .col_expr(
                menu::Column::Categories,
                Expr::value(string_array(menu.categories.clone())),
            )
            .col_expr(menu::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(menu::Column::Id.eq(menu.id))
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(DbErr::RecordNotUpdated.into());
        }
        Ok(())
    }

    async fn reassign_category(
        &self,
        menu_id: Uuid,
        from: &str,
        to: &str,
    ) -> Result<u64, RepositoryError> {
        let result = menu_item::Entity::update_many()
            .col_expr(menu_item::Column::Category, Expr::value(to))
            .col_expr(menu_item::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(menu_item::Column::MenuId.eq(menu_id))
            .filter(menu_item::Column::Category.eq(from))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }

    async fn delete_menu(&self, id: Uuid, customer_id: &str) -> Result<u64, RepositoryError> {
        let txn = self.db.begin().await?;

        let owned = menu::Entity::find_by_id(id)
            .filter(menu::Column::CustomerId.eq(customer_id))
            .one(&txn)
            .await?;
        if owned.is_none() {
            return Ok(0);
        }

        menu_item::Entity::delete_many()
            .filter(menu_item::Column::MenuId.eq(id))
            .exec(&txn)
            .await?;
        let result = menu::Entity::delete_many()
            .filter(menu::Column::Id.eq(id))
            .filter(menu::Column::CustomerId.eq(customer_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(result.rows_affected)
    }

    async fn insert_item(
        &self,
        menu_id: Uuid,
        draft: MenuItemDraft,
    ) -> Result<(), RepositoryError> {
        let now = Utc::now();
        menu_item::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(draft.name),
            description: Set(draft.description),
            price: Set(draft.price),
            category: Set(draft.category),
            image_url: Set(draft.image_url),
            contents: Set(draft.contents.map(string_array)),
            available: Set(draft.available),
            menu_id: Set(menu_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(())
    }

    async fn update_item(
        &self,
        menu_id: Uuid,
        item_id: Uuid,
        patch: MenuItemPatch,
    ) -> Result<(), RepositoryError> {
        let mut active = menu_item::ActiveModel {
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(description) = patch.description {
            active.description = Set(description);
        }
        if let Some(price) = patch.price {
            active.price = Set(price);
        }
        if let Some(category) = patch.category {
            active.category = Set(category);
        }
        if let Some(image_url) = patch.image_url {
            active.image_url = Set(image_url);
        }
        if let Some(contents) = patch.contents {
            active.contents = Set(contents.map(string_array));
        }
        if let Some(available) = patch.available {
            active.available = Set(available);
        }

        menu_item::Entity::update_many()
            .set(active)
            .filter(menu_item::Column::Id.eq(item_id))
            .filter(menu_item::Column::MenuId.eq(menu_id))
            .exec(&self.db)
            .await?;

        Ok(())
    }

    async fn delete_item(&self, menu_id: Uuid, item_id: Uuid) -> Result<(), RepositoryError> {
        menu_item::Entity::delete_many()
            .filter(menu_item::Column::Id.eq(item_id))
            .filter(menu_item::Column::MenuId.eq(menu_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }
}

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use sea_orm::DbErr;
use uuid::Uuid;

use super::{MenuRepository, OwnerScope, RepositoryError};
use crate::models::menu::{Menu, MenuDraft, MenuItem, MenuItemDraft, MenuItemPatch};

/// Process-local menu storage with the same contract as the database one.
#[derive(Default)]
pub struct InMemoryMenuRepository {
    /// menu id -> (insertion sequence, menu)
    menus: DashMap<Uuid, (u64, Menu)>,
    next_seq: AtomicU64,
}

impl InMemoryMenuRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored items across all menus.
    pub fn item_count(&self) -> usize {
        self.menus.iter().map(|entry| entry.value().1.items.len()).sum()
    }
}

fn owned_by(menu: &Menu, scope: OwnerScope<'_>) -> bool {
    match scope {
        OwnerScope::Customer(customer_id) => menu.customer_id == customer_id,
        OwnerScope::Any => true,
    }
}

#[async_trait]
impl MenuRepository for InMemoryMenuRepository {
    async fn list_by_customer(&self, customer_id: &str) -> Result<Vec<Menu>, RepositoryError> {
        let mut menus: Vec<(u64, Menu)> = self
            .menus
            .iter()
            .filter(|entry| entry.value().1.customer_id == customer_id)
            .map(|entry| entry.value().clone())
            .collect();
        menus.sort_by_key(|(seq, _)| *seq);
        Ok(menus.into_iter().map(|(_, menu)| menu).collect())
    }

    async fn find(
        &self,
        id: Uuid,
        scope: OwnerScope<'_>,
    ) -> Result<Option<Menu>, RepositoryError> {
        Ok(self
            .menus
            .get(&id)
            .map(|entry| entry.value().1.clone())
            .filter(|menu| owned_by(menu, scope)))
    }

    async fn insert_menu(
        &self,
        customer_id: &str,
        draft: MenuDraft,
    ) -> Result<Menu, RepositoryError> {
        let now = Utc::now();
        let menu = Menu {
            id: Uuid::new_v4(),
            customer_id: customer_id.to_string(),
            display_name: draft.display_name,
            categories: draft.categories,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.menus.insert(menu.id, (seq, menu.clone()));
        Ok(menu)
    }

    async fn save_menu(&self, menu: &Menu) -> Result<(), RepositoryError> {
        let mut entry = self
            .menus
            .get_mut(&menu.id)
            .ok_or(RepositoryError::Db(DbErr::RecordNotUpdated))?;
        let stored = &mut entry.value_mut().1;

        stored.display_name = menu.display_name.clone();
        stored.categories = menu.categories.clone();
        stored.updated_at = Utc::now();
        Ok(())
    }

    async fn reassign_category(
        &self,
        menu_id: Uuid,
        from: &str,
        to: &str,
    ) -> Result<u64, RepositoryError> {
        let Some(mut entry) = self.menus.get_mut(&menu_id) else {
            return Ok(0);
        };
        let now = Utc::now();
        let mut moved = 0;
        for item in entry.value_mut().1.items.iter_mut() {
            if item.category == from {
                item.category = to.to_string();
                item.updated_at = now;
                moved += 1;
            }
        }
        Ok(moved)
    }

    async fn delete_menu(&self, id: Uuid, customer_id: &str) -> Result<u64, RepositoryError> {
        let removed = self
            .menus
            .remove_if(&id, |_, (_, menu)| menu.customer_id == customer_id);
        Ok(u64::from(removed.is_some()))
    }

    async fn insert_item(
        &self,
        menu_id: Uuid,
        draft: MenuItemDraft,
    ) -> Result<(), RepositoryError> {
        let mut entry = self.menus.get_mut(&menu_id).ok_or_else(|| {
            RepositoryError::Db(DbErr::RecordNotFound(format!("menu {menu_id}")))
        })?;
        let now = Utc::now();
        entry.value_mut().1.items.push(MenuItem {
            id: Uuid::new_v4(),
            name: draft.name,
            description: draft.description,
            price: draft.price,
            category: draft.category,
            image_url: draft.image_url,
            contents: draft.contents,
            available: draft.available,
            menu_id,
            created_at: now,
            updated_at: now,
        });
        Ok(())
    }

    async fn update_item(
        &self,
        menu_id: Uuid,
        item_id: Uuid,
        patch: MenuItemPatch,
    ) -> Result<(), RepositoryError> {
        let Some(mut entry) = self.menus.get_mut(&menu_id) else {
            return Ok(());
        };
        let Some(item) = entry
            .value_mut()
            .1
            .items
            .iter_mut()
            .find(|item| item.id == item_id)
        else {
            return Ok(());
        };

        if let Some(name) = patch.name {
            item.name = name;
        }
        if let Some(description) = patch.description {
            item.description = description;
        }
        if let Some(price) = patch.price {
            item.price = price;
        }
        if let Some(category) = patch.category {
            item.category = category;
        }
        if let Some(image_url) = patch.image_url {
            item.image_url = image_url;
        }
        if let Some(contents) = patch.contents {
            item.contents = contents;
        }
        if let Some(available) = patch.available {
            item.available = available;
        }
        item.updated_at = Utc::now();
        Ok(())
    }

    async fn delete_item(&self, menu_id: Uuid, item_id: Uuid) -> Result<(), RepositoryError> {
        if let Some(mut entry) = self.menus.get_mut(&menu_id) {
            entry.value_mut().1.items.retain(|item| item.id != item_id);
        }
        Ok(())
    }
}

use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::models::menu::{Menu, MenuDraft, MenuItem, MenuItemDraft, MenuItemPatch, MenuPatch};
use crate::models::shared::dedup_preserving_order;
use crate::repository::{MenuRepository, OwnerScope, RepositoryError};

/// Category that items fall back to when their category is deleted.
pub const UNCATEGORIZED: &str = "uncategorized";

#[derive(Debug, Error)]
pub enum MenuError {
    /// No such menu, or it belongs to another customer.
    #[error("Menu with ID {0} not found")]
    MenuNotFound(Uuid),
    #[error("Item with ID {item_id} not found in menu {menu_id}")]
    ItemNotFound { menu_id: Uuid, item_id: Uuid },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Menu, item and category operations, scoped to the owning customer.
///
/// Every read-modify-write here is a plain fetch followed by a save; two
/// concurrent writers to the same menu can overwrite each other.
#[derive(Clone)]
pub struct MenuService {
    repo: Arc<dyn MenuRepository>,
    hide_unavailable_publicly: bool,
}

impl MenuService {
    pub fn new(repo: Arc<dyn MenuRepository>) -> Self {
        Self {
            repo,
            hide_unavailable_publicly: false,
        }
    }

    /// Drop items with `available = false` from public reads.
    pub fn hide_unavailable_publicly(mut self, hide: bool) -> Self {
        self.hide_unavailable_publicly = hide;
        self
    }

    async fn find(&self, menu_id: Uuid, scope: OwnerScope<'_>) -> Result<Menu, MenuError> {
        self.repo
            .find(menu_id, scope)
            .await?
            .ok_or(MenuError::MenuNotFound(menu_id))
    }

    pub async fn list_menus(&self, customer_id: &str) -> Result<Vec<Menu>, MenuError> {
        Ok(self.repo.list_by_customer(customer_id).await?)
    }

    pub async fn get_menu(&self, customer_id: &str, menu_id: Uuid) -> Result<Menu, MenuError> {
        self.find(menu_id, OwnerScope::Customer(customer_id)).await
    }

    /// Read any customer's menu by ID.
    pub async fn get_public_menu(&self, menu_id: Uuid) -> Result<Menu, MenuError> {
        let mut menu = self.find(menu_id, OwnerScope::Any).await?;
        if self.hide_unavailable_publicly {
            menu.items.retain(|item| item.available);
        }
        Ok(menu)
    }

    #[instrument(skip(self, draft))]
    pub async fn create_menu(
        &self,
        customer_id: &str,
        mut draft: MenuDraft,
    ) -> Result<Menu, MenuError> {
        draft.display_name = draft.display_name.trim().to_string();
        draft.categories = dedup_preserving_order(draft.categories);
        let menu = self.repo.insert_menu(customer_id, draft).await?;
        debug!(menu_id = %menu.id, "menu created");
        Ok(menu)
    }

    pub async fn update_menu(
        &self,
        customer_id: &str,
        menu_id: Uuid,
        patch: MenuPatch,
    ) -> Result<Menu, MenuError> {
        let mut menu = self.get_menu(customer_id, menu_id).await?;
        if patch == MenuPatch::default() {
            return Ok(menu);
        }

        if let Some(display_name) = patch.display_name {
            menu.display_name = display_name.trim().to_string();
        }
        if let Some(categories) = patch.categories {
            menu.categories = dedup_preserving_order(categories);
        }
        self.save_and_reload(customer_id, &menu).await
    }

    #[instrument(skip(self))]
    pub async fn delete_menu(&self, customer_id: &str, menu_id: Uuid) -> Result<(), MenuError> {
        match self.repo.delete_menu(menu_id, customer_id).await? {
            0 => Err(MenuError::MenuNotFound(menu_id)),
            _ => Ok(()),
        }
    }

    pub async fn add_menu_item(
        &self,
        customer_id: &str,
        menu_id: Uuid,
        mut draft: MenuItemDraft,
    ) -> Result<Menu, MenuError> {
        self.get_menu(customer_id, menu_id).await?;

        draft.price.rescale(2);
        self.repo.insert_item(menu_id, draft).await?;
        self.get_menu(customer_id, menu_id).await
    }

    pub async fn update_menu_item(
        &self,
        customer_id: &str,
        menu_id: Uuid,
        item_id: Uuid,
        mut patch: MenuItemPatch,
    ) -> Result<Menu, MenuError> {
        let menu = self.get_menu(customer_id, menu_id).await?;
        ensure_item(&menu, item_id)?;

        if let Some(ref mut price) = patch.price {
            price.rescale(2);
        }
        self.repo.update_item(menu_id, item_id, patch).await?;
        self.get_menu(customer_id, menu_id).await
    }

    pub async fn delete_menu_item(
        &self,
        customer_id: &str,
        menu_id: Uuid,
        item_id: Uuid,
    ) -> Result<Menu, MenuError> {
        let menu = self.get_menu(customer_id, menu_id).await?;
        ensure_item(&menu, item_id)?;

        self.repo.delete_item(menu_id, item_id).await?;
        self.get_menu(customer_id, menu_id).await
    }

    /// The stored category list, as is. Item categories are not consulted.
    pub async fn get_categories(
        &self,
        customer_id: &str,
        menu_id: Uuid,
    ) -> Result<Vec<String>, MenuError> {
        Ok(self.get_menu(customer_id, menu_id).await?.categories)
    }

    pub async fn add_category(
        &self,
        customer_id: &str,
        menu_id: Uuid,
        category: &str,
    ) -> Result<Menu, MenuError> {
        let mut menu = self.get_menu(customer_id, menu_id).await?;
        if menu.categories.iter().any(|c| c == category) {
            return Ok(menu);
        }

        menu.categories.push(category.to_string());
        self.save_and_reload(customer_id, &menu).await
    }

    /// Remove `category` from the list and move its items to [`UNCATEGORIZED`].
    #[instrument(skip(self))]
    pub async fn delete_category(
        &self,
        customer_id: &str,
        menu_id: Uuid,
        category: &str,
    ) -> Result<Menu, MenuError> {
        let mut menu = self.get_menu(customer_id, menu_id).await?;

        menu.categories.retain(|c| c != category);
        self.repo.save_menu(&menu).await?;
        let moved = self
            .repo
            .reassign_category(menu_id, category, UNCATEGORIZED)
            .await?;
        debug!(moved, "items reassigned to {UNCATEGORIZED}");

        self.get_menu(customer_id, menu_id).await
    }

    /// Replace the category list with the categories in use, in the caller's
    /// preferred order. See [`reconcile_category_order`].
    pub async fn update_category_order(
        &self,
        customer_id: &str,
        menu_id: Uuid,
        order: &[String],
    ) -> Result<Menu, MenuError> {
        let mut menu = self.get_menu(customer_id, menu_id).await?;
        menu.categories = reconcile_category_order(&menu.items, order);
        self.save_and_reload(customer_id, &menu).await
    }

    async fn save_and_reload(&self, customer_id: &str, menu: &Menu) -> Result<Menu, MenuError> {
        self.repo.save_menu(menu).await?;
        self.get_menu(customer_id, menu.id).await
    }
}

fn ensure_item(menu: &Menu, item_id: Uuid) -> Result<(), MenuError> {
    if menu.has_item(item_id) {
        Ok(())
    } else {
        Err(MenuError::ItemNotFound {
            menu_id: menu.id,
            item_id,
        })
    }
}

/// Compute the category list for `items` given a preferred `order`.
///
/// The result holds exactly the non-empty categories used by `items`: first
/// those named in `order` (in that order, each once), then the remaining ones
/// in the order they first appear among the items. Names in `order` that no
/// item uses are dropped.
pub fn reconcile_category_order(items: &[MenuItem], order: &[String]) -> Vec<String> {
    let mut in_use: Vec<&str> = Vec::new();
    for item in items {
        let category = item.category.as_str();
        if !category.is_empty() && !in_use.contains(&category) {
            in_use.push(category);
        }
    }

    let mut placed: HashSet<&str> = HashSet::new();
    let mut result: Vec<String> = Vec::with_capacity(in_use.len());
    for name in order {
        if in_use.contains(&name.as_str()) && placed.insert(name.as_str()) {
            result.push(name.clone());
        }
    }
    for category in in_use {
        if placed.insert(category) {
            result.push(category.to_string());
        }
    }
    result
}

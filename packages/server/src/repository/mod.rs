//! Persistence for menus and their items.

mod memory;
mod seaorm;

pub use memory::InMemoryMenuRepository;
pub use seaorm::SeaOrmMenuRepository;

use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

use crate::models::menu::{Menu, MenuDraft, MenuItemDraft, MenuItemPatch};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Db(#[from] DbErr),
}

/// Which owner a menu lookup is restricted to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OwnerScope<'a> {
    /// Only menus owned by this customer.
    Customer(&'a str),
    /// Any owner. Used by the public read path only.
    Any,
}

/// Menu storage.
///
/// Every method that returns a [`Menu`] returns it with all of its items
/// loaded, ordered by creation time.
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// All menus owned by `customer_id`, oldest first.
    async fn list_by_customer(&self, customer_id: &str) -> Result<Vec<Menu>, RepositoryError>;

    async fn find(&self, id: Uuid, scope: OwnerScope<'_>)
    -> Result<Option<Menu>, RepositoryError>;

    /// Create a menu with no items.
    async fn insert_menu(&self, customer_id: &str, draft: MenuDraft)
    -> Result<Menu, RepositoryError>;

    /// Persist the menu's display name and category list. Items are not written.
    async fn save_menu(&self, menu: &Menu) -> Result<(), RepositoryError>;

    /// Move every item of `menu_id` in category `from` to `to`.
    ///
    /// Returns the number of items moved.
    async fn reassign_category(
        &self,
        menu_id: Uuid,
        from: &str,
        to: &str,
    ) -> Result<u64, RepositoryError>;

    /// Delete a menu and all of its items if it is owned by `customer_id`.
    ///
    /// Returns the number of menus deleted (0 or 1).
    async fn delete_menu(&self, id: Uuid, customer_id: &str) -> Result<u64, RepositoryError>;

    async fn insert_item(&self, menu_id: Uuid, draft: MenuItemDraft)
    -> Result<(), RepositoryError>;

    /// Apply the fields present in `patch`. A no-op if the item is not in `menu_id`.
    async fn update_item(
        &self,
        menu_id: Uuid,
        item_id: Uuid,
        patch: MenuItemPatch,
    ) -> Result<(), RepositoryError>;

    async fn delete_item(&self, menu_id: Uuid, item_id: Uuid) -> Result<(), RepositoryError>;
}

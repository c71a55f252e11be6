use std::sync::Arc;
use std::time::Duration;

use common::storage::ObjectStore;

use crate::config::AppConfig;
use crate::repository::MenuRepository;
use crate::service::{ImageService, MenuService};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub menus: MenuService,
    pub images: ImageService,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        repo: Arc<dyn MenuRepository>,
        store: Arc<dyn ObjectStore>,
    ) -> Self {
        let menus = MenuService::new(repo)
            .hide_unavailable_publicly(config.menus.public_hide_unavailable);
        let upload_expiry = Duration::from_secs(u64::from(config.storage.presign_expiry_secs));
        Self {
            config: Arc::new(config),
            menus,
            images: ImageService::new(store, upload_expiry),
        }
    }
}

//! Business rules sitting between the HTTP handlers and storage.

pub mod image;
pub mod menu;

pub use image::{ImageError, ImageService};
pub use menu::{MenuError, MenuService};

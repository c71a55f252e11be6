pub mod image;
pub mod menu;
pub mod public;

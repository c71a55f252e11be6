pub mod image;
pub mod menu;
pub mod shared;

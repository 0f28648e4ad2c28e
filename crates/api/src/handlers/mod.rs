pub mod admin_categories;
pub mod admin_images;
pub mod admin_inventory;
pub mod admin_products;
pub mod admin_profiles;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod me;

//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod cart_repo;
pub mod category_repo;
pub mod inventory_repo;
pub mod product_image_repo;
pub mod product_repo;
pub mod profile_repo;

pub use cart_repo::CartRepo;
pub use category_repo::CategoryRepo;
pub use inventory_repo::InventoryRepo;
pub use product_image_repo::ProductImageRepo;
pub use product_repo::ProductRepo;
pub use profile_repo::ProfileRepo;

//! Domain logic shared by the database, hosted-service, and API crates.
//!
//! Nothing in this crate performs I/O.

pub mod error;
pub mod pricing;
pub mod roles;
pub mod search;
pub mod stock;
pub mod types;
pub mod validation;

//! Clients for the hosted identity and object-storage services.
//!
//! Both services sit behind one project URL and are authenticated with API
//! keys. The API server depends only on the [`ObjectStorage`] and
//! [`IdentityProvider`] traits so tests can swap in fakes.

pub mod config;
pub mod error;
pub mod identity;
pub mod storage;

pub use config::HostedConfig;
pub use error::CloudError;
pub use identity::{AuthSession, HostedIdentity, IdentityProvider};
pub use storage::{HostedStorage, ObjectStorage, SignedUpload};

//! Repository traits for the data access layer
//!
//! Services only see these traits. A storage backend implements [`UserRepository`] for its
//! user store and exposes it through [`RepositoryProvider`], which also carries the
//! lifecycle operations (migrations and health checks).

pub mod adapter;
pub mod user;

pub use adapter::UserRepositoryAdapter;
pub use user::UserRepository;

use async_trait::async_trait;

use crate::Error;

/// Provider trait for user repository access.
pub trait UserRepositoryProvider: Send + Sync + 'static {
    type UserRepo: UserRepository;

    fn user(&self) -> &Self::UserRepo;
}

/// A complete storage backend.
#[async_trait]
pub trait RepositoryProvider: UserRepositoryProvider {
    /// Bring the schema up to date
    async fn migrate(&self) -> Result<(), Error>;

    /// Check that the backing store is reachable
    async fn health_check(&self) -> Result<(), Error>;
}

//! Repository implementations for SQLite storage

pub mod user;

pub use user::SqliteUserRepository;

use async_trait::async_trait;
use portier_core::{
    Error,
    error::{StorageError, utilities::DatabaseResultExt},
    repositories::{RepositoryProvider, UserRepositoryProvider},
};
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use std::sync::Arc;

use crate::migrations::{self, SqliteMigrationManager};

/// Repository provider implementation for SQLite
pub struct SqliteRepositoryProvider {
    pool: SqlitePool,
    user: Arc<SqliteUserRepository>,
}

impl SqliteRepositoryProvider {
    pub fn new(pool: SqlitePool) -> Self {
        let user = Arc::new(SqliteUserRepository::new(pool.clone()));
        Self { pool, user }
    }

    /// Open a pool for `database_url`, e.g. `sqlite://portier.db?mode=rwc` or `sqlite::memory:`.
    pub async fn connect(database_url: &str) -> Result<Self, Error> {
        let mut options = SqlitePoolOptions::new();
        // Each connection to an unnamed in-memory database would see its own empty schema.
        if database_url.contains(":memory:") {
            options = options.max_connections(1);
        }

        let pool = options.connect(database_url).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to connect to database");
            Error::Storage(StorageError::Connection(e.to_string()))
        })?;

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl UserRepositoryProvider for SqliteRepositoryProvider {
    type UserRepo = SqliteUserRepository;

    fn user(&self) -> &Self::UserRepo {
        &self.user
    }
}

#[async_trait]
impl RepositoryProvider for SqliteRepositoryProvider {
    async fn migrate(&self) -> Result<(), Error> {
        use portier_migration::MigrationManager;

        let manager = SqliteMigrationManager::new(self.pool.clone());
        manager.initialize().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to initialize migrations");
            Error::Storage(StorageError::Migration(
                "Failed to initialize migrations".to_string(),
            ))
        })?;

        manager.up(&migrations::all()).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to run migrations");
            Error::Storage(StorageError::Migration(
                "Failed to run migrations".to_string(),
            ))
        })?;

        Ok(())
    }

    async fn health_check(&self) -> Result<(), Error> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_db_err()?;
        Ok(())
    }
}

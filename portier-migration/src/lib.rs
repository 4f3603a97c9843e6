//! Versioned schema migrations
//!
//! A storage backend lists its [`Migration`]s and drives them through a
//! [`MigrationManager`], which records every applied version in a bookkeeping table so
//! that running the same list twice is a no-op.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use portier_core::error::StorageError;
use sqlx::Database;
use thiserror::Error;

pub const MIGRATION_TABLE_NAME: &str = "_portier_migrations";

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Migration failed: {0}")]
    Migration(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<MigrationError> for portier_core::Error {
    fn from(err: MigrationError) -> Self {
        portier_core::Error::Storage(StorageError::Migration(err.to_string()))
    }
}

pub type Result<T> = std::result::Result<T, MigrationError>;

#[async_trait]
pub trait Migration<DB: Database>: Send + Sync {
    /// Apply the schema change
    async fn up<'a>(&'a self, conn: &'a mut <DB as Database>::Connection) -> Result<()>;

    /// Revert the schema change
    async fn down<'a>(&'a self, conn: &'a mut <DB as Database>::Connection) -> Result<()>;

    /// Unique version number, migrations run in ascending order
    fn version(&self) -> i64;

    fn name(&self) -> &str;
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MigrationRecord {
    pub version: i64,
    pub name: String,
    /// Unix seconds
    pub applied_at: i64,
}

impl MigrationRecord {
    pub fn applied_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.applied_at, 0)
    }
}

#[async_trait]
pub trait MigrationManager<DB: Database>: Send + Sync {
    fn get_migration_table_name(&self) -> &str {
        MIGRATION_TABLE_NAME
    }

    /// Create the bookkeeping table if it does not exist
    async fn initialize(&self) -> Result<()>;

    /// Apply every migration not yet recorded, in version order
    async fn up(&self, migrations: &[Box<dyn Migration<DB>>]) -> Result<()>;

    /// Revert every recorded migration, newest first
    async fn down(&self, migrations: &[Box<dyn Migration<DB>>]) -> Result<()>;

    async fn get_applied_migrations(&self) -> Result<Vec<MigrationRecord>>;

    async fn is_applied(&self, version: i64) -> Result<bool>;
}

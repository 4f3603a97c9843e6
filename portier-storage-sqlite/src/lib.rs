//! SQLite storage backend for portier
//!
//! Users live in a single `users` table. Timestamps are stored as unix seconds, except the
//! verification expiry which keeps microseconds so the grace boundary is exact. The pending
//! verification code and its expiry are two nullable columns that are always set or cleared
//! together.
//!
//! ```rust,no_run
//! use portier_core::RepositoryProvider;
//! use portier_storage_sqlite::SqliteRepositoryProvider;
//!
//! # async fn run() -> Result<(), portier_core::Error> {
//! let provider = SqliteRepositoryProvider::connect("sqlite://portier.db?mode=rwc").await?;
//! provider.migrate().await?;
//! # Ok(())
//! # }
//! ```

pub mod migrations;
pub mod repositories;

pub use repositories::{SqliteRepositoryProvider, SqliteUserRepository};

use chrono::DateTime;
use portier_core::{Error, PendingVerification, User, UserId, error::StorageError};

#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct SqliteUser {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    phone_number: Option<String>,
    civility: String,
    newsletter: bool,
    password_hash: String,
    is_verified: bool,
    email_verification_code: Option<String>,
    email_verification_expires_at: Option<i64>,
    access_token: Option<String>,
    created_at: i64,
    updated_at: i64,
}

fn timestamp(seconds: i64) -> Result<DateTime<chrono::Utc>, Error> {
    DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| StorageError::Database(format!("Invalid timestamp: {seconds}")).into())
}

impl TryFrom<SqliteUser> for User {
    type Error = Error;

    fn try_from(row: SqliteUser) -> Result<Self, Self::Error> {
        let pending_verification = match (
            row.email_verification_code,
            row.email_verification_expires_at,
        ) {
            (Some(code), Some(expires_at)) => Some(PendingVerification {
                code,
                expires_at: DateTime::from_timestamp_micros(expires_at).ok_or_else(|| {
                    StorageError::Database(format!("Invalid expiry: {expires_at}"))
                })?,
            }),
            _ => None,
        };

        Ok(User {
            id: UserId::new(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone_number: row.phone_number,
            civility: row.civility,
            newsletter: row.newsletter,
            password_hash: row.password_hash,
            is_verified: row.is_verified,
            pending_verification,
            access_token: row.access_token,
            created_at: timestamp(row.created_at)?,
            updated_at: timestamp(row.updated_at)?,
        })
    }
}

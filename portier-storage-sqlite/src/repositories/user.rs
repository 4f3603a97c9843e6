use crate::SqliteUser;
use async_trait::async_trait;
use chrono::Utc;
use portier_core::{
    Error, NewUser, ProfileUpdate, User, UserId,
    error::{ConflictError, NotFoundError, StorageError, utilities::DatabaseResultExt},
    repositories::UserRepository,
};
use sqlx::SqlitePool;

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// The `UNIQUE(email)` constraint surfaces as a conflict, everything else as a storage error.
fn map_write_err(err: sqlx::Error) -> Error {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => ConflictError::EmailTaken.into(),
        _ => Error::Storage(StorageError::Database(err.to_string())),
    }
}

fn ensure_updated(rows_affected: u64) -> Result<(), Error> {
    if rows_affected == 0 {
        return Err(NotFoundError::User.into());
    }
    Ok(())
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, Error> {
        let now = Utc::now().timestamp();

        let sqlite_user = sqlx::query_as::<_, SqliteUser>(
            r#"
            INSERT INTO users (
                first_name, last_name, email, phone_number, civility, newsletter,
                password_hash, is_verified, email_verification_code,
                email_verification_expires_at, created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, ?8, ?9, ?10, ?10)
            RETURNING *
            "#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.phone_number)
        .bind(&user.civility)
        .bind(user.newsletter)
        .bind(&user.password_hash)
        .bind(&user.pending_verification.code)
        .bind(user.pending_verification.expires_at.timestamp_micros())
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_err)?;

        sqlite_user.try_into()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, Error> {
        let sqlite_user = sqlx::query_as::<_, SqliteUser>("SELECT * FROM users WHERE id = ?1")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_db_err()?;

        sqlite_user.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        let sqlite_user = sqlx::query_as::<_, SqliteUser>("SELECT * FROM users WHERE email = ?1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_db_err()?;

        sqlite_user.map(User::try_from).transpose()
    }

    async fn mark_email_verified(&self, id: &UserId) -> Result<(), Error> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET is_verified = 1,
                email_verification_code = NULL,
                email_verification_expires_at = NULL,
                updated_at = ?1
            WHERE id = ?2
            "#,
        )
        .bind(Utc::now().timestamp())
        .bind(id.as_i64())
        .execute(&self.pool)
        .await
        .map_db_err()?;

        ensure_updated(result.rows_affected())
    }

    async fn set_access_token(&self, id: &UserId, token: &str) -> Result<(), Error> {
        let result =
            sqlx::query("UPDATE users SET access_token = ?1, updated_at = ?2 WHERE id = ?3")
                .bind(token)
                .bind(Utc::now().timestamp())
                .bind(id.as_i64())
                .execute(&self.pool)
                .await
                .map_db_err_with_context("Failed to store access token")?;

        ensure_updated(result.rows_affected())
    }

    async fn update_profile(&self, id: &UserId, update: &ProfileUpdate) -> Result<User, Error> {
        let sqlite_user = sqlx::query_as::<_, SqliteUser>(
            r#"
            UPDATE users
            SET first_name = ?2, last_name = ?3, email = ?4, phone_number = ?5, updated_at = ?6
            WHERE id = ?1
            RETURNING *
            "#,
        )
        .bind(id.as_i64())
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.email)
        .bind(&update.phone_number)
        .bind(Utc::now().timestamp())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_err)?;

        sqlite_user.ok_or(NotFoundError::User)?.try_into()
    }
}

use async_trait::async_trait;
use chrono::Utc;
use portier_migration::{Migration, MigrationError, MigrationManager, MigrationRecord};
use sqlx::{Database, Sqlite, SqlitePool};

pub struct SqliteMigrationManager {
    pool: SqlitePool,
}

impl SqliteMigrationManager {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MigrationManager<Sqlite> for SqliteMigrationManager {
    async fn initialize(&self) -> Result<(), MigrationError> {
        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                version INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                applied_at INTEGER NOT NULL DEFAULT (unixepoch())
            );"#,
            self.get_migration_table_name()
        ))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn up(&self, migrations: &[Box<dyn Migration<Sqlite>>]) -> Result<(), MigrationError> {
        let mut ordered: Vec<&dyn Migration<Sqlite>> =
            migrations.iter().map(|m| m.as_ref()).collect();
        ordered.sort_by_key(|m| m.version());

        for migration in ordered {
            if self.is_applied(migration.version()).await? {
                continue;
            }

            let mut tx = self.pool.begin().await?;

            tracing::info!(
                version = migration.version(),
                name = migration.name(),
                "Applying migration"
            );

            migration
                .up(&mut *tx as &mut <Sqlite as Database>::Connection)
                .await?;

            sqlx::query(&format!(
                "INSERT INTO {} (version, name, applied_at) VALUES (?, ?, ?)",
                self.get_migration_table_name()
            ))
            .bind(migration.version())
            .bind(migration.name())
            .bind(Utc::now().timestamp())
            .execute(&mut *tx)
            .await?;

            tx.commit().await?;
        }
        Ok(())
    }

    async fn down(&self, migrations: &[Box<dyn Migration<Sqlite>>]) -> Result<(), MigrationError> {
        let mut ordered: Vec<&dyn Migration<Sqlite>> =
            migrations.iter().map(|m| m.as_ref()).collect();
        ordered.sort_by_key(|m| std::cmp::Reverse(m.version()));

        for migration in ordered {
            if !self.is_applied(migration.version()).await? {
                continue;
            }

            let mut tx = self.pool.begin().await?;

            tracing::info!(
                version = migration.version(),
                name = migration.name(),
                "Rolling back migration"
            );

            migration
                .down(&mut *tx as &mut <Sqlite as Database>::Connection)
                .await?;

            sqlx::query(&format!(
                "DELETE FROM {} WHERE version = ?",
                self.get_migration_table_name()
            ))
            .bind(migration.version())
            .execute(&mut *tx)
            .await?;

            tx.commit().await?;
        }
        Ok(())
    }

    async fn get_applied_migrations(&self) -> Result<Vec<MigrationRecord>, MigrationError> {
        let records = sqlx::query_as::<_, MigrationRecord>(&format!(
            "SELECT version, name, applied_at FROM {} ORDER BY version",
            self.get_migration_table_name()
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    async fn is_applied(&self, version: i64) -> Result<bool, MigrationError> {
        let result: bool = sqlx::query_scalar(&format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE version = ?)",
            self.get_migration_table_name()
        ))
        .bind(version)
        .fetch_one(&self.pool)
        .await?;
        Ok(result)
    }
}

pub struct CreateUsersTable;

#[async_trait]
impl Migration<Sqlite> for CreateUsersTable {
    fn version(&self) -> i64 {
        1
    }

    fn name(&self) -> &str {
        "CreateUsersTable"
    }

    async fn up<'a>(
        &'a self,
        conn: &'a mut <Sqlite as Database>::Connection,
    ) -> Result<(), MigrationError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                email TEXT NOT NULL,
                phone_number TEXT,
                civility TEXT NOT NULL,
                newsletter INTEGER NOT NULL DEFAULT 0,
                password_hash TEXT NOT NULL,
                is_verified INTEGER NOT NULL DEFAULT 0,
                email_verification_code TEXT,
                email_verification_expires_at INTEGER, -- unix microseconds
                access_token TEXT,
                created_at INTEGER NOT NULL DEFAULT (unixepoch()),
                updated_at INTEGER NOT NULL DEFAULT (unixepoch()),
                UNIQUE(email)
            );"#,
        )
        .execute(conn)
        .await?;
        Ok(())
    }

    async fn down<'a>(
        &'a self,
        conn: &'a mut <Sqlite as Database>::Connection,
    ) -> Result<(), MigrationError> {
        sqlx::query("DROP TABLE IF EXISTS users")
            .execute(conn)
            .await?;
        Ok(())
    }
}

/// Every migration of this backend, in version order.
pub fn all() -> Vec<Box<dyn Migration<Sqlite>>> {
    vec![Box::new(CreateUsersTable)]
}

//! Builder for constructing [`Portier`] instances
//!
//! The builder uses a type-state to make sure storage is configured before [`build`] can be
//! called. Token signing must be configured too, since login cannot work without it; that
//! is checked when building.
//!
//! ```rust,no_run
//! use portier::{JwtConfig, PortierBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let portier = PortierBuilder::new()
//!     .with_sqlite("sqlite::memory:")
//!     .await?
//!     .with_jwt(JwtConfig::new_hs256(b"change-me".to_vec()))
//!     .apply_migrations(true)
//!     .build()
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! [`build`]: PortierBuilder::build

use std::sync::Arc;

use portier_core::{
    AccountService, EmailSender, JwtConfig, JwtTokenIssuer, PhoneRegion, RegionPhoneNormalizer,
    RepositoryProvider, UserRepositoryAdapter,
};

#[cfg(feature = "mailer")]
use portier_core::{MailerConfig, MailerEmailSender};

use crate::Portier;

/// Errors that can occur when building a Portier instance.
#[derive(Debug, thiserror::Error)]
pub enum PortierBuilderError {
    #[error("Storage connection failed: {0}")]
    StorageConnection(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Mailer configuration failed: {0}")]
    MailerConfiguration(String),
}

/// Marker type: no storage configured yet.
pub struct NoStorage;

/// Marker type: storage configured.
pub struct WithStorage<R: RepositoryProvider> {
    repositories: Arc<R>,
}

pub struct PortierBuilder<Storage> {
    storage: Storage,
    jwt_config: Option<JwtConfig>,
    phone_region: PhoneRegion,
    email_sender: Option<Arc<dyn EmailSender>>,
    #[cfg(feature = "mailer")]
    mailer_config: Option<MailerConfig>,
    apply_migrations: bool,
}

impl Default for PortierBuilder<NoStorage> {
    fn default() -> Self {
        Self::new()
    }
}

impl PortierBuilder<NoStorage> {
    /// Defaults: French phone numbers, mailer configured from the environment, no
    /// automatic migrations.
    pub fn new() -> Self {
        Self {
            storage: NoStorage,
            jwt_config: None,
            phone_region: PhoneRegion::default(),
            email_sender: None,
            #[cfg(feature = "mailer")]
            mailer_config: None,
            apply_migrations: false,
        }
    }

    /// Use an already constructed repository provider.
    pub fn with_repositories<R: RepositoryProvider>(
        self,
        repositories: Arc<R>,
    ) -> PortierBuilder<WithStorage<R>> {
        PortierBuilder {
            storage: WithStorage { repositories },
            jwt_config: self.jwt_config,
            phone_region: self.phone_region,
            email_sender: self.email_sender,
            #[cfg(feature = "mailer")]
            mailer_config: self.mailer_config,
            apply_migrations: self.apply_migrations,
        }
    }
}

#[cfg(feature = "sqlite")]
impl PortierBuilder<NoStorage> {
    /// Configure SQLite storage by connecting to the given URL, e.g. `sqlite::memory:` or
    /// `sqlite://portier.db?mode=rwc`.
    pub async fn with_sqlite(
        self,
        url: &str,
    ) -> Result<PortierBuilder<WithStorage<crate::SqliteRepositoryProvider>>, PortierBuilderError>
    {
        let repositories = crate::SqliteRepositoryProvider::connect(url)
            .await
            .map_err(|e| PortierBuilderError::StorageConnection(e.to_string()))?;

        Ok(self.with_repositories(Arc::new(repositories)))
    }

    /// Configure SQLite storage with an existing connection pool.
    pub fn with_sqlite_pool(
        self,
        pool: sqlx::SqlitePool,
    ) -> PortierBuilder<WithStorage<crate::SqliteRepositoryProvider>> {
        self.with_repositories(Arc::new(crate::SqliteRepositoryProvider::new(pool)))
    }
}

impl<Storage> PortierBuilder<Storage> {
    /// Configure access token signing.
    pub fn with_jwt(mut self, config: JwtConfig) -> Self {
        self.jwt_config = Some(config);
        self
    }

    /// Region phone numbers are normalized against.
    pub fn with_phone_region(mut self, region: PhoneRegion) -> Self {
        self.phone_region = region;
        self
    }

    /// Deliver verification emails through a custom sender instead of the mailer.
    pub fn with_email_sender(mut self, sender: Arc<dyn EmailSender>) -> Self {
        self.email_sender = Some(sender);
        self
    }

    #[cfg(feature = "mailer")]
    pub fn with_mailer(mut self, config: MailerConfig) -> Self {
        self.mailer_config = Some(config);
        self
    }

    /// Whether [`PortierBuilder::build`] runs the storage migrations.
    pub fn apply_migrations(mut self, apply: bool) -> Self {
        self.apply_migrations = apply;
        self
    }
}

impl<R: RepositoryProvider> PortierBuilder<WithStorage<R>> {
    pub async fn build(self) -> Result<Portier<R>, PortierBuilderError> {
        let jwt_config = self.jwt_config.ok_or_else(|| {
            PortierBuilderError::InvalidConfiguration(
                "a JWT configuration is required".to_string(),
            )
        })?;

        let email_sender = match self.email_sender {
            Some(sender) => sender,
            #[cfg(feature = "mailer")]
            None => {
                let config = match self.mailer_config {
                    Some(config) => config,
                    None => MailerConfig::from_env()
                        .map_err(|e| PortierBuilderError::MailerConfiguration(e.to_string()))?,
                };
                let sender = MailerEmailSender::new(config)
                    .map_err(|e| PortierBuilderError::MailerConfiguration(e.to_string()))?;
                Arc::new(sender) as Arc<dyn EmailSender>
            }
            #[cfg(not(feature = "mailer"))]
            None => {
                return Err(PortierBuilderError::InvalidConfiguration(
                    "an email sender is required".to_string(),
                ));
            }
        };

        let repositories = self.storage.repositories;

        if self.apply_migrations {
            tracing::debug!("Applying storage migrations");
            repositories
                .migrate()
                .await
                .map_err(|e| PortierBuilderError::Migration(e.to_string()))?;
        }

        let token_issuer = Arc::new(JwtTokenIssuer::new(jwt_config));
        let account_service = AccountService::new(
            Arc::new(UserRepositoryAdapter::new(repositories.clone())),
            token_issuer.clone(),
            email_sender,
        )
        .with_phone_normalizer(Arc::new(RegionPhoneNormalizer::new(self.phone_region)));

        tracing::info!(
            phone_region = self.phone_region.iso_code,
            migrations_applied = self.apply_migrations,
            "Portier initialized"
        );

        Ok(Portier::from_parts(
            repositories,
            Arc::new(account_service),
            token_issuer,
        ))
    }
}

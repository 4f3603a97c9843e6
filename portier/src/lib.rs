//! # Portier
//!
//! Portier is a small account service: users register with a profile and a password, confirm
//! their email address with a one-time code, log in to receive a signed access token, and
//! update their profile afterwards.
//!
//! The [`Portier`] type is the entry point. It owns the storage backend and the
//! [`AccountService`] wired to it, and is normally constructed with [`PortierBuilder`].
//!
//! ## Storage Support
//!
//! - SQLite (feature `sqlite`, enabled by default)
//!
//! Other backends can be plugged in by implementing [`RepositoryProvider`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use portier::{JwtConfig, PortierBuilder, Registration};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let portier = PortierBuilder::new()
//!         .with_sqlite("sqlite::memory:")
//!         .await?
//!         .with_jwt(JwtConfig::new_hs256(b"change-me".to_vec()))
//!         .apply_migrations(true)
//!         .build()
//!         .await?;
//!
//!     let user = portier
//!         .register(Registration {
//!             first_name: Some("Jean".to_string()),
//!             last_name: Some("Dupont".to_string()),
//!             email: Some("jean@example.com".to_string()),
//!             password: Some("Secret123".to_string()),
//!             civility: Some("Mr".to_string()),
//!             ..Default::default()
//!         })
//!         .await?;
//!     println!("registered {}", user.id);
//!     Ok(())
//! }
//! ```
use std::sync::Arc;

use portier_core::{
    AccountService, JwtTokenIssuer, RepositoryProvider, TokenIssuer, UserRepository,
    UserRepositoryAdapter,
};

pub mod builder;
pub mod config;

pub use builder::{NoStorage, PortierBuilder, PortierBuilderError, WithStorage};
pub use config::{ConfigError, PortierConfig};

/// Re-export core types from portier_core
pub use portier_core::{
    AccessTokenClaims, EmailSender, Error, JwtAlgorithm, JwtConfig, LoginOutcome, PhoneRegion,
    ProfileChanges, Registration, User, UserId, error,
};

#[cfg(feature = "mailer")]
pub use portier_core::MailerConfig;

#[cfg(feature = "sqlite")]
pub use portier_storage_sqlite::SqliteRepositoryProvider;

/// The account service bound to a storage backend.
pub struct Portier<R: RepositoryProvider> {
    repositories: Arc<R>,
    account_service: Arc<AccountService<UserRepositoryAdapter<R>>>,
    token_issuer: Arc<JwtTokenIssuer>,
}

impl<R: RepositoryProvider> Portier<R> {
    pub(crate) fn from_parts(
        repositories: Arc<R>,
        account_service: Arc<AccountService<UserRepositoryAdapter<R>>>,
        token_issuer: Arc<JwtTokenIssuer>,
    ) -> Self {
        Self {
            repositories,
            account_service,
            token_issuer,
        }
    }

    /// Run migrations for all repositories
    pub async fn migrate(&self) -> Result<(), Error> {
        self.repositories.migrate().await
    }

    /// Health check for all repositories
    pub async fn health_check(&self) -> Result<(), Error> {
        self.repositories.health_check().await
    }

    /// Register a new, unverified account and send its verification code.
    pub async fn register(&self, registration: Registration) -> Result<User, Error> {
        self.account_service.register(registration).await
    }

    /// Confirm ownership of `email` with the code sent at registration.
    pub async fn verify_email(&self, email: &str, code: &str) -> Result<(), Error> {
        self.account_service.verify_email(email, code).await
    }

    /// Check credentials and issue an access token.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, Error> {
        self.account_service.login(email, password).await
    }

    /// Update the profile of the user with the given textual id.
    pub async fn update_profile(&self, id: &str, changes: ProfileChanges) -> Result<User, Error> {
        self.account_service.update_profile(id, changes).await
    }

    /// Check an access token previously issued by [`Portier::login`].
    pub fn verify_access_token(&self, token: &str) -> Result<AccessTokenClaims, Error> {
        self.token_issuer.verify(token)
    }

    /// Get a user by their ID
    pub async fn get_user(&self, user_id: &UserId) -> Result<Option<User>, Error> {
        self.repositories.user().find_by_id(user_id).await
    }

    pub fn account_service(&self) -> &AccountService<UserRepositoryAdapter<R>> {
        &self.account_service
    }
}

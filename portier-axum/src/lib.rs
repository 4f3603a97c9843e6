//! # Portier Axum Integration
//!
//! JSON routes exposing the Portier account operations:
//!
//! | Route | Operation |
//! |---|---|
//! | `POST /register` | create an unverified account and send the verification code |
//! | `POST /verify-email` | confirm the email address with the code |
//! | `POST /login` | check credentials and return an access token |
//! | `PUT /update` | partially update a profile |
//! | `GET /health` | storage health check |
//!
//! Every failure is answered with `{"error": true, "message": "..."}`.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use portier::{JwtConfig, PortierBuilder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let portier = PortierBuilder::new()
//!         .with_sqlite("sqlite://portier.db?mode=rwc")
//!         .await?
//!         .with_jwt(JwtConfig::new_hs256(b"change-me".to_vec()))
//!         .apply_migrations(true)
//!         .build()
//!         .await?;
//!
//!     let app = axum::Router::new().nest("/api", portier_axum::routes(Arc::new(portier)));
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3030").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

mod error;
mod routes;
mod types;

pub use error::{ApiError, Result};
pub use routes::create_router;
pub use types::{
    HealthResponse, LoginRequest, MessageResponse, RegisterRequest, UpdateProfileRequest,
    UserIdParam, VerifyEmailRequest,
};

use axum::Router;
use portier::Portier;
use portier_core::RepositoryProvider;
use std::sync::Arc;

/// Create the account routes, ready to be nested into an application router.
pub fn routes<R>(portier: Arc<Portier<R>>) -> Router
where
    R: RepositoryProvider + 'static,
{
    create_router(portier)
}

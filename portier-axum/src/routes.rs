use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
    routing::{get, post, put},
};
use portier::{Portier, error::utilities::RequiredFieldExt};
use portier_core::RepositoryProvider;

use crate::{
    error::{ApiError, Result},
    types::*,
};

pub fn create_router<R>(portier: Arc<Portier<R>>) -> Router
where
    R: RepositoryProvider + 'static,
{
    Router::new()
        .route("/health", get(health_handler))
        .route("/register", post(register_handler))
        .route("/verify-email", post(verify_email_handler))
        .route("/login", post(login_handler))
        .route("/update", put(update_handler))
        .with_state(portier)
}

/// Unwrap a JSON body, reporting malformed input in the usual error shape.
fn json_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

async fn health_handler<R>(State(portier): State<Arc<Portier<R>>>) -> Result<impl IntoResponse>
where
    R: RepositoryProvider,
{
    portier.health_check().await?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

async fn register_handler<R>(
    State(portier): State<Arc<Portier<R>>>,
    payload: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse>
where
    R: RepositoryProvider,
{
    let request = json_body(payload)?;
    portier.register(request.into()).await?;

    Ok(Json(MessageResponse::success(
        "Your account has been created, check your inbox to confirm your email address",
    )))
}

async fn verify_email_handler<R>(
    State(portier): State<Arc<Portier<R>>>,
    payload: std::result::Result<Json<VerifyEmailRequest>, JsonRejection>,
) -> Result<impl IntoResponse>
where
    R: RepositoryProvider,
{
    let request = json_body(payload)?;

    let email = request
        .email
        .require_field("Email")
        .map_err(|e| ApiError::Verification(e.into()))?;
    let code = request
        .email_verification_token
        .require_field("Verification code")
        .map_err(|e| ApiError::Verification(e.into()))?;

    portier
        .verify_email(&email, &code)
        .await
        .map_err(ApiError::Verification)?;

    Ok(Json(MessageResponse::success("Email verified")))
}

async fn login_handler<R>(
    State(portier): State<Arc<Portier<R>>>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse>
where
    R: RepositoryProvider,
{
    let request = json_body(payload)?;
    let outcome = portier
        .login(
            request.email.as_deref().unwrap_or_default(),
            request.password.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok(Json(MessageResponse {
        error: false,
        message: "You are now logged in".to_string(),
        access_token: Some(outcome.access_token),
    }))
}

async fn update_handler<R>(
    State(portier): State<Arc<Portier<R>>>,
    payload: std::result::Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<impl IntoResponse>
where
    R: RepositoryProvider,
{
    let (id, changes) = json_body(payload)?.into_parts();
    let id = id
        .require_field("Id")
        .map_err(|e| ApiError::Service(e.into()))?;

    portier.update_profile(&id, changes).await?;

    Ok(Json(MessageResponse::success("Profile updated")))
}

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use portier::Error;
use thiserror::Error;

use crate::types::MessageResponse;

pub(crate) const INTERNAL_ERROR_MESSAGE: &str =
    "An internal error occurred, please try again later";
pub(crate) const VERIFICATION_FAILED_MESSAGE: &str = "Email verification failed";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] Error),

    /// Failure of the verify-email route, reported without its cause.
    #[error("Email verification failed: {0}")]
    Verification(Error),

    #[error("Invalid request: {0}")]
    BadRequest(String),
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Verification(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                VERIFICATION_FAILED_MESSAGE.to_string(),
            ),
            ApiError::Service(err) => match err {
                Error::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
                Error::Conflict(e) => (StatusCode::BAD_REQUEST, e.to_string()),
                Error::NotFound(e) => (StatusCode::NOT_FOUND, e.to_string()),
                Error::Auth(e) => (StatusCode::UNAUTHORIZED, e.to_string()),
                Error::Verification(_)
                | Error::Storage(_)
                | Error::Crypto(_)
                | Error::Mail(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                ),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        (status, Json(MessageResponse::failure(message))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use portier::error::{
        AuthError, ConflictError, MailError, NotFoundError, StorageError, ValidationError,
        VerificationError,
    };

    fn status(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status(Error::from(ValidationError::WeakPassword).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(Error::from(ConflictError::EmailTaken).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(Error::from(NotFoundError::User).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(Error::from(AuthError::InvalidCredentials).into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status(Error::from(MailError::Delivery("smtp down".to_string())).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status(ApiError::Verification(VerificationError::CodeExpired.into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err: ApiError = Error::from(StorageError::Database("disk I/O error".to_string())).into();
        let (_, message) = err.status_and_message();
        assert_eq!(message, INTERNAL_ERROR_MESSAGE);

        for cause in [
            VerificationError::CodeMissing,
            VerificationError::CodeExpired,
            VerificationError::CodeMismatch,
        ] {
            let (_, message) = ApiError::Verification(cause.into()).status_and_message();
            assert_eq!(message, VERIFICATION_FAILED_MESSAGE);
        }
    }
}

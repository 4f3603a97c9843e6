pub mod utilities;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Conflict: {0}")]
    Conflict(#[from] ConflictError),

    #[error("Not found: {0}")]
    NotFound(#[from] NotFoundError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Verification error: {0}")]
    Verification(#[from] VerificationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Cryptographic error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Mail error: {0}")]
    Mail(#[from] MailError),
}

/// Malformed or missing caller input.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    #[error(
        "Password must be at least 8 characters long and contain an uppercase letter, a lowercase letter and a digit"
    )]
    WeakPassword,

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Invalid user ID: {0}")]
    InvalidUserId(String),

    #[error("Invalid phone number: {0}")]
    InvalidPhone(String),
}

#[derive(Debug, Error)]
pub enum ConflictError {
    #[error("A user with this email already exists")]
    EmailTaken,
}

#[derive(Debug, Error)]
pub enum NotFoundError {
    #[error("User not found")]
    User,
}

/// Credential failures.
///
/// An unknown email and a wrong password are indistinguishable to the caller.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Identifier and/or password incorrect")]
    InvalidCredentials,
}

/// The pending email verification cannot be completed.
#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("No verification code is pending for this user")]
    CodeMissing,

    #[error("Verification code expired")]
    CodeExpired,

    #[error("Verification code incorrect")]
    CodeMismatch,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Connection error: {0}")]
    Connection(String),
}

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Token signing failed: {0}")]
    TokenSigning(String),

    #[error("Token verification failed: {0}")]
    TokenVerification(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Failed to render email: {0}")]
    Render(String),

    #[error("Failed to deliver email: {0}")]
    Delivery(String),

    #[error("Mailer configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    pub fn is_conflict_error(&self) -> bool {
        matches!(self, Error::Conflict(_))
    }

    pub fn is_not_found_error(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Auth(_))
    }

    pub fn is_verification_error(&self) -> bool {
        matches!(self, Error::Verification(_))
    }

    /// Failures of a collaborator rather than of the caller's input.
    pub fn is_dependency_error(&self) -> bool {
        matches!(self, Error::Storage(_) | Error::Crypto(_) | Error::Mail(_))
    }
}

//! Users and their account state
//!
//! | Field                    | Type                          | Description                                      |
//! | ------------------------ | ----------------------------- | ------------------------------------------------ |
//! | `id`                     | `UserId`                      | Numeric identifier assigned by the store.        |
//! | `first_name`             | `String`                      | Given name.                                      |
//! | `last_name`              | `String`                      | Family name.                                     |
//! | `email`                  | `String`                      | Unique login identifier.                         |
//! | `phone_number`           | `Option<String>`              | Normalized (E.164) phone number.                 |
//! | `civility`               | `String`                      | Title / salutation, e.g. `Mr` or `Ms`.           |
//! | `newsletter`             | `bool`                        | Newsletter opt-in.                               |
//! | `password_hash`          | `String`                      | Salted one-way hash, never serialized.           |
//! | `is_verified`            | `bool`                        | Whether the email address has been confirmed.    |
//! | `pending_verification`   | `Option<PendingVerification>` | Outstanding verification code and its expiry.    |
//! | `access_token`           | `Option<String>`              | The most recently issued access token.           |
//! | `created_at`             | `DateTime`                    | Creation timestamp.                              |
//! | `updated_at`             | `DateTime`                    | Last update timestamp.                           |
use crate::{
    Error,
    error::{ValidationError, utilities::RequiredFieldExt},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Numeric user identifier, assigned by the store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub fn new(id: i64) -> Self {
        UserId(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }

    /// Parse an identifier received from a caller.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ValidationError::MissingField(
                "User ID is required".to_string(),
            ));
        }

        raw.parse::<i64>()
            .map(UserId)
            .map_err(|_| ValidationError::InvalidUserId(format!("{raw} is not an integer")))
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A verification code waiting to be confirmed.
///
/// Code and expiry only ever exist together.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingVerification {
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for PendingVerification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingVerification")
            .field("code", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub civility: String,
    pub newsletter: bool,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub is_verified: bool,
    #[serde(skip_serializing, default)]
    pub pending_verification: Option<PendingVerification>,
    #[serde(skip_serializing, default)]
    pub access_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn verification_code(&self) -> Option<&str> {
        self.pending_verification.as_ref().map(|p| p.code.as_str())
    }

    pub fn verification_expires_at(&self) -> Option<DateTime<Utc>> {
        self.pending_verification.as_ref().map(|p| p.expires_at)
    }
}

// Credentials stay out of logs.
impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("phone_number", &self.phone_number)
            .field("civility", &self.civility)
            .field("newsletter", &self.newsletter)
            .field("is_verified", &self.is_verified)
            .field("pending_verification", &self.pending_verification)
            .field("has_access_token", &self.access_token.is_some())
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// A user about to be inserted. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub civility: String,
    pub newsletter: bool,
    pub password_hash: String,
    pub pending_verification: PendingVerification,
}

impl NewUser {
    pub fn builder() -> NewUserBuilder {
        NewUserBuilder::default()
    }
}

#[derive(Default)]
pub struct NewUserBuilder {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    phone_number: Option<String>,
    civility: Option<String>,
    newsletter: bool,
    password_hash: Option<String>,
    pending_verification: Option<PendingVerification>,
}

impl NewUserBuilder {
    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn phone_number(mut self, phone_number: Option<String>) -> Self {
        self.phone_number = phone_number;
        self
    }

    pub fn civility(mut self, civility: impl Into<String>) -> Self {
        self.civility = Some(civility.into());
        self
    }

    pub fn newsletter(mut self, newsletter: bool) -> Self {
        self.newsletter = newsletter;
        self
    }

    pub fn password_hash(mut self, password_hash: impl Into<String>) -> Self {
        self.password_hash = Some(password_hash.into());
        self
    }

    pub fn pending_verification(mut self, pending: PendingVerification) -> Self {
        self.pending_verification = Some(pending);
        self
    }

    pub fn build(self) -> Result<NewUser, Error> {
        Ok(NewUser {
            first_name: self.first_name.require_field("First name")?,
            last_name: self.last_name.require_field("Last name")?,
            email: self.email.require_field("Email")?,
            phone_number: self.phone_number,
            civility: self.civility.require_field("Civility")?,
            newsletter: self.newsletter,
            password_hash: self.password_hash.require_field("Password hash")?,
            pending_verification: self.pending_verification.ok_or_else(|| {
                ValidationError::MissingField("Verification code is required".to_string())
            })?,
        })
    }
}

/// Raw registration input as received from a caller.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Registration {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone_number: Option<String>,
    pub civility: Option<String>,
    pub newsletter: Option<bool>,
}

/// Fields a profile update may change. Absent or empty fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProfileChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

/// The merged field set written by a profile update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
}

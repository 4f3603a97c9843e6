use crate::{Error, NewUser, ProfileUpdate, User, UserId};
use async_trait::async_trait;

/// Repository for user data access
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Insert a new user. Fails with a conflict error when the email is already taken.
    async fn create(&self, user: NewUser) -> Result<User, Error>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, Error>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, Error>;

    /// Mark the email as verified and discard the pending verification code.
    async fn mark_email_verified(&self, id: &UserId) -> Result<(), Error>;

    /// Persist the most recently issued access token.
    async fn set_access_token(&self, id: &UserId, token: &str) -> Result<(), Error>;

    /// Overwrite the editable profile fields and return the stored user.
    async fn update_profile(&self, id: &UserId, update: &ProfileUpdate) -> Result<User, Error>;
}

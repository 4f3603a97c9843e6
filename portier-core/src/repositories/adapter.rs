use crate::{
    Error, NewUser, ProfileUpdate, User, UserId,
    repositories::{RepositoryProvider, UserRepository},
};
use async_trait::async_trait;
use std::sync::Arc;

/// Exposes the user repository of a shared [`RepositoryProvider`] as a standalone
/// [`UserRepository`], so services can hold it behind their own `Arc`.
pub struct UserRepositoryAdapter<R: RepositoryProvider> {
    provider: Arc<R>,
}

impl<R: RepositoryProvider> UserRepositoryAdapter<R> {
    pub fn new(provider: Arc<R>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<R: RepositoryProvider> UserRepository for UserRepositoryAdapter<R> {
    async fn create(&self, user: NewUser) -> Result<User, Error> {
        self.provider.user().create(user).await
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, Error> {
        self.provider.user().find_by_id(id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        self.provider.user().find_by_email(email).await
    }

    async fn mark_email_verified(&self, id: &UserId) -> Result<(), Error> {
        self.provider.user().mark_email_verified(id).await
    }

    async fn set_access_token(&self, id: &UserId, token: &str) -> Result<(), Error> {
        self.provider.user().set_access_token(id, token).await
    }

    async fn update_profile(&self, id: &UserId, update: &ProfileUpdate) -> Result<User, Error> {
        self.provider.user().update_profile(id, update).await
    }
}

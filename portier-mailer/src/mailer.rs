use crate::{Email, MailerError};
use async_trait::async_trait;

/// A delivery mechanism for fully rendered emails.
///
/// Implementations report delivery failure through [`MailerError`]; callers decide whether
/// the failure aborts their own operation.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_email(&self, email: Email) -> Result<(), MailerError>;
}

#[async_trait]
impl<T: Mailer + ?Sized> Mailer for Box<T> {
    async fn send_email(&self, email: Email) -> Result<(), MailerError> {
        (**self).send_email(email).await
    }
}

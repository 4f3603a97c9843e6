use crate::Error;
use async_trait::async_trait;

/// Outbound delivery of account emails.
#[async_trait]
pub trait EmailSender: Send + Sync + 'static {
    /// Send the one-time verification code to a freshly registered address.
    ///
    /// An `Ok` return means the message was accepted by the transport.
    async fn send_verification_email(
        &self,
        to: &str,
        code: &str,
        user_name: Option<&str>,
    ) -> Result<(), Error>;
}

#[cfg(feature = "mailer")]
pub use self::mailer_impl::*;

#[cfg(feature = "mailer")]
mod mailer_impl {
    use super::EmailSender;
    use crate::{Error, error::MailError, services::account::VERIFICATION_CODE_TTL_MINUTES};
    use async_trait::async_trait;
    use portier_mailer::prelude::*;

    impl From<MailerError> for MailError {
        fn from(err: MailerError) -> Self {
            match err {
                MailerError::Template(e) => MailError::Render(e.to_string()),
                MailerError::Config(msg) => MailError::Config(msg),
                other => MailError::Delivery(other.to_string()),
            }
        }
    }

    impl From<MailerError> for Error {
        fn from(err: MailerError) -> Self {
            Error::Mail(err.into())
        }
    }

    /// [`EmailSender`] backed by a `portier-mailer` transport.
    pub struct MailerEmailSender {
        transport: Box<dyn Mailer>,
        config: MailerConfig,
    }

    impl MailerEmailSender {
        pub fn new(config: MailerConfig) -> Result<Self, Error> {
            let transport = config.build_transport()?;
            Ok(Self { transport, config })
        }

        pub fn from_env() -> Result<Self, Error> {
            Self::new(MailerConfig::from_env()?)
        }

        pub fn with_transport(transport: Box<dyn Mailer>, config: MailerConfig) -> Self {
            Self { transport, config }
        }

        fn create_context(&self, user_name: Option<&str>, user_email: &str) -> TemplateContext {
            TemplateContext {
                app_name: self.config.app_name.clone(),
                app_url: self.config.app_url.clone(),
                user_name: user_name.map(str::to_string),
                user_email: Some(user_email.to_string()),
            }
        }
    }

    #[async_trait]
    impl EmailSender for MailerEmailSender {
        async fn send_verification_email(
            &self,
            to: &str,
            code: &str,
            user_name: Option<&str>,
        ) -> Result<(), Error> {
            let email = VerificationEmail::build(
                &self.config.get_from_address(),
                to,
                code,
                VERIFICATION_CODE_TTL_MINUTES,
                self.create_context(user_name, to),
            )?;

            self.transport.send_email(email).await?;

            tracing::debug!(to = %to, "Verification email handed to transport");
            Ok(())
        }
    }

}

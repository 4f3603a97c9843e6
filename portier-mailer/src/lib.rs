//! Email delivery for portier
//!
//! This crate renders the account emails (currently the email-verification code message)
//! and hands them to a [`Mailer`] transport. Two transports ship with the crate:
//!
//! - [`SmtpTransport`] for production delivery through an SMTP relay
//! - [`FileTransport`] which writes `.eml` files to disk, handy for development
//!
//! The transport is selected at runtime from [`MailerConfig`], usually built with
//! [`MailerConfig::from_env`].
pub mod config;
pub mod email;
pub mod error;
pub mod mailer;
pub mod templates;
pub mod transports;

pub use config::{MailerConfig, TransportConfig};
pub use email::Email;
pub use error::MailerError;
pub use mailer::Mailer;
pub use templates::{TemplateContext, VerificationEmail};
pub use transports::{FileTransport, SmtpSecurity, SmtpSettings, SmtpTransport};

pub mod prelude {
    pub use crate::{
        Email, FileTransport, Mailer, MailerConfig, MailerError, SmtpTransport, TemplateContext,
        TransportConfig, VerificationEmail,
    };
}

//! Service layer for business logic
//!
//! [`AccountService`] implements the account lifecycle on top of a [`UserRepository`]
//! and the collaborator traits it is constructed with.
//!
//! [`UserRepository`]: crate::repositories::UserRepository

pub mod account;
pub mod mailer;

pub use account::{
    AccountService, LoginOutcome, VERIFICATION_CODE_TTL_MINUTES, VERIFICATION_GRACE_PERIOD_HOURS,
};
pub use mailer::EmailSender;

#[cfg(feature = "mailer")]
pub use mailer::MailerEmailSender;

//! Core functionality for portier
//!
//! This crate contains the account model, the validation rules and the [`AccountService`]
//! that ties them together: registration with email verification, login issuing a signed
//! access token, and profile updates.
//!
//! Storage is abstracted behind [`repositories::UserRepository`]; storage crates such as
//! `portier-storage-sqlite` implement it. Everything the service depends on besides storage
//! (password hashing, token signing, phone normalization, code generation, time and email
//! delivery) is a trait with a default implementation that can be swapped out.
//!
//! See [`User`] for the core user struct and [`Error`] for the error taxonomy.
pub mod clock;
pub mod crypto;
pub mod error;
pub mod phone;
pub mod repositories;
pub mod services;
pub mod token;
pub mod user;
pub mod validation;

pub use clock::{Clock, SystemClock};
pub use crypto::{Argon2PasswordHasher, CodeGenerator, NumericCodeGenerator, PasswordHasher};
pub use error::Error;
pub use phone::{NormalizedPhone, PhoneNormalizer, PhoneRegion, RegionPhoneNormalizer};
pub use repositories::{
    RepositoryProvider, UserRepository, UserRepositoryAdapter, UserRepositoryProvider,
};
pub use services::{AccountService, EmailSender, LoginOutcome};
pub use token::{AccessTokenClaims, JwtAlgorithm, JwtConfig, JwtTokenIssuer, TokenIssuer};
pub use user::{
    NewUser, NewUserBuilder, PendingVerification, ProfileChanges, ProfileUpdate, Registration,
    User, UserId,
};

#[cfg(feature = "mailer")]
pub use portier_mailer::MailerConfig;
#[cfg(feature = "mailer")]
pub use services::MailerEmailSender;

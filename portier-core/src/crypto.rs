//! Credential hashing and verification code generation
//!
//! Passwords are hashed with Argon2id through the `password-auth` crate, which generates a
//! random salt per hash and encodes it in the PHC string. Verification codes are short
//! numeric strings drawn from the thread-local CSPRNG and compared in constant time.

use crate::Error;
use rand::Rng;
use subtle::ConstantTimeEq;

/// One-way, salted credential hashing.
pub trait PasswordHasher: Send + Sync + 'static {
    /// Derive a storable hash from a plaintext password.
    fn hash(&self, password: &str) -> Result<String, Error>;

    /// Check a plaintext password against a stored hash.
    ///
    /// Malformed hashes never match.
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Argon2id hasher with the `password-auth` defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PasswordHasher;

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, Error> {
        Ok(password_auth::generate_hash(password))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        password_auth::verify_password(password, hash).is_ok()
    }
}

/// Source of one-time email verification codes.
pub trait CodeGenerator: Send + Sync + 'static {
    fn generate(&self) -> String;
}

/// Generates zero-padded numeric codes, six digits by default.
#[derive(Debug, Clone, Copy)]
pub struct NumericCodeGenerator {
    digits: u32,
}

impl NumericCodeGenerator {
    pub fn new(digits: u32) -> Self {
        assert!(
            (4..=9).contains(&digits),
            "verification codes must have between 4 and 9 digits"
        );
        Self { digits }
    }
}

impl Default for NumericCodeGenerator {
    fn default() -> Self {
        Self::new(6)
    }
}

impl CodeGenerator for NumericCodeGenerator {
    fn generate(&self) -> String {
        let upper = 10u32.pow(self.digits);
        let value = rand::rng().random_range(0..upper);
        format!("{value:0width$}", width = self.digits as usize)
    }
}

/// Perform constant-time comparison of two byte slices.
///
/// Slices of different lengths are rejected immediately; only the length leaks.
pub fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

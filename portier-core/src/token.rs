//! Signed access tokens
//!
//! A successful login yields a JSON Web Token identifying the user. Tokens are
//! self-contained: the claims carry the user id, first name and email, and the
//! signature is checked against the configured key on verification.

use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{Error, User, error::CryptoError};

/// Access tokens are valid for a day unless configured otherwise.
pub const DEFAULT_ACCESS_TOKEN_TTL_HOURS: i64 = 24;

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject - user ID
    pub sub: String,
    pub firstname: String,
    pub email: String,
    /// Issued at in seconds (as UTC timestamp)
    pub iat: i64,
    /// Expiration time in seconds (as UTC timestamp)
    pub exp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// JWT algorithm type
#[derive(Clone)]
pub enum JwtAlgorithm {
    /// RS256 - RSA with SHA-256
    RS256 {
        /// Private key for signing JWTs (PEM format)
        private_key: Vec<u8>,
        /// Public key for verifying JWTs (PEM format)
        public_key: Vec<u8>,
    },
    /// HS256 - HMAC with SHA-256
    HS256 { secret_key: Vec<u8> },
}

impl std::fmt::Debug for JwtAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwtAlgorithm::RS256 { .. } => f.write_str("RS256"),
            JwtAlgorithm::HS256 { .. } => f.write_str("HS256"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub algorithm: JwtAlgorithm,
    pub issuer: Option<String>,
    pub ttl: Duration,
}

impl JwtConfig {
    pub fn new_rs256(private_key: Vec<u8>, public_key: Vec<u8>) -> Self {
        Self {
            algorithm: JwtAlgorithm::RS256 {
                private_key,
                public_key,
            },
            issuer: None,
            ttl: Duration::hours(DEFAULT_ACCESS_TOKEN_TTL_HOURS),
        }
    }

    pub fn new_hs256(secret_key: Vec<u8>) -> Self {
        Self {
            algorithm: JwtAlgorithm::HS256 { secret_key },
            issuer: None,
            ttl: Duration::hours(DEFAULT_ACCESS_TOKEN_TTL_HOURS),
        }
    }

    /// Create a new JWT configuration from RSA key files (PEM format)
    pub fn from_rs256_pem_files(
        private_key_path: impl AsRef<Path>,
        public_key_path: impl AsRef<Path>,
    ) -> Result<Self, Error> {
        let private_key = std::fs::read(private_key_path).map_err(|e| {
            CryptoError::InvalidKey(format!("Failed to read private key file: {e}"))
        })?;
        let public_key = std::fs::read(public_key_path)
            .map_err(|e| CryptoError::InvalidKey(format!("Failed to read public key file: {e}")))?;

        Ok(Self::new_rs256(private_key, public_key))
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn jwt_algorithm(&self) -> Algorithm {
        match &self.algorithm {
            JwtAlgorithm::RS256 { .. } => Algorithm::RS256,
            JwtAlgorithm::HS256 { .. } => Algorithm::HS256,
        }
    }

    pub fn encoding_key(&self) -> Result<EncodingKey, Error> {
        match &self.algorithm {
            JwtAlgorithm::RS256 { private_key, .. } => EncodingKey::from_rsa_pem(private_key)
                .map_err(|e| CryptoError::InvalidKey(format!("Invalid RSA private key: {e}")).into()),
            JwtAlgorithm::HS256 { secret_key } => Ok(EncodingKey::from_secret(secret_key)),
        }
    }

    pub fn decoding_key(&self) -> Result<DecodingKey, Error> {
        match &self.algorithm {
            JwtAlgorithm::RS256 { public_key, .. } => DecodingKey::from_rsa_pem(public_key)
                .map_err(|e| CryptoError::InvalidKey(format!("Invalid RSA public key: {e}")).into()),
            JwtAlgorithm::HS256 { secret_key } => Ok(DecodingKey::from_secret(secret_key)),
        }
    }

    pub fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.jwt_algorithm());
        if let Some(issuer) = &self.issuer {
            validation.set_issuer(&[issuer]);
        }
        validation
    }
}

/// Produces and checks signed access tokens.
pub trait TokenIssuer: Send + Sync + 'static {
    /// Sign a token for `user`, issued at `issued_at`.
    fn issue(&self, user: &User, issued_at: DateTime<Utc>) -> Result<String, Error>;

    /// Check the signature and expiry of `token` and return its claims.
    fn verify(&self, token: &str) -> Result<AccessTokenClaims, Error>;
}

#[derive(Debug, Clone)]
pub struct JwtTokenIssuer {
    config: JwtConfig,
}

impl JwtTokenIssuer {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &JwtConfig {
        &self.config
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user: &User, issued_at: DateTime<Utc>) -> Result<String, Error> {
        let expires_at = issued_at
            .checked_add_signed(self.config.ttl)
            .ok_or_else(|| CryptoError::TokenSigning("Token lifetime out of range".to_string()))?;

        let claims = AccessTokenClaims {
            sub: user.id.to_string(),
            firstname: user.first_name.clone(),
            email: user.email.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            iss: self.config.issuer.clone(),
        };

        let header = Header::new(self.config.jwt_algorithm());
        let encoding_key = self.config.encoding_key()?;

        encode(&header, &claims, &encoding_key)
            .map_err(|e| CryptoError::TokenSigning(format!("Failed to encode JWT: {e}")).into())
    }

    fn verify(&self, token: &str) -> Result<AccessTokenClaims, Error> {
        let decoding_key = self.config.decoding_key()?;

        let token_data =
            decode::<AccessTokenClaims>(token, &decoding_key, &self.config.validation()).map_err(
                |e| CryptoError::TokenVerification(format!("JWT validation failed: {e}")),
            )?;

        Ok(token_data.claims)
    }
}

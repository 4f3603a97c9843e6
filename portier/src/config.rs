//! Process configuration read from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `DATABASE_URL` | `sqlite://portier.db?mode=rwc` |
//! | `JWT_SECRET` | required unless both RSA key paths are set |
//! | `JWT_PRIVATE_KEY_PATH` / `JWT_PUBLIC_KEY_PATH` | unset |
//! | `JWT_ISSUER` | unset |
//! | `ACCESS_TOKEN_TTL_HOURS` | `24` |
//! | `PHONE_REGION` | `FR` |
//! | `BIND_ADDRESS` | `0.0.0.0:3030` |
//!
//! Mail delivery is configured separately, see [`portier_core::MailerConfig`].

use chrono::Duration;
use portier_core::{JwtConfig, PhoneRegion, token::DEFAULT_ACCESS_TOKEN_TTL_HOURS};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://portier.db?mode=rwc";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3030";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct PortierConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub phone_region: PhoneRegion,
    pub bind_address: String,
}

impl PortierConfig {
    /// Load the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load the configuration through `lookup`, which returns the value of a variable if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let database_url = get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let bind_address = get("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let phone_region = match get("PHONE_REGION") {
            Some(code) => PhoneRegion::from_iso(&code).ok_or_else(|| ConfigError::Invalid {
                name: "PHONE_REGION",
                reason: format!("unsupported region {code}"),
            })?,
            None => PhoneRegion::default(),
        };

        let ttl = match get("ACCESS_TOKEN_TTL_HOURS") {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|hours| *hours > 0)
                .and_then(Duration::try_hours)
                .ok_or_else(|| ConfigError::Invalid {
                    name: "ACCESS_TOKEN_TTL_HOURS",
                    reason: format!("expected a positive number of hours, got {raw}"),
                })?,
            None => Duration::hours(DEFAULT_ACCESS_TOKEN_TTL_HOURS),
        };

        let jwt = match (get("JWT_PRIVATE_KEY_PATH"), get("JWT_PUBLIC_KEY_PATH")) {
            (Some(private_key), Some(public_key)) => {
                JwtConfig::from_rs256_pem_files(&private_key, &public_key).map_err(|e| {
                    ConfigError::Invalid {
                        name: "JWT_PRIVATE_KEY_PATH",
                        reason: e.to_string(),
                    }
                })?
            }
            _ => {
                let secret = get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
                JwtConfig::new_hs256(secret.into_bytes())
            }
        };

        let mut jwt = jwt.with_ttl(ttl);
        if let Some(issuer) = get("JWT_ISSUER") {
            jwt = jwt.with_issuer(issuer);
        }

        Ok(Self {
            database_url,
            jwt,
            phone_region,
            bind_address,
        })
    }
}

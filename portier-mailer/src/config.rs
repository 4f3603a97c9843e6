use crate::transports::{SmtpSecurity, SmtpSettings};
use crate::{FileTransport, Mailer, MailerError, SmtpTransport};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_OUTPUT_DIR: &str = "./emails";
const DEFAULT_FROM_ADDRESS: &str = "noreply@example.com";
const DEFAULT_APP_NAME: &str = "Portier";
const DEFAULT_APP_URL: &str = "http://localhost:3030";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailerConfig {
    pub transport: TransportConfig,
    pub from_address: String,
    pub from_name: Option<String>,
    pub app_name: String,
    pub app_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransportConfig {
    Smtp(SmtpSettings),
    File { output_dir: PathBuf },
}

impl MailerConfig {
    /// Build the configuration from `MAILER_*` environment variables.
    ///
    /// `MAILER_SMTP_HOST` selects the SMTP transport, otherwise `MAILER_FILE_OUTPUT_DIR`
    /// (default `./emails`) selects the file transport.
    pub fn from_env() -> Result<Self, MailerError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`MailerConfig::from_env`] with variables read through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MailerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let transport = match lookup("MAILER_SMTP_HOST") {
            Some(host) => {
                let port = lookup("MAILER_SMTP_PORT")
                    .map(|port| {
                        port.parse::<u16>().map_err(|_| {
                            MailerError::Config(format!("Invalid MAILER_SMTP_PORT: {port}"))
                        })
                    })
                    .transpose()?;

                let security = lookup("MAILER_SMTP_TLS")
                    .map(|tls| {
                        SmtpSecurity::parse(&tls).ok_or_else(|| {
                            MailerError::Config(format!("Invalid MAILER_SMTP_TLS: {tls}"))
                        })
                    })
                    .transpose()?
                    .unwrap_or_default();

                TransportConfig::Smtp(SmtpSettings {
                    host,
                    port,
                    username: lookup("MAILER_SMTP_USERNAME"),
                    password: lookup("MAILER_SMTP_PASSWORD"),
                    security,
                })
            }
            None => TransportConfig::File {
                output_dir: lookup("MAILER_FILE_OUTPUT_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            },
        };

        Ok(Self {
            transport,
            from_address: lookup("MAILER_FROM_ADDRESS")
                .unwrap_or_else(|| DEFAULT_FROM_ADDRESS.to_string()),
            from_name: lookup("MAILER_FROM_NAME"),
            app_name: lookup("MAILER_APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            app_url: lookup("MAILER_APP_URL").unwrap_or_else(|| DEFAULT_APP_URL.to_string()),
        })
    }

    pub fn build_transport(&self) -> Result<Box<dyn Mailer>, MailerError> {
        match &self.transport {
            TransportConfig::Smtp(settings) => {
                Ok(Box::new(SmtpTransport::from_settings(settings)?))
            }
            TransportConfig::File { output_dir } => Ok(Box::new(FileTransport::new(output_dir)?)),
        }
    }

    /// The `From` header value, with the display name when one is configured.
    pub fn get_from_address(&self) -> String {
        match &self.from_name {
            Some(name) => format!("{name} <{}>", self.from_address),
            None => self.from_address.clone(),
        }
    }
}

impl Default for MailerConfig {
    fn default() -> Self {
        Self {
            transport: TransportConfig::File {
                output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            },
            from_address: DEFAULT_FROM_ADDRESS.to_string(),
            from_name: None,
            app_name: DEFAULT_APP_NAME.to_string(),
            app_url: DEFAULT_APP_URL.to_string(),
        }
    }
}

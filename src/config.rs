//! Configuration types, built from environment variables.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Top-level service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    /// Path of the libSQL database file holding leads.
    pub db_path: PathBuf,
    /// SMTP settings. `None` means emails are logged instead of sent.
    pub smtp: Option<SmtpConfig>,
    pub business: BusinessProfile,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let db_path = std::env::var("QUOTE_DESK_DB_PATH")
            .unwrap_or_else(|_| "./data/quote-desk.db".to_string());

        Ok(Self {
            server: ServerConfig::from_env()?,
            db_path: PathBuf::from(db_path),
            smtp: SmtpConfig::from_env()?,
            business: BusinessProfile::from_env(),
        })
    }
}

/// HTTP bind settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("QUOTE_DESK_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = parse_port("QUOTE_DESK_PORT", 3000)?;
        Ok(Self { host, port })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }
        let ip: IpAddr = self.host.parse().map_err(|e| ConfigError::InvalidValue {
            key: "QUOTE_DESK_HOST".into(),
            message: format!("{e}"),
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Outbound SMTP settings.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
    pub from_address: String,
}

impl SmtpConfig {
    /// Returns `Ok(None)` if `SMTP_HOST` is not set (SMTP disabled).
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        let Ok(host) = std::env::var("SMTP_HOST") else {
            return Ok(None);
        };

        let port = parse_port("SMTP_PORT", 587)?;
        let username = std::env::var("SMTP_USER").unwrap_or_default();
        let password = SecretString::from(std::env::var("SMTP_PASS").unwrap_or_default());
        let from_address = std::env::var("SMTP_FROM").unwrap_or_else(|_| username.clone());

        if from_address.is_empty() {
            return Err(ConfigError::MissingEnvVar("SMTP_FROM".into()));
        }

        Ok(Some(Self {
            host,
            port,
            username,
            password,
            from_address,
        }))
    }
}

/// Who the leads belong to: owner inbox, signature, and fallback contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessProfile {
    pub business_name: String,
    pub agent_name: String,
    /// Receives the new-lead notification.
    pub owner_email: String,
    pub contact: FallbackContact,
    /// Source tag stamped on every stored lead.
    pub lead_source: String,
}

impl BusinessProfile {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            business_name: std::env::var("BUSINESS_NAME").unwrap_or(default.business_name),
            agent_name: std::env::var("AGENT_NAME").unwrap_or(default.agent_name),
            owner_email: std::env::var("SITE_OWNER_EMAIL").unwrap_or(default.owner_email),
            contact: FallbackContact {
                phone: std::env::var("CONTACT_PHONE").unwrap_or(default.contact.phone),
                email: std::env::var("CONTACT_EMAIL").unwrap_or(default.contact.email),
            },
            lead_source: std::env::var("LEAD_SOURCE").unwrap_or(default.lead_source),
        }
    }
}

impl Default for BusinessProfile {
    fn default() -> Self {
        Self {
            business_name: "Quote Desk Insurance".to_string(),
            agent_name: "Licensed Agent".to_string(),
            owner_email: "agent@example.com".to_string(),
            contact: FallbackContact::default(),
            lead_source: "website_quote_form".to_string(),
        }
    }
}

/// Human contact shown whenever the digital path fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackContact {
    pub phone: String,
    pub email: String,
}

impl Default for FallbackContact {
    fn default() -> Self {
        Self {
            phone: "(555) 010-2707".to_string(),
            email: "agent@example.com".to_string(),
        }
    }
}

fn parse_port(key: &str, default: u16) -> Result<u16, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("'{raw}' is not a valid port"),
        }),
        Err(_) => Ok(default),
    }
}

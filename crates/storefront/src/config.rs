//! Configuration loaded from environment variables.
//!
//! A `.env` file is honored in development via dotenvy; real deployments
//! set the variables directly.

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Default database URL: a file-backed store in the working directory,
/// created on first use.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://byteshelf.db?mode=rwc";

/// Default email for the bootstrapped admin account.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";

/// Default password for the bootstrapped admin account. Triggers a
/// startup warning when left unchanged.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable holds a value that cannot be parsed.
    #[error("Invalid value for {name}: {message}")]
    InvalidValue {
        /// Variable name.
        name: &'static str,
        /// What was wrong with it.
        message: String,
    },
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Database connection string.
    pub database_url: SecretString,
    /// Address to bind the HTTP listener to.
    pub host: IpAddr,
    /// Port to bind the HTTP listener to.
    pub port: u16,
    /// Email of the bootstrapped admin account.
    pub admin_email: String,
    /// Password of the bootstrapped admin account.
    pub admin_password: SecretString,
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Every variable has a development-friendly default:
    ///
    /// - `DATABASE_URL` - `sqlite://byteshelf.db?mode=rwc`
    /// - `HOST` - `127.0.0.1`
    /// - `PORT` - `8080`
    /// - `ADMIN_EMAIL` - `admin@example.com`
    /// - `ADMIN_PASSWORD` - `admin123` (warned about at startup)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `HOST` or `PORT` cannot be
    /// parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env if present; ignore a missing file
        dotenvy::dotenv().ok();

        let database_url = SecretString::from(
            std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned()),
        );

        let host = std::env::var("HOST")
            .unwrap_or_else(|_| DEFAULT_HOST.to_owned())
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidValue {
                name: "HOST",
                message: e.to_string(),
            })?;

        let port = match std::env::var("PORT") {
            Ok(value) => value.parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                name: "PORT",
                message: e.to_string(),
            })?,
            Err(_) => DEFAULT_PORT,
        };

        let admin_email =
            std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_owned());

        let admin_password = SecretString::from(
            std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_owned()),
        );

        Ok(Self {
            database_url,
            host,
            port,
            admin_email,
            admin_password,
        })
    }

    /// The socket address to bind the HTTP listener to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

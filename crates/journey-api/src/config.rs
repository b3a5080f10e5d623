//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::AppError;

/// Locale used when neither the environment nor the playbook names one.
pub const FALLBACK_LOCALE: &str = "ru";

/// Runtime configuration for the API server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path of the playbook document (`.json`, `.yaml` or `.yml`).
    pub playbook_path: PathBuf,
    pub host: String,
    pub port: u16,
    /// Overrides the playbook's `locale_default` when set.
    pub default_locale: Option<String>,
}

impl Config {
    /// Reads `PLAYBOOK_PATH`, `HOST`, `PORT` and `DEFAULT_LOCALE`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `PLAYBOOK_PATH` is missing or `PORT` is
    /// not a valid port number.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let playbook_path = lookup("PLAYBOOK_PATH")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| {
                AppError::Config("PLAYBOOK_PATH environment variable must be set".to_owned())
            })?;
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_owned());
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => 3000,
        };
        let default_locale = lookup("DEFAULT_LOCALE").filter(|l| !l.is_empty());

        Ok(Self {
            playbook_path,
            host,
            port,
            default_locale,
        })
    }

    /// Parses `host:port` into a socket address.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` for an invalid host/port combination.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }

    /// Picks the effective default locale: the environment override, then
    /// the playbook's own default, then [`FALLBACK_LOCALE`].
    #[must_use]
    pub fn resolve_locale(&self, playbook_default: Option<&str>) -> String {
        self.default_locale
            .as_deref()
            .or(playbook_default)
            .unwrap_or(FALLBACK_LOCALE)
            .to_owned()
    }
}

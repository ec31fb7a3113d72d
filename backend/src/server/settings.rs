//! Server settings loaded via OrthoConfig.
//!
//! Values layer CLI flags over `USERS_*` environment variables over the
//! defaults below.

use std::net::{IpAddr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 9090;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Errors raised while turning settings into a bind address.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// The host was not an IP address.
    #[error("invalid host '{host}': expected an IP address")]
    InvalidHost { host: String },
}

/// Configuration values for the HTTP server and its record store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERS")]
pub struct ServerSettings {
    /// Interface to bind. Defaults to all interfaces.
    #[ortho_config(default = String::from(DEFAULT_HOST))]
    pub host: String,
    /// Port to bind.
    #[ortho_config(default = DEFAULT_PORT)]
    pub port: u16,
    /// PostgreSQL connection URL. The in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = DEFAULT_POOL_MAX_SIZE)]
    pub pool_max_size: u32,
}

impl ServerSettings {
    /// Configured host.
    pub fn host(&self) -> &str {
        self.host.trim()
    }

    /// Configured port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Configured pool size.
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size
    }

    /// Return the configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Socket address assembled from host and port.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidHost`] when the host is not an IP
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.host();
        let ip: IpAddr = host.parse().map_err(|_| SettingsError::InvalidHost {
            host: host.to_owned(),
        })?;
        Ok(SocketAddr::new(ip, self.port()))
    }
}

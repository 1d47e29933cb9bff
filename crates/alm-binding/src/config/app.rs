//! Application configuration for the ALM binding server.

use serde::Deserialize;

use crate::error::AppResult;

/// Storage backend selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// PostgreSQL via SQLx
    #[default]
    Postgres,
    /// Process-local store, optionally seeded from a JSON file
    Memory,
}

/// Application configuration loaded from environment variables.
///
/// Environment variables are prefixed with `ALM_`:
/// - `ALM_HOST`: Server bind address (default: "0.0.0.0")
/// - `ALM_PORT`: Server port (default: 8083)
/// - `ALM_SERVER_NAME`: Server name for identification
/// - `ALM_STORE`: `postgres` or `memory` (default: postgres)
/// - `ALM_RUN_MIGRATIONS`: Apply bundled migrations on startup (default: false)
/// - `ALM_SEED_FILE`: JSON seed for the memory store (optional)
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Server name for identification
    #[serde(default = "default_server_name")]
    pub server_name: String,

    /// Storage backend
    #[serde(default)]
    pub store: StoreBackend,

    /// Apply migrations at startup (postgres only)
    #[serde(default)]
    pub run_migrations: bool,

    /// Seed file for the memory backend
    #[serde(default)]
    pub seed_file: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8083
}

fn default_server_name() -> String {
    "alm-binding".to_string()
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables are prefixed with `ALM_`.
    pub fn from_env() -> AppResult<Self> {
        Self::from_vars(std::env::vars())
    }

    /// Read the configuration from an explicit set of variables.
    pub fn from_vars<I>(vars: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::prefixed("ALM_").from_iter(vars)?)
    }

    /// Get the server bind address as a string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            server_name: default_server_name(),
            store: StoreBackend::default(),
            run_migrations: false,
            seed_file: None,
        }
    }
}

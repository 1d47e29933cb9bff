//! Connection settings for the Postgres store backend.

use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;

use crate::error::AppResult;

/// Postgres settings, read from `POSTGRES_*` variables.
///
/// Only consulted when `ALM_STORE=postgres`. A value that does not parse
/// (for instance a non-numeric `POSTGRES_PORT`) fails startup instead of
/// falling back to a default.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_user")]
    pub user: String,

    #[serde(default)]
    pub password: String,

    /// Database holding the `alm` schema
    #[serde(default = "default_database")]
    pub database: String,

    /// Pool size bounds
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Seconds to wait for a pooled connection
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout: u64,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    5432
}

fn default_user() -> String {
    "alm".to_string()
}

fn default_database() -> String {
    "alm".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_acquire_timeout() -> u64 {
    30
}

impl DatabaseConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_vars(std::env::vars())
    }

    /// Read the settings from an explicit set of variables.
    pub fn from_vars<I>(vars: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::prefixed("POSTGRES_").from_iter(vars)?)
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

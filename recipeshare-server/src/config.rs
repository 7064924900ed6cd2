//! Runtime configuration read from the environment
//!
//! Keys mirror the `.env` file the service has always shipped with:
//! database host/port/service name/credentials and the HTTP port.
//! Loading the `.env` file itself is the binary's job; this module only
//! reads variables that are already set.

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::PgConnectOptions;

use crate::db::PoolSettings;

const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_DB_SERVICE_NAME: &str = "recipeshare";
const DEFAULT_DB_USER: &str = "recipeshare";
const DEFAULT_HTTP_PORT: u16 = 3000;
const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 10;

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Database connection settings
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    /// Database (service) name
    pub service_name: String,
    pub user: String,
    pub password: String,
}

impl DatabaseConfig {
    /// Build connect options without parsing a URL, so a bad password or an
    /// odd host name can never fail pool construction.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.service_name)
            .username(&self.user)
            .password(&self.password)
    }
}

// Hand-written so the password never reaches a log line.
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("service_name", &self.service_name)
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_DB_HOST.to_string(),
            port: DEFAULT_DB_PORT,
            service_name: DEFAULT_DB_SERVICE_NAME.to_string(),
            user: DEFAULT_DB_USER.to_string(),
            password: String::new(),
        }
    }
}

/// Full service configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub pool: PoolSettings,
    /// Address the HTTP listener binds to (default: 0.0.0.0:3000)
    pub bind_addr: SocketAddr,
    /// How long to wait for the pool to drain on shutdown
    pub shutdown_grace: Duration,
    /// Allow any CORS origin (default: false = localhost only)
    pub cors_permissive: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            pool: PoolSettings::default(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_HTTP_PORT)),
            shutdown_grace: Duration::from_secs(DEFAULT_SHUTDOWN_GRACE_SECS),
            cors_permissive: false,
        }
    }
}

impl AppConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    ///
    /// Unset keys fall back to defaults; set-but-unparseable keys are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let pool_defaults = defaults.pool;

        let database = DatabaseConfig {
            host: lookup("DB_HOST").unwrap_or(defaults.database.host),
            port: parse_or(&lookup, "DB_PORT", defaults.database.port)?,
            service_name: lookup("DB_SERVICE_NAME").unwrap_or(defaults.database.service_name),
            user: lookup("DB_USER").unwrap_or(defaults.database.user),
            password: lookup("DB_PASSWORD").unwrap_or_default(),
        };

        let pool = PoolSettings {
            min_connections: parse_or(&lookup, "DB_POOL_MIN", pool_defaults.min_connections)?,
            max_connections: parse_or(&lookup, "DB_POOL_MAX", pool_defaults.max_connections)?,
            idle_timeout: Duration::from_secs(parse_or(
                &lookup,
                "DB_IDLE_TIMEOUT_SECS",
                pool_defaults.idle_timeout.as_secs(),
            )?),
            acquire_timeout: Duration::from_secs(parse_or(
                &lookup,
                "DB_ACQUIRE_TIMEOUT_SECS",
                pool_defaults.acquire_timeout.as_secs(),
            )?),
        };

        if pool.min_connections > pool.max_connections {
            return Err(ConfigError::Invalid {
                key: "DB_POOL_MIN",
                value: pool.min_connections.to_string(),
            });
        }

        let port: u16 = parse_or(&lookup, "PORT", DEFAULT_HTTP_PORT)?;
        let shutdown_grace = Duration::from_secs(parse_or(
            &lookup,
            "SHUTDOWN_GRACE_SECS",
            DEFAULT_SHUTDOWN_GRACE_SECS,
        )?);

        Ok(Self {
            database,
            pool,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], port)),
            shutdown_grace,
            cors_permissive: defaults.cors_permissive,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}

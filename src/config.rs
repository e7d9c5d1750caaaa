// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Environment variable names, per-profile defaults, and the [`AppConfig`]
//! loaded once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `APP_ENV` | Profile (`development`, `test`, `production`) | `development` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `3005` |
//! | `DATABASE_PATH` | redb database file | depends on profile |
//! | `JWT_SECRET` | HS256 signing secret | Required for production |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::fmt;
use std::path::PathBuf;

/// Environment variable selecting the configuration profile.
pub const APP_ENV_ENV: &str = "APP_ENV";

/// Environment variable for the bind host.
pub const HOST_ENV: &str = "HOST";

/// Environment variable for the bind port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable for the database file path.
///
/// # Default
/// `data/<profile>.redb` outside production, `/data/registry.redb` in production.
pub const DATABASE_PATH_ENV: &str = "DATABASE_PATH";

/// Environment variable holding the token signing secret.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Environment variable selecting the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3005;
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown APP_ENV value: {0}")]
    UnknownProfile(String),

    #[error("invalid PORT value: {0}")]
    InvalidPort(String),

    #[error("JWT_SECRET must be set in the production profile")]
    MissingSecret,

    #[error("JWT_SECRET must not be empty")]
    EmptySecret,
}

/// Configuration profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Development,
    Test,
    Production,
}

impl Profile {
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Profile::Development),
            "test" => Ok(Profile::Test),
            "production" | "prod" => Ok(Profile::Production),
            other => Err(ConfigError::UnknownProfile(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Development => "development",
            Profile::Test => "test",
            Profile::Production => "production",
        }
    }

    fn default_database_path(&self) -> PathBuf {
        match self {
            Profile::Production => PathBuf::from("/data/registry.redb"),
            other => PathBuf::from(format!("data/{}.redb", other.as_str())),
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Where the signing secret came from.
///
/// `Generated` secrets live only as long as the process, so every token
/// becomes unverifiable after a restart.
#[derive(Clone, PartialEq, Eq)]
pub enum JwtSecret {
    Configured(Vec<u8>),
    Generated,
}

impl fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JwtSecret::Configured(_) => f.write_str("Configured(<redacted>)"),
            JwtSecret::Generated => f.write_str("Generated"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub profile: Profile,
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub jwt_secret: JwtSecret,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let profile = match lookup(APP_ENV_ENV) {
            Some(value) => Profile::parse(&value)?,
            None => Profile::Development,
        };

        let host = lookup(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup(PORT_ENV) {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(value))?,
            None => DEFAULT_PORT,
        };

        let database_path = lookup(DATABASE_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| profile.default_database_path());

        let jwt_secret = match lookup(JWT_SECRET_ENV) {
            Some(secret) if secret.is_empty() => return Err(ConfigError::EmptySecret),
            Some(secret) => JwtSecret::Configured(secret.into_bytes()),
            None if profile == Profile::Production => return Err(ConfigError::MissingSecret),
            None => JwtSecret::Generated,
        };

        let log_format = match lookup(LOG_FORMAT_ENV).as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            profile,
            host,
            port,
            database_path,
            jwt_secret,
            log_format,
        })
    }

    /// `host:port` string suitable for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values and the
//! [`Settings`] struct built from them at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `PROFILE` | Deployment profile (`development`, `staging`, `production`) | `development` |
//! | `APPLICATION_NAME` | Service name | `fase4-auth-service` |
//! | `APPLICATION_SECRET_NAME` | Name of the secret document holding the signing key | `fase4-auth-service-secrets` |
//! | `APPLICATION_TABLE_NAME` | User table name | `fase4-auth-service-users` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `DATA_DIR` | Directory holding the user database | `./data` |
//! | `STORE_BACKEND` | `redb` or `memory` | `redb` |
//! | `SECRETS_DIR` | Directory containing `<secret name>.json` | `./secrets` |
//! | `JWT_PRIVATE_KEY` | PEM private key, overrides the secret document | - |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub const PROFILE_ENV: &str = "PROFILE";
pub const APPLICATION_NAME_ENV: &str = "APPLICATION_NAME";
pub const APPLICATION_SECRET_NAME_ENV: &str = "APPLICATION_SECRET_NAME";
pub const APPLICATION_TABLE_NAME_ENV: &str = "APPLICATION_TABLE_NAME";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the database directory path.
///
/// The redb file `<table name>.redb` is created inside this directory.
pub const DATA_DIR_ENV: &str = "DATA_DIR";
pub const STORE_BACKEND_ENV: &str = "STORE_BACKEND";
pub const SECRETS_DIR_ENV: &str = "SECRETS_DIR";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_APPLICATION_NAME: &str = "fase4-auth-service";
pub const DEFAULT_SECRET_NAME: &str = "fase4-auth-service-secrets";
pub const DEFAULT_TABLE_NAME: &str = "fase4-auth-service-users";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_SECRETS_DIR: &str = "./secrets";

/// Configuration and secret loading errors. All of them are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid profile '{0}'. Must be one of: development, staging, production")]
    InvalidProfile(String),

    #[error("Invalid store backend '{0}'. Must be one of: redb, memory")]
    InvalidStoreBackend(String),

    #[error("Invalid port '{0}'")]
    InvalidPort(String),

    #[error("secret {0} is missing")]
    MissingSecret(&'static str),

    #[error("failed to read secret document {path}: {source}")]
    SecretIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed secret document: {0}")]
    MalformedSecret(#[from] serde_json::Error),
}

/// Deployment profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    #[default]
    Development,
    Staging,
    Production,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Development => "development",
            Profile::Staging => "staging",
            Profile::Production => "production",
        }
    }

    /// Short form used in resource names.
    pub fn short(&self) -> &'static str {
        match self {
            Profile::Development => "dev",
            Profile::Staging => "stg",
            Profile::Production => "prod",
        }
    }
}

impl FromStr for Profile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(Profile::Development),
            "staging" => Ok(Profile::Staging),
            "production" => Ok(Profile::Production),
            other => Err(ConfigError::InvalidProfile(other.to_string())),
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which [`UserStore`](crate::storage::UserStore) implementation backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Redb,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "redb" => Ok(StoreBackend::Redb),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(ConfigError::InvalidStoreBackend(s.to_string())),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// Process-wide settings, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub profile: Profile,
    pub short_profile: &'static str,
    pub version: &'static str,
    pub application_name: String,
    pub application_secret_name: String,
    pub application_table_name: String,
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub store_backend: StoreBackend,
    pub secrets_dir: PathBuf,
    pub log_format: LogFormat,
}

impl Default for Settings {
    fn default() -> Self {
        let profile = Profile::default();
        Self {
            profile,
            short_profile: profile.short(),
            version: env!("CARGO_PKG_VERSION"),
            application_name: DEFAULT_APPLICATION_NAME.to_string(),
            application_secret_name: DEFAULT_SECRET_NAME.to_string(),
            application_table_name: DEFAULT_TABLE_NAME.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            store_backend: StoreBackend::default(),
            secrets_dir: PathBuf::from(DEFAULT_SECRETS_DIR),
            log_format: LogFormat::default(),
        }
    }
}

impl Settings {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();

        let profile = match lookup(PROFILE_ENV) {
            Some(value) => value.parse::<Profile>()?,
            None => defaults.profile,
        };

        let port = match lookup(PORT_ENV) {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(value))?,
            None => defaults.port,
        };

        let store_backend = match lookup(STORE_BACKEND_ENV) {
            Some(value) => value.parse::<StoreBackend>()?,
            None => defaults.store_backend,
        };

        Ok(Self {
            profile,
            short_profile: profile.short(),
            version: defaults.version,
            application_name: lookup(APPLICATION_NAME_ENV).unwrap_or(defaults.application_name),
            application_secret_name: lookup(APPLICATION_SECRET_NAME_ENV)
                .unwrap_or(defaults.application_secret_name),
            application_table_name: lookup(APPLICATION_TABLE_NAME_ENV)
                .unwrap_or(defaults.application_table_name),
            host: lookup(HOST_ENV).unwrap_or(defaults.host),
            port,
            data_dir: lookup(DATA_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            store_backend,
            secrets_dir: lookup(SECRETS_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.secrets_dir),
            log_format: lookup(LOG_FORMAT_ENV)
                .map(|value| LogFormat::parse(&value))
                .unwrap_or_default(),
        })
    }

    /// Path of the redb database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir
            .join(format!("{}.redb", self.application_table_name))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

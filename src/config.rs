// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is read from the environment exactly once at startup and
//! is immutable for the process lifetime. The service refuses to start when
//! any credential variable is absent.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `NEAR_ACCOUNT_ID` | Relay account identifier | Required |
//! | `NEAR_PRIVATE_KEY` | Signing key (`ed25519:<base58>`) | Required |
//! | `NEAR_RPC_URL` | NEAR JSON-RPC endpoint | Required |
//! | `API_SECRET` | Shared secret for the `X-API-Secret` header | Required |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `4000` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `LOG_FILE` | Append-only informational log file | `info.log` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=info` |

use std::{env, fmt, path::PathBuf};

use url::Url;

/// Environment variable name for the relay account identifier.
pub const ACCOUNT_ID_ENV: &str = "NEAR_ACCOUNT_ID";
/// Environment variable name for the relay signing key.
pub const PRIVATE_KEY_ENV: &str = "NEAR_PRIVATE_KEY";
/// Environment variable name for the JSON-RPC endpoint URL.
pub const RPC_URL_ENV: &str = "NEAR_RPC_URL";
/// Environment variable name for the shared caller secret.
pub const API_SECRET_ENV: &str = "API_SECRET";
/// Environment variable name for the server bind address.
pub const HOST_ENV: &str = "HOST";
/// Environment variable name for the server bind port.
pub const PORT_ENV: &str = "PORT";
/// Environment variable name for the stdout log format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";
/// Environment variable name for the informational log file path.
pub const LOG_FILE_ENV: &str = "LOG_FILE";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 4000;
const DEFAULT_LOG_FILE: &str = "info.log";

/// Stdout log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Process-wide configuration, loaded once at startup.
pub struct Config {
    /// Relay account identifier (e.g. `relay.near`).
    pub account_id: String,
    /// Signing key in `ed25519:<base58>` encoding. Never logged.
    pub private_key: String,
    /// NEAR JSON-RPC endpoint.
    pub rpc_url: Url,
    /// Shared secret callers must present. Never logged.
    pub api_secret: String,
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Stdout log format.
    pub log_format: LogFormat,
    /// Informational log file path.
    pub log_file: PathBuf,
}

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing environment variable `{0}`")]
    MissingVar(&'static str),

    #[error("invalid value for `{0}`: {1}")]
    InvalidVar(&'static str, String),
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let account_id = require(ACCOUNT_ID_ENV)?;
        let private_key = require(PRIVATE_KEY_ENV)?;
        let api_secret = require(API_SECRET_ENV)?;

        let rpc_url = require(RPC_URL_ENV)?
            .parse::<Url>()
            .map_err(|e| ConfigError::InvalidVar(RPC_URL_ENV, e.to_string()))?;

        let host = env::var(HOST_ENV).unwrap_or_else(|_| DEFAULT_HOST.to_string());

        let port = match env::var(PORT_ENV) {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|e| ConfigError::InvalidVar(PORT_ENV, e.to_string()))?,
            Err(_) => DEFAULT_PORT,
        };

        let log_format = match env::var(LOG_FORMAT_ENV) {
            Ok(raw) if raw.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        let log_file = env::var(LOG_FILE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_LOG_FILE));

        Ok(Self {
            account_id,
            private_key,
            rpc_url,
            api_secret,
            host,
            port,
            log_format,
            log_file,
        })
    }
}

// Key material must stay out of logs and error reports.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("account_id", &self.account_id)
            .field("private_key", &"<redacted>")
            .field("rpc_url", &self.rpc_url.as_str())
            .field("api_secret", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("log_format", &self.log_format)
            .field("log_file", &self.log_file)
            .finish()
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn set_required_vars() {
        env::set_var(ACCOUNT_ID_ENV, "relay.near");
        env::set_var(PRIVATE_KEY_ENV, "ed25519:abc");
        env::set_var(RPC_URL_ENV, "https://rpc.testnet.near.org");
        env::set_var(API_SECRET_ENV, "secret");
    }

    fn clear_all_vars() {
        for name in [
            ACCOUNT_ID_ENV,
            PRIVATE_KEY_ENV,
            RPC_URL_ENV,
            API_SECRET_ENV,
            HOST_ENV,
            PORT_ENV,
            LOG_FORMAT_ENV,
            LOG_FILE_ENV,
        ] {
            env::remove_var(name);
        }
    }

    #[test]
    #[serial]
    fn loads_with_defaults() {
        clear_all_vars();
        set_required_vars();

        let config = Config::from_env().expect("config should load");
        assert_eq!(config.account_id, "relay.near");
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.log_file, PathBuf::from(DEFAULT_LOG_FILE));
    }

    #[test]
    #[serial]
    fn fails_on_each_missing_credential() {
        for missing in [ACCOUNT_ID_ENV, PRIVATE_KEY_ENV, RPC_URL_ENV, API_SECRET_ENV] {
            clear_all_vars();
            set_required_vars();
            env::remove_var(missing);

            let err = Config::from_env().expect_err("load should fail");
            assert!(matches!(err, ConfigError::MissingVar(name) if name == missing));
        }
    }

    #[test]
    #[serial]
    fn rejects_empty_credential() {
        clear_all_vars();
        set_required_vars();
        env::set_var(API_SECRET_ENV, "");

        let err = Config::from_env().expect_err("load should fail");
        assert!(matches!(err, ConfigError::MissingVar(API_SECRET_ENV)));
    }

    #[test]
    #[serial]
    fn rejects_invalid_port_and_url() {
        clear_all_vars();
        set_required_vars();
        env::set_var(PORT_ENV, "not-a-port");
        let err = Config::from_env().expect_err("load should fail");
        assert!(matches!(err, ConfigError::InvalidVar(PORT_ENV, _)));

        clear_all_vars();
        set_required_vars();
        env::set_var(RPC_URL_ENV, "not a url");
        let err = Config::from_env().expect_err("load should fail");
        assert!(matches!(err, ConfigError::InvalidVar(RPC_URL_ENV, _)));
    }

    #[test]
    #[serial]
    fn overrides_apply() {
        clear_all_vars();
        set_required_vars();
        env::set_var(HOST_ENV, "127.0.0.1");
        env::set_var(PORT_ENV, "8081");
        env::set_var(LOG_FORMAT_ENV, "JSON");
        env::set_var(LOG_FILE_ENV, "/tmp/relay.log");

        let config = Config::from_env().expect("config should load");
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8081);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.log_file, PathBuf::from("/tmp/relay.log"));
    }

    #[test]
    #[serial]
    fn debug_redacts_key_material() {
        clear_all_vars();
        set_required_vars();
        env::set_var(PRIVATE_KEY_ENV, "ed25519:5JueXZhE");
        env::set_var(API_SECRET_ENV, "hunter2");

        let config = Config::from_env().expect("config should load");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("5JueXZhE"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}

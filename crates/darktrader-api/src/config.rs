//! # Service Configuration
//!
//! [`AppConfig`] is read from environment variables at startup:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `HOST` | `0.0.0.0` | Bind address |
//! | `PORT` | `8080` | Bind port |
//! | `LOG_FORMAT` | `pretty` | `pretty` or `json` log output |
//! | `DARKTRADER_METRICS_ENABLED` | `true` | Serve `/metrics` and record request metrics |
//! | `BODY_LIMIT_BYTES` | `65536` | Maximum accepted request body size |
//!
//! Log verbosity itself is governed by `RUST_LOG` through
//! `tracing_subscriber::EnvFilter`.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Errors raised while reading configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set but could not be parsed.
    #[error("invalid value for {var}: \"{value}\" ({reason})")]
    InvalidValue {
        /// Environment variable name.
        var: &'static str,
        /// The rejected value.
        value: String,
        /// What was expected instead.
        reason: String,
    },
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable, multi-field lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Address to bind the HTTP listener to.
    pub host: IpAddr,
    /// Port to bind the HTTP listener to.
    pub port: u16,
    /// Log output format.
    pub log_format: LogFormat,
    /// Whether Prometheus metrics are recorded and served.
    pub metrics_enabled: bool,
    /// Maximum request body size in bytes.
    pub body_limit_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            log_format: LogFormat::Pretty,
            metrics_enabled: true,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's value
    /// if it is set. Unset variables take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = match lookup("HOST") {
            Some(v) => v.trim().parse::<IpAddr>().map_err(|_| ConfigError::InvalidValue {
                var: "HOST",
                value: v.clone(),
                reason: "expected an IP address".to_string(),
            })?,
            None => defaults.host,
        };

        let port = match lookup("PORT") {
            Some(v) => v.trim().parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                var: "PORT",
                value: v.clone(),
                reason: "expected an integer between 0 and 65535".to_string(),
            })?,
            None => defaults.port,
        };

        let log_format = match lookup("LOG_FORMAT") {
            Some(v) => match v.trim().to_ascii_lowercase().as_str() {
                "pretty" => LogFormat::Pretty,
                "json" => LogFormat::Json,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: "LOG_FORMAT",
                        value: v,
                        reason: "expected \"pretty\" or \"json\"".to_string(),
                    })
                }
            },
            None => defaults.log_format,
        };

        // Anything other than "false" leaves metrics on.
        let metrics_enabled = lookup("DARKTRADER_METRICS_ENABLED")
            .map(|v| v.trim().to_ascii_lowercase() != "false")
            .unwrap_or(defaults.metrics_enabled);

        let body_limit_bytes = match lookup("BODY_LIMIT_BYTES") {
            Some(v) => match v.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: "BODY_LIMIT_BYTES",
                        value: v,
                        reason: "expected a positive integer".to_string(),
                    })
                }
            },
            None => defaults.body_limit_bytes,
        };

        Ok(Self {
            host,
            port,
            log_format,
            metrics_enabled,
            body_limit_bytes,
        })
    }

    /// Socket address the server listens on.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

//! Configuration management for the PDF Header Remover server

use serde::Deserialize;
use std::env;
use std::str::FromStr;

use crate::document::MergeStrategy;
use crate::redact::{DEFAULT_BAND_MM, DEFAULT_MARGIN_MM};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub redaction: RedactionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Largest accepted request body
    pub max_upload_bytes: usize,
}

/// Defaults applied when a request omits the optional form fields
#[derive(Debug, Clone, Deserialize)]
pub struct RedactionConfig {
    pub band_mm: f64,
    pub margin_mm: f64,
    pub merge_strategy: MergeStrategy,
}

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_UPLOAD_MB: usize = 100;

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: DEFAULT_PORT,
                max_upload_bytes: DEFAULT_MAX_UPLOAD_MB * 1024 * 1024,
            },
            redaction: RedactionConfig {
                band_mm: DEFAULT_BAND_MM,
                margin_mm: DEFAULT_MARGIN_MM,
                merge_strategy: MergeStrategy::default(),
            },
        }
    }
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup
    ///
    /// Missing keys take their defaults; unparsable values are logged and
    /// replaced by the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let max_upload_mb = parse_or(&lookup, "MAX_UPLOAD_MB", DEFAULT_MAX_UPLOAD_MB);

        Config {
            server: ServerConfig {
                host: lookup("SERVER_HOST").unwrap_or(defaults.server.host),
                port: parse_or(&lookup, "SERVER_PORT", defaults.server.port),
                max_upload_bytes: max_upload_mb.saturating_mul(1024 * 1024),
            },
            redaction: RedactionConfig {
                band_mm: non_negative(
                    "DEFAULT_BAND_MM",
                    parse_or(&lookup, "DEFAULT_BAND_MM", defaults.redaction.band_mm),
                    defaults.redaction.band_mm,
                ),
                margin_mm: non_negative(
                    "DEFAULT_MARGIN_MM",
                    parse_or(&lookup, "DEFAULT_MARGIN_MM", defaults.redaction.margin_mm),
                    defaults.redaction.margin_mm,
                ),
                merge_strategy: parse_or(
                    &lookup,
                    "MERGE_STRATEGY",
                    defaults.redaction.merge_strategy,
                ),
            },
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            tracing::warn!("Invalid {}={:?}: {}, using default", key, raw, e);
            default
        }),
    }
}

fn non_negative(key: &str, value: f64, default: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        tracing::warn!("{} must be a non-negative number, got {}, using default", key, value);
        default
    }
}

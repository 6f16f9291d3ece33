//! Service configuration from environment variables.

use std::path::PathBuf;

use chrono::NaiveDate;
use refbook_types::DATE_FORMAT;

const DEFAULT_DATA_PATH: &str = "./data";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;

/// Runtime configuration for the refbook server.
///
/// | Variable | Default |
/// |---|---|
/// | `REFBOOK_DATA_PATH` | `./data` |
/// | `REFBOOK_HOST` | `0.0.0.0` |
/// | `REFBOOK_PORT` | `8000` |
/// | `REFBOOK_SKIP_INVALID_ROWS` | `false` |
/// | `REFBOOK_TODAY` | unset (system clock) |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Directory holding the refbook data files.
    pub data_path: PathBuf,
    /// Listen host.
    pub host: String,
    /// Listen port.
    pub port: u16,
    /// Skip malformed data rows instead of refusing to start.
    pub skip_invalid_rows: bool,
    /// Pins "today" for current-version resolution.
    pub fixed_today: Option<NaiveDate>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            skip_invalid_rows: false,
            fixed_today: None,
        }
    }
}

impl ServiceConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through a variable lookup function.
    ///
    /// Unparseable values fall back to their defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = match lookup("REFBOOK_PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!("Invalid REFBOOK_PORT '{}', using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => defaults.port,
        };

        let skip_invalid_rows = match lookup("REFBOOK_SKIP_INVALID_ROWS") {
            Some(raw) => parse_flag(&raw).unwrap_or_else(|| {
                tracing::warn!("Invalid REFBOOK_SKIP_INVALID_ROWS '{}', using false", raw);
                false
            }),
            None => defaults.skip_invalid_rows,
        };

        let fixed_today = lookup("REFBOOK_TODAY").and_then(|raw| {
            NaiveDate::parse_from_str(&raw, DATE_FORMAT)
                .map_err(|_| tracing::warn!("Invalid REFBOOK_TODAY '{}', using system clock", raw))
                .ok()
        });

        Self {
            data_path: lookup("REFBOOK_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            host: lookup("REFBOOK_HOST").unwrap_or(defaults.host),
            port,
            skip_invalid_rows,
            fixed_today,
        }
    }

    /// Returns the `host:port` listen address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

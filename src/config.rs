//! Board configuration.
//!
//! Values come from defaults overridden by environment variables:
//!
//! | Variable | Field |
//! |---|---|
//! | `TASKBOARD_DATA_DIR` | [`BoardConfig::data_dir`] |
//! | `TASKBOARD_SNAPSHOT_KEY` | [`BoardConfig::snapshot_key`] |
//! | `TASKBOARD_SUGGESTION_LIMIT` | [`BoardConfig::suggestion_limit`] |
//! | `TASKBOARD_REQUEST_TIMEOUT_SECS` | [`BoardConfig::request_timeout`] |
//! | `OPENWEATHER_API_KEY` | [`BoardConfig::api_key`] |
//! | `OPENWEATHER_BASE_URL` | [`BoardConfig::weather_base_url`] |
//! | `OPENWEATHER_GEO_URL` | [`BoardConfig::geocoding_base_url`] |

use crate::task::services::DEFAULT_SNAPSHOT_KEY;
use camino::Utf8PathBuf;
use std::num::{IntErrorKind, ParseIntError};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Default current-weather endpoint.
pub const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Default direct-geocoding endpoint.
pub const DEFAULT_GEOCODING_URL: &str = "https://api.openweathermap.org/geo/1.0/direct";

const DEFAULT_DATA_DIR: &str = ".taskboard";
const DEFAULT_SUGGESTION_LIMIT: u8 = 5;
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors returned while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set to a value that cannot be used.
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        /// Variable name.
        key: &'static str,
        /// Rejected value.
        value: String,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

/// Runtime configuration for the board and its lookups.
///
/// # Examples
///
/// ```
/// use taskboard::config::BoardConfig;
///
/// let config = BoardConfig::default();
/// assert_eq!(config.snapshot_key, "tasks");
/// assert_eq!(config.suggestion_limit, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    /// Directory holding the durable snapshot.
    pub data_dir: Utf8PathBuf,
    /// Storage key of the snapshot.
    pub snapshot_key: String,
    /// Current-weather endpoint.
    pub weather_base_url: String,
    /// Direct-geocoding endpoint.
    pub geocoding_base_url: String,
    /// Weather service API key.
    pub api_key: Option<String>,
    /// Maximum number of place suggestions requested.
    pub suggestion_limit: u8,
    /// Per-request timeout for lookups.
    pub request_timeout: Duration,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            data_dir: Utf8PathBuf::from(DEFAULT_DATA_DIR),
            snapshot_key: DEFAULT_SNAPSHOT_KEY.to_owned(),
            weather_base_url: DEFAULT_WEATHER_URL.to_owned(),
            geocoding_base_url: DEFAULT_GEOCODING_URL.to_owned(),
            api_key: None,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl BoardConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a numeric variable does not
    /// parse or is zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a numeric variable does not
    /// parse or is zero.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(dir) = read("TASKBOARD_DATA_DIR") {
            config.data_dir = Utf8PathBuf::from(dir);
        }
        if let Some(key) = read("TASKBOARD_SNAPSHOT_KEY") {
            config.snapshot_key = key.trim().to_owned();
        }
        if let Some(url) = read("OPENWEATHER_BASE_URL") {
            config.weather_base_url = url.trim().to_owned();
        }
        if let Some(url) = read("OPENWEATHER_GEO_URL") {
            config.geocoding_base_url = url.trim().to_owned();
        }
        config.api_key = read("OPENWEATHER_API_KEY").map(|key| key.trim().to_owned());
        if let Some(raw) = read("TASKBOARD_SUGGESTION_LIMIT") {
            config.suggestion_limit = parse_positive("TASKBOARD_SUGGESTION_LIMIT", &raw)?;
        }
        if let Some(raw) = read("TASKBOARD_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = parse_positive("TASKBOARD_REQUEST_TIMEOUT_SECS", &raw)?;
            config.request_timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}

fn parse_positive<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr<Err = ParseIntError> + PartialEq + Default,
{
    let invalid = |reason| ConfigError::InvalidValue {
        key,
        value: raw.to_owned(),
        reason,
    };
    let parsed: T = raw.trim().parse().map_err(|err: ParseIntError| {
        invalid(match err.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => "out of range",
            _ => "not a number",
        })
    })?;
    if parsed == T::default() {
        return Err(invalid("must be positive"));
    }
    Ok(parsed)
}

//! Current-conditions readings and the outcome stored on a task.

use serde::{Deserialize, Serialize};

/// Message recorded when a failed lookup carries no service message.
pub const DEFAULT_WEATHER_ERROR: &str = "Failed to fetch weather data";

/// Current weather conditions at a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReading {
    /// Human-readable conditions, e.g. "light rain".
    pub description: String,
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: u8,
    /// Wind speed in metres per second.
    pub wind_speed: f64,
}

/// Result of the last weather lookup for a task.
///
/// Serialises as either the reading itself or `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WeatherOutcome {
    /// The lookup failed.
    Failed {
        /// Failure message.
        error: String,
    },
    /// The lookup succeeded.
    Reading(WeatherReading),
}

impl WeatherOutcome {
    /// Creates an error marker.
    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed {
            error: error.into(),
        }
    }

    /// Returns the reading when the lookup succeeded.
    #[must_use]
    pub const fn reading(&self) -> Option<&WeatherReading> {
        match self {
            Self::Reading(reading) => Some(reading),
            Self::Failed { .. } => None,
        }
    }

    /// Returns the failure message when the lookup failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { error } => Some(error),
            Self::Reading(_) => None,
        }
    }

    /// Returns whether the outcome is an error marker.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl From<WeatherReading> for WeatherOutcome {
    fn from(reading: WeatherReading) -> Self {
        Self::Reading(reading)
    }
}

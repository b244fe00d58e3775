use std::fmt;

use thiserror::Error;

/// The remote feed a fetch error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataSource {
    Geocode,
    Weather,
    Solar,
    Icon,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Geocode => "geocode",
            DataSource::Weather => "weather",
            DataSource::Solar => "solar",
            DataSource::Icon => "icon",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum WxError {
    #[error("{origin} request failed with status {status}")]
    Status { origin: DataSource, status: u16 },

    #[error("{origin} request failed: {source}")]
    Network {
        origin: DataSource,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to decode {origin} response: {source}")]
    Decode {
        origin: DataSource,
        #[source]
        source: serde_json::Error,
    },

    #[error("{origin} response is missing `{field}`")]
    MissingField {
        origin: DataSource,
        field: &'static str,
    },

    #[error("forecast contains {got} days, expected at least {expected}")]
    IncompleteForecast { expected: usize, got: usize },

    #[error("malformed solar XML: {0}")]
    SolarXml(#[from] roxmltree::Error),

    #[error("solar document is missing <{0}>")]
    SolarElement(&'static str),

    #[error("location could not be resolved")]
    LocationUnavailable,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WxError {
    /// The feed this error belongs to, if any.
    pub fn origin(&self) -> Option<DataSource> {
        match self {
            Self::Status { origin, .. }
            | Self::Network { origin, .. }
            | Self::Decode { origin, .. }
            | Self::MissingField { origin, .. } => Some(*origin),
            Self::IncompleteForecast { .. } | Self::LocationUnavailable => {
                Some(DataSource::Weather)
            }
            Self::SolarXml(_) | Self::SolarElement(_) => Some(DataSource::Solar),
            Self::Config(_) | Self::Io(_) => None,
        }
    }

    /// Transport-level failure: a non-200 status or no response at all.
    /// Both are handled the same way by callers.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::Status { .. } | Self::Network { .. })
    }

    /// Short warning text for display next to a stale panel.
    pub fn user_message(&self) -> String {
        match self {
            Self::SolarXml(_) | Self::SolarElement(_) => {
                "Failed to parse solar weather data.".to_string()
            }
            Self::LocationUnavailable => {
                "Weather not updated: location lookup failed.".to_string()
            }
            Self::Config(msg) => format!("Configuration problem: {msg}"),
            Self::Io(_) => "Local file error.".to_string(),
            other => match other.origin() {
                Some(DataSource::Geocode) => "Failed to get geocode data.".to_string(),
                Some(DataSource::Weather) => "Failed to get weather data.".to_string(),
                Some(DataSource::Solar) => "Failed to get solar weather data.".to_string(),
                Some(DataSource::Icon) => "Failed to get weather icon.".to_string(),
                None => other.to_string(),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, WxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_are_fetch_failures() {
        let err = WxError::Status { origin: DataSource::Solar, status: 503 };
        assert!(err.is_fetch_failure());
        assert_eq!(err.origin(), Some(DataSource::Solar));
        assert_eq!(err.to_string(), "solar request failed with status 503");
    }

    #[test]
    fn user_messages_name_the_failed_feed() {
        let err = WxError::Status { origin: DataSource::Geocode, status: 404 };
        assert_eq!(err.user_message(), "Failed to get geocode data.");

        let err = WxError::IncompleteForecast { expected: 5, got: 3 };
        assert_eq!(err.user_message(), "Failed to get weather data.");
        assert!(!err.is_fetch_failure());

        let err = WxError::SolarElement("solardata");
        assert_eq!(err.user_message(), "Failed to parse solar weather data.");
    }
}

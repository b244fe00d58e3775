use crate::{
    Settings, UnitSystem,
    error::Result,
    payload::{GeoPlace, OneCall},
    provider::openweather::OpenWeatherClient,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod hamqsl;
pub mod openweather;

/// Geocoding plus current/forecast/alert data.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn geocode(&self, zip_code: &str) -> Result<GeoPlace>;

    async fn one_call(&self, lat: f64, lon: f64, units: UnitSystem) -> Result<OneCall>;
}

/// Raw solar/propagation document.
#[async_trait]
pub trait SolarProvider: Send + Sync + Debug {
    async fn fetch_solar(&self) -> Result<Vec<u8>>;
}

/// Construct the weather provider from the current settings.
pub fn provider_from_settings(settings: &Settings) -> Box<dyn WeatherProvider> {
    if settings.api_key.is_empty() {
        tracing::warn!("no API key configured, weather requests will be rejected");
    }
    Box::new(OpenWeatherClient::new(settings.api_key.clone()))
}

/// Keep error bodies short enough for a log line.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

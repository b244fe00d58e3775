//! Raw OpenWeather response shapes, decoded straight from JSON.
//!
//! Numeric fields the provider sometimes omits (gusts, visibility) default to zero.

use serde::Deserialize;

/// `geo/1.0/zip` response.
#[derive(Debug, Clone, Deserialize)]
pub struct GeoPlace {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub country: String,
}

/// `data/3.0/onecall` response with minutely/hourly excluded.
#[derive(Debug, Clone, Deserialize)]
pub struct OneCall {
    pub current: RawCurrent,
    pub daily: Vec<RawDaily>,
    #[serde(default)]
    pub alerts: Vec<RawAlert>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCurrent {
    pub temp: f64,
    pub feels_like: f64,
    pub pressure: f64,
    pub humidity: f64,
    pub dew_point: f64,
    pub clouds: f64,
    pub visibility: f64,
    pub wind_speed: f64,
    pub wind_gust: f64,
    pub wind_deg: f64,
    pub sunrise: i64,
    pub sunset: i64,
    pub weather: Vec<RawCondition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCondition {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawDaily {
    pub dt: i64,
    pub temp: RawDailyTemp,
    pub weather: Vec<RawCondition>,
    /// Probability of precipitation, 0.0..=1.0.
    #[serde(default)]
    pub pop: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawDailyTemp {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawAlert {
    pub event: Option<String>,
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub description: Option<String>,
}

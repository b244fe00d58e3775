use serde::{Deserialize, Serialize};

/// Number of forecast days shown.
pub const FORECAST_DAYS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub state_name: Option<String>,
    pub state_code: Option<String>,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// "New York (NY)" for resolved US states, otherwise the raw country code.
    pub fn region_label(&self) -> String {
        match (&self.state_name, &self.state_code) {
            (Some(name), Some(code)) if !name.is_empty() => format!("{name} ({code})"),
            (Some(name), None) if !name.is_empty() => name.clone(),
            _ => self.country.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub dew_point: f64,
    pub pressure: f64,
    pub wind_speed: f64,
    pub wind_gust: f64,
    pub wind_direction: f64,
    pub cloud_cover: f64,
    pub visibility_m: f64,
    pub sunrise_unix: i64,
    pub sunset_unix: i64,
    pub description: String,
    pub icon_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub weekday_name: String,
    pub temp_max: f64,
    pub temp_min: f64,
    pub description: String,
    pub icon_id: String,
    pub precipitation_probability_pct: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub event_name: String,
    pub start_unix: i64,
    pub end_unix: i64,
    pub description: String,
}

/// Everything the weather endpoint returns for one refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub forecast: [ForecastDay; FORECAST_DAYS],
    pub alerts: Vec<Alert>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Day,
    Night,
}

impl TimeOfDay {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Day => "day",
            TimeOfDay::Night => "night",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "day" => Some(TimeOfDay::Day),
            "night" => Some(TimeOfDay::Night),
            _ => None,
        }
    }
}

/// HF band quality. Unknown labels are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BandQuality {
    Excellent,
    Good,
    Poor,
    Other(String),
}

impl BandQuality {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Excellent" => BandQuality::Excellent,
            "Good" => BandQuality::Good,
            "Poor" => BandQuality::Poor,
            other => BandQuality::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            BandQuality::Excellent => "Excellent",
            BandQuality::Good => "Good",
            BandQuality::Poor => "Poor",
            BandQuality::Other(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandCondition {
    pub band_name: String,
    pub time_of_day: TimeOfDay,
    pub quality: BandQuality,
}

/// Solar indices are passed through as the feed prints them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolarReport {
    pub solar_flux: String,
    pub sunspots: String,
    pub a_index: String,
    pub k_index: String,
    pub geomagnetic_field: String,
    pub signal_to_noise: String,
    pub band_conditions: Vec<BandCondition>,
}

impl SolarReport {
    /// Bands for one half of the day, in document order.
    pub fn bands(&self, time: TimeOfDay) -> impl Iterator<Item = &BandCondition> {
        self.band_conditions.iter().filter(move |b| b.time_of_day == time)
    }
}

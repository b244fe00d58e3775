//! Display-ready text for the normalized records.
//!
//! Color is applied through a [`Painter`] so the same labels can be rendered as
//! plain text or terminal escapes by the front end.

use chrono::{Local, TimeZone};

use crate::config::UnitSystem;
use crate::model::{
    Alert, BandQuality, CurrentConditions, ForecastDay, Location, SolarReport, TimeOfDay,
};
use crate::normalize::{CLOCK_12H, DATE_TIME_24H, format_unix_in, visibility_km};

pub const ICON_BASE_URL: &str = "http://openweathermap.org/img/wn/";

/// Wind values are shown in the provider's raw unit label whatever the unit system.
pub const WIND_UNIT: &str = "m/s";

pub const SOLAR_CREDIT: &str =
    "Credit: Paul N0NBH and HamQSL.com for providing the solar weather info";

pub const NO_ALERTS: &str = "No weather alerts available.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Blue,
    Green,
    Red,
}

pub trait Painter {
    fn paint(&self, text: &str, color: Color) -> String;
}

/// Leaves text untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainPainter;

impl Painter for PlainPainter {
    fn paint(&self, text: &str, _color: Color) -> String {
        text.to_string()
    }
}

pub fn icon_url(icon_id: &str) -> String {
    icon_url_with_base(ICON_BASE_URL, icon_id)
}

pub fn icon_url_with_base(base: &str, icon_id: &str) -> String {
    format!("{base}{icon_id}@2x.png")
}

pub fn location_header(location: &Location) -> String {
    format!("Weather Information for {}, {}", location.city, location.region_label())
}

pub fn quality_color(quality: &BandQuality) -> Option<Color> {
    match quality {
        BandQuality::Excellent => Some(Color::Blue),
        BandQuality::Good => Some(Color::Green),
        BandQuality::Poor => Some(Color::Red),
        BandQuality::Other(_) => None,
    }
}

/// Known qualities are painted; anything else comes back unchanged.
pub fn colored_quality(quality: &BandQuality, painter: &dyn Painter) -> String {
    match quality_color(quality) {
        Some(color) => painter.paint(quality.label(), color),
        None => quality.label().to_string(),
    }
}

/// Label/value rows for the current-conditions panel, times in `tz`.
pub fn current_rows_in<Tz: TimeZone>(
    current: &CurrentConditions,
    units: UnitSystem,
    tz: &Tz,
) -> Vec<(&'static str, String)>
where
    Tz::Offset: std::fmt::Display,
{
    let deg = units.degree_suffix();
    vec![
        ("Temperature", format!("{}{deg}", current.temperature)),
        ("Feels Like", format!("{}{deg}", current.feels_like)),
        ("Humidity", format!("{}%", current.humidity)),
        ("Dew Point", format!("{}{deg}", current.dew_point)),
        ("Pressure", format!("{} hPa", current.pressure)),
        (
            "Wind Speed",
            format!("{} {WIND_UNIT} @ {}°", current.wind_speed, current.wind_direction),
        ),
        ("Wind Gusts", format!("{} {WIND_UNIT}", current.wind_gust)),
        ("Weather", current.description.clone()),
        ("Cloud Cover", format!("{}%", current.cloud_cover)),
        ("Visibility", format!("{:.1} km", visibility_km(current.visibility_m))),
        ("Sunrise", format_unix_in(current.sunrise_unix, tz, CLOCK_12H)),
        ("Sunset", format_unix_in(current.sunset_unix, tz, CLOCK_12H)),
    ]
}

pub fn current_rows(current: &CurrentConditions, units: UnitSystem) -> Vec<(&'static str, String)> {
    current_rows_in(current, units, &Local)
}

/// High in red, low in blue.
pub fn forecast_temperatures(day: &ForecastDay, units: UnitSystem, painter: &dyn Painter) -> String {
    let deg = units.degree_suffix();
    format!(
        "{} / {}",
        painter.paint(&format!("{}{deg}", day.temp_max), Color::Red),
        painter.paint(&format!("{}{deg}", day.temp_min), Color::Blue),
    )
}

/// "Light Rain - 42%".
pub fn forecast_summary(day: &ForecastDay) -> String {
    format!("{} - {}%", title_case(&day.description), day.precipitation_probability_pct)
}

pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

pub fn alerts_text_in<Tz: TimeZone>(alerts: &[Alert], tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    if alerts.is_empty() {
        return NO_ALERTS.to_string();
    }

    alerts
        .iter()
        .map(|alert| {
            format!(
                "Event: {}\nStart: {}\nEnd: {}\n\n{}\n",
                alert.event_name,
                format_unix_in(alert.start_unix, tz, DATE_TIME_24H),
                format_unix_in(alert.end_unix, tz, DATE_TIME_24H),
                alert.description,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn alerts_text(alerts: &[Alert]) -> String {
    alerts_text_in(alerts, &Local)
}

/// Index column of the solar panel, dotted leaders aligned.
pub fn solar_indices(report: &SolarReport) -> String {
    [
        ("A Index:", &report.a_index),
        ("K Index:", &report.k_index),
        ("Solar Flux:", &report.solar_flux),
        ("Sunspots:", &report.sunspots),
        ("Signal to Noise:", &report.signal_to_noise),
        ("Geomagnetic Field:", &report.geomagnetic_field),
    ]
    .iter()
    .map(|(label, value)| format!("{:.<21}{value}", format!("{label} ")))
    .collect::<Vec<_>>()
    .join("\n")
}

/// One line per band for `time`, e.g. `80m-40m: Good`.
pub fn band_block(report: &SolarReport, time: TimeOfDay, painter: &dyn Painter) -> String {
    report
        .bands(time)
        .map(|b| format!("{}: {}", b.band_name, colored_quality(&b.quality, painter)))
        .collect::<Vec<_>>()
        .join("\n")
}

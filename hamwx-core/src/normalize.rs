//! Turns raw provider payloads into the flat records in [`crate::model`].

use chrono::{Local, TimeZone};

use crate::error::{DataSource, Result, WxError};
use crate::model::{
    Alert, BandCondition, BandQuality, CurrentConditions, FORECAST_DAYS, ForecastDay,
    SolarReport, TimeOfDay, WeatherReport,
};
use crate::payload::{OneCall, RawAlert, RawCondition, RawCurrent, RawDaily};

/// Format a UNIX timestamp in `tz`. Out-of-range timestamps render as an empty string.
pub fn format_unix_in<Tz: TimeZone>(unix: i64, tz: &Tz, pattern: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match tz.timestamp_opt(unix, 0).earliest() {
        Some(dt) => dt.format(pattern).to_string(),
        None => String::new(),
    }
}

/// `07:05 AM`, used for sunrise and sunset.
pub const CLOCK_12H: &str = "%I:%M %p";

/// `2024-10-06 18:30`, used for alert windows.
pub const DATE_TIME_24H: &str = "%Y-%m-%d %H:%M";

pub fn weekday_name_in<Tz: TimeZone>(unix: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format_unix_in(unix, tz, "%A")
}

/// Meters to kilometers.
pub fn visibility_km(meters: f64) -> f64 {
    meters / 1000.0
}

/// Fraction to whole percent, truncated toward zero.
pub fn pop_percent(pop: f64) -> u8 {
    (pop * 100.0).clamp(0.0, 100.0) as u8
}

fn primary_condition<'a>(
    conditions: &'a [RawCondition],
    field: &'static str,
) -> Result<&'a RawCondition> {
    conditions
        .first()
        .ok_or(WxError::MissingField { origin: DataSource::Weather, field })
}

pub fn current_conditions(raw: &RawCurrent) -> Result<CurrentConditions> {
    let condition = primary_condition(&raw.weather, "current.weather")?;

    Ok(CurrentConditions {
        temperature: raw.temp,
        feels_like: raw.feels_like,
        humidity: raw.humidity,
        dew_point: raw.dew_point,
        pressure: raw.pressure,
        wind_speed: raw.wind_speed,
        wind_gust: raw.wind_gust,
        wind_direction: raw.wind_deg,
        cloud_cover: raw.clouds,
        visibility_m: raw.visibility,
        sunrise_unix: raw.sunrise,
        sunset_unix: raw.sunset,
        description: condition.description.clone(),
        icon_id: condition.icon.clone(),
    })
}

/// First [`FORECAST_DAYS`] daily entries, labelled with weekday names in `tz`.
pub fn forecast_days_in<Tz: TimeZone>(
    daily: &[RawDaily],
    tz: &Tz,
) -> Result<[ForecastDay; FORECAST_DAYS]>
where
    Tz::Offset: std::fmt::Display,
{
    if daily.len() < FORECAST_DAYS {
        return Err(WxError::IncompleteForecast { expected: FORECAST_DAYS, got: daily.len() });
    }

    let days = daily[..FORECAST_DAYS]
        .iter()
        .map(|day| {
            let condition = primary_condition(&day.weather, "daily.weather")?;
            Ok(ForecastDay {
                weekday_name: weekday_name_in(day.dt, tz),
                temp_max: day.temp.max,
                temp_min: day.temp.min,
                description: condition.description.clone(),
                icon_id: condition.icon.clone(),
                precipitation_probability_pct: pop_percent(day.pop),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    days.try_into().map_err(|v: Vec<ForecastDay>| WxError::IncompleteForecast {
        expected: FORECAST_DAYS,
        got: v.len(),
    })
}

pub fn alerts(raw: &[RawAlert]) -> Vec<Alert> {
    raw.iter()
        .map(|a| Alert {
            event_name: a.event.clone().unwrap_or_else(|| "N/A".to_string()),
            start_unix: a.start.unwrap_or(0),
            end_unix: a.end.unwrap_or(0),
            description: a.description.clone().unwrap_or_else(|| "No description".to_string()),
        })
        .collect()
}

pub fn weather_report_in<Tz: TimeZone>(payload: &OneCall, tz: &Tz) -> Result<WeatherReport>
where
    Tz::Offset: std::fmt::Display,
{
    Ok(WeatherReport {
        current: current_conditions(&payload.current)?,
        forecast: forecast_days_in(&payload.daily, tz)?,
        alerts: alerts(&payload.alerts),
    })
}

pub fn weather_report(payload: &OneCall) -> Result<WeatherReport> {
    weather_report_in(payload, &Local)
}

/// Parse the HamQSL `solarxml.php` document.
pub fn solar_report(xml: &[u8]) -> Result<SolarReport> {
    let text = String::from_utf8_lossy(xml);
    let doc = roxmltree::Document::parse(&text)?;

    let solardata = child(doc.root_element(), "solardata")
        .ok_or(WxError::SolarElement("solardata"))?;

    let field = |name: &'static str| -> Result<String> {
        child(solardata, name)
            .map(|n| n.text().unwrap_or_default().trim().to_string())
            .ok_or(WxError::SolarElement(name))
    };

    let conditions = child(solardata, "calculatedconditions")
        .ok_or(WxError::SolarElement("calculatedconditions"))?;

    let band_conditions = conditions
        .children()
        .filter(|n| n.has_tag_name("band"))
        .filter_map(|band| {
            let time_of_day = TimeOfDay::parse(band.attribute("time")?)?;
            Some(BandCondition {
                band_name: band.attribute("name").unwrap_or_default().to_string(),
                time_of_day,
                quality: BandQuality::from_label(band.text().unwrap_or_default().trim()),
            })
        })
        .collect();

    Ok(SolarReport {
        solar_flux: field("solarflux")?,
        sunspots: field("sunspots")?,
        a_index: field("aindex")?,
        k_index: field("kindex")?,
        geomagnetic_field: field("geomagfield")?,
        signal_to_noise: field("signalnoise")?,
        band_conditions,
    })
}

fn child<'a, 'input>(
    node: roxmltree::Node<'a, 'input>,
    name: &str,
) -> Option<roxmltree::Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(name))
}

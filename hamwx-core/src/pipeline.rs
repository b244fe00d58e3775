//! One refresh cycle and the last-known-good view built from it.

use crate::{
    Settings,
    error::{DataSource, Result, WxError},
    model::{Location, SolarReport, WeatherReport},
    normalize,
    provider::{SolarProvider, WeatherProvider},
    state::StateResolver,
};

/// Per-source outcome of [`refresh`]. A failure in one source never hides the others.
#[derive(Debug)]
pub struct Refresh {
    pub location: Result<Location>,
    pub weather: Result<WeatherReport>,
    pub solar: Result<SolarReport>,
}

impl Refresh {
    pub fn errors(&self) -> impl Iterator<Item = &WxError> {
        [
            self.location.as_ref().err(),
            self.weather.as_ref().err(),
            self.solar.as_ref().err(),
        ]
        .into_iter()
        .flatten()
    }
}

/// Resolve the configured postal code into a [`Location`].
pub async fn resolve_location<W>(
    settings: &Settings,
    weather: &W,
    states: &dyn StateResolver,
) -> Result<Location>
where
    W: WeatherProvider + ?Sized,
{
    let place = weather.geocode(&settings.zip_code).await?;

    let state = if place.country == "US" {
        states.resolve(&settings.zip_code)
    } else {
        None
    };

    Ok(Location {
        city: place.name,
        state_name: state.as_ref().map(|s| s.name.clone()),
        state_code: state.map(|s| s.code),
        country: place.country,
        latitude: place.lat,
        longitude: place.lon,
    })
}

pub async fn fetch_weather<W>(
    settings: &Settings,
    weather: &W,
    location: &Location,
) -> Result<WeatherReport>
where
    W: WeatherProvider + ?Sized,
{
    let payload = weather
        .one_call(location.latitude, location.longitude, settings.units)
        .await?;
    normalize::weather_report(&payload)
}

pub async fn fetch_solar<S>(solar: &S) -> Result<SolarReport>
where
    S: SolarProvider + ?Sized,
{
    let xml = solar.fetch_solar().await?;
    normalize::solar_report(&xml)
}

/// Fetch and normalize every source. The solar feed runs alongside the
/// geocode → weather chain.
pub async fn refresh<W, S>(
    settings: &Settings,
    weather: &W,
    solar: &S,
    states: &dyn StateResolver,
) -> Refresh
where
    W: WeatherProvider + ?Sized,
    S: SolarProvider + ?Sized,
{
    let location_and_weather = async {
        let location = resolve_location(settings, weather, states).await;
        let report = match &location {
            Ok(loc) => fetch_weather(settings, weather, loc).await,
            Err(_) => Err(WxError::LocationUnavailable),
        };
        (location, report)
    };

    let ((location, weather), solar) = tokio::join!(location_and_weather, fetch_solar(solar));

    let refresh = Refresh { location, weather, solar };
    for err in refresh.errors() {
        let kind = if err.is_fetch_failure() { "fetch" } else { "data" };
        tracing::warn!(source = ?err.origin(), kind, error = %err, "refresh source failed");
    }
    refresh
}

/// A warning produced while applying a refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub source: Option<DataSource>,
    pub message: String,
}

/// Last successfully fetched record per source.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub location: Option<Location>,
    pub weather: Option<WeatherReport>,
    pub solar: Option<SolarReport>,
}

impl Dashboard {
    /// Replace each record whose fetch succeeded; keep the rest and report why.
    pub fn apply(&mut self, refresh: Refresh) -> Vec<Warning> {
        let mut warnings = Vec::new();

        replace_or_warn(&mut self.location, refresh.location, &mut warnings);
        replace_or_warn(&mut self.weather, refresh.weather, &mut warnings);
        replace_or_warn(&mut self.solar, refresh.solar, &mut warnings);

        warnings
    }
}

fn replace_or_warn<T>(slot: &mut Option<T>, result: Result<T>, warnings: &mut Vec<Warning>) {
    match result {
        Ok(value) => *slot = Some(value),
        Err(WxError::LocationUnavailable) => {
            // Already reported by the geocode failure.
        }
        Err(err) => warnings.push(Warning { source: err.origin(), message: err.user_message() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UnitSystem;
    use crate::payload::{GeoPlace, OneCall};
    use crate::state::GeoNamesStates;
    use async_trait::async_trait;

    #[derive(Debug)]
    struct FailingWeather;

    #[async_trait]
    impl WeatherProvider for FailingWeather {
        async fn geocode(&self, _zip_code: &str) -> Result<GeoPlace> {
            Err(WxError::Status { origin: DataSource::Geocode, status: 401 })
        }

        async fn one_call(&self, _lat: f64, _lon: f64, _units: UnitSystem) -> Result<OneCall> {
            unreachable!("weather must not be fetched without a location")
        }
    }

    #[derive(Debug)]
    struct StaticSolar(Result<&'static str>);

    #[async_trait]
    impl SolarProvider for StaticSolar {
        async fn fetch_solar(&self) -> Result<Vec<u8>> {
            match &self.0 {
                Ok(xml) => Ok(xml.as_bytes().to_vec()),
                Err(_) => Err(WxError::Status { origin: DataSource::Solar, status: 500 }),
            }
        }
    }

    const XML: &str = "<solar><solardata><solarflux>150</solarflux><aindex>5</aindex>\
        <kindex>1</kindex><sunspots>90</sunspots><geomagfield>QUIET</geomagfield>\
        <signalnoise>S0-S1</signalnoise><calculatedconditions>\
        <band name=\"80m-40m\" time=\"day\">Good</band></calculatedconditions></solardata></solar>";

    #[tokio::test]
    async fn geocode_failure_skips_weather_but_not_solar() {
        let refresh = refresh(
            &Settings::default(),
            &FailingWeather,
            &StaticSolar(Ok(XML)),
            &GeoNamesStates::empty(),
        )
        .await;

        assert!(matches!(refresh.location, Err(WxError::Status { status: 401, .. })));
        assert!(matches!(refresh.weather, Err(WxError::LocationUnavailable)));
        assert_eq!(refresh.solar.unwrap().solar_flux, "150");
    }

    #[tokio::test]
    async fn dashboard_keeps_previous_solar_on_failure() {
        let states = GeoNamesStates::empty();
        let mut dashboard = Dashboard::default();

        let first = refresh(&Settings::default(), &FailingWeather, &StaticSolar(Ok(XML)), &states)
            .await;
        dashboard.apply(first);
        let before = dashboard.solar.clone().expect("solar applied");

        let failing = StaticSolar(Err(WxError::LocationUnavailable));
        let second = refresh(&Settings::default(), &FailingWeather, &failing, &states).await;
        let warnings = dashboard.apply(second);

        assert_eq!(dashboard.solar, Some(before));
        assert!(warnings.contains(&Warning {
            source: Some(DataSource::Solar),
            message: "Failed to get solar weather data.".into(),
        }));
        assert!(warnings.contains(&Warning {
            source: Some(DataSource::Geocode),
            message: "Failed to get geocode data.".into(),
        }));
        assert_eq!(warnings.len(), 2);
    }

    #[tokio::test]
    async fn malformed_solar_xml_warns_and_keeps_previous_solar() {
        let states = GeoNamesStates::empty();
        let mut dashboard = Dashboard::default();

        dashboard.apply(
            refresh(&Settings::default(), &FailingWeather, &StaticSolar(Ok(XML)), &states).await,
        );
        let before = dashboard.solar.clone().expect("solar applied");

        let truncated = StaticSolar(Ok("<solar><solardata>"));
        let second = refresh(&Settings::default(), &FailingWeather, &truncated, &states).await;
        assert!(!second.solar.as_ref().unwrap_err().is_fetch_failure());
        let warnings = dashboard.apply(second);

        assert_eq!(dashboard.solar, Some(before));
        assert!(warnings.contains(&Warning {
            source: Some(DataSource::Solar),
            message: "Failed to parse solar weather data.".into(),
        }));
    }

    #[tokio::test]
    async fn errors_separate_transport_from_data_failures() {
        let refresh = refresh(
            &Settings::default(),
            &FailingWeather,
            &StaticSolar(Ok("<solar/>")),
            &GeoNamesStates::empty(),
        )
        .await;

        let fetch: Vec<_> = refresh
            .errors()
            .map(|e| (e.origin(), e.is_fetch_failure()))
            .collect();
        assert_eq!(
            fetch,
            [
                (Some(DataSource::Geocode), true),
                (Some(DataSource::Weather), false),
                (Some(DataSource::Solar), false),
            ]
        );
    }
}

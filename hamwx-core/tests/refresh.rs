//! End-to-end refresh against mock OpenWeather and HamQSL servers.

use hamwx_core::provider::{hamqsl::HamQslClient, openweather::OpenWeatherClient};
use hamwx_core::{
    Dashboard, DataSource, GeoNamesStates, Settings, TimeOfDay, UnitSystem, WxError, refresh,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const STATES: &str = "US\t94040\tMountain View\tCalifornia\tCA\tSanta Clara\t085\t\t\t37.3855\t-122.088\t4\n";

const SOLAR: &str = r#"<?xml version="1.0"?>
<solar>
  <solardata>
    <solarflux>180</solarflux>
    <aindex>12</aindex>
    <kindex>3</kindex>
    <sunspots>140</sunspots>
    <geomagfield>UNSETTLD</geomagfield>
    <signalnoise>S2-S3</signalnoise>
    <calculatedconditions>
      <band name="80m-40m" time="day">Fair</band>
      <band name="80m-40m" time="night">Good</band>
    </calculatedconditions>
  </solardata>
</solar>"#;

fn settings() -> Settings {
    Settings { zip_code: "94040".into(), units: UnitSystem::Imperial, api_key: "KEY".into() }
}

fn daily(days: usize) -> serde_json::Value {
    let start = 1_728_302_400_i64;
    (0..days)
        .map(|i| {
            serde_json::json!({
                "dt": start + i as i64 * 86_400,
                "temp": {"min": 55.0, "max": 72.5},
                "weather": [{"description": "clear sky", "icon": "01d"}],
                "pop": 0.42
            })
        })
        .collect()
}

async fn mount_geocode(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/geo/1.0/zip"))
        .and(query_param("zip", "94040,US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "zip": "94040",
            "name": "Mountain View",
            "lat": 37.3855,
            "lon": -122.088,
            "country": "US"
        })))
        .mount(server)
        .await;
}

async fn mount_one_call(server: &MockServer, days: usize) {
    Mock::given(method("GET"))
        .and(path("/data/3.0/onecall"))
        .and(query_param("units", "imperial"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "current": {
                "temp": 68.0,
                "feels_like": 67.1,
                "humidity": 55,
                "dew_point": 51.2,
                "pressure": 1016,
                "clouds": 0,
                "visibility": 10000,
                "wind_speed": 3.6,
                "wind_deg": 300,
                "sunrise": 1_728_310_000,
                "sunset": 1_728_352_000,
                "weather": [{"description": "clear sky", "icon": "01d"}]
            },
            "daily": daily(days),
            "alerts": [{
                "event": "Red Flag Warning",
                "start": 1_728_302_400,
                "end": 1_728_345_600,
                "description": "Critical fire weather conditions."
            }]
        })))
        .mount(server)
        .await;
}

async fn mount_solar(server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .and(path("/solarxml.php"))
        .respond_with(ResponseTemplate::new(status).set_body_string(SOLAR))
        .mount(server)
        .await;
}

#[tokio::test]
async fn full_refresh_populates_every_source() {
    let server = MockServer::start().await;
    mount_geocode(&server).await;
    mount_one_call(&server, 8).await;
    mount_solar(&server, 200).await;

    let weather = OpenWeatherClient::with_base_url("KEY".into(), &server.uri());
    let solar = HamQslClient::with_url(&format!("{}/solarxml.php", server.uri()));
    let states = GeoNamesStates::parse(STATES);

    let result = refresh(&settings(), &weather, &solar, &states).await;

    let location = result.location.expect("location");
    assert_eq!(location.city, "Mountain View");
    assert_eq!(location.country, "US");
    assert_eq!(location.state_code.as_deref(), Some("CA"));
    assert_eq!(location.region_label(), "California (CA)");

    let report = result.weather.expect("weather");
    assert_eq!(report.current.temperature, 68.0);
    assert_eq!(report.current.visibility_m, 10_000.0);
    assert_eq!(report.current.wind_gust, 0.0);
    assert_eq!(report.forecast.len(), 5);
    assert!(report.forecast.iter().all(|d| d.precipitation_probability_pct == 42));
    assert_eq!(report.alerts.len(), 1);
    assert_eq!(report.alerts[0].event_name, "Red Flag Warning");

    let solar = result.solar.expect("solar");
    assert_eq!(solar.k_index, "3");
    assert_eq!(solar.bands(TimeOfDay::Night).count(), 1);
}

#[tokio::test]
async fn short_forecast_is_reported_not_panicked() {
    let server = MockServer::start().await;
    mount_geocode(&server).await;
    mount_one_call(&server, 4).await;
    mount_solar(&server, 200).await;

    let weather = OpenWeatherClient::with_base_url("KEY".into(), &server.uri());
    let solar = HamQslClient::with_url(&format!("{}/solarxml.php", server.uri()));

    let result = refresh(&settings(), &weather, &solar, &GeoNamesStates::empty()).await;

    assert!(result.location.is_ok());
    assert!(matches!(result.weather, Err(WxError::IncompleteForecast { expected: 5, got: 4 })));
    assert!(result.solar.is_ok());
}

#[tokio::test]
async fn solar_outage_keeps_previous_solar_and_still_updates_weather() {
    let good = MockServer::start().await;
    mount_geocode(&good).await;
    mount_one_call(&good, 5).await;
    mount_solar(&good, 200).await;

    let weather = OpenWeatherClient::with_base_url("KEY".into(), &good.uri());
    let solar = HamQslClient::with_url(&format!("{}/solarxml.php", good.uri()));
    let states = GeoNamesStates::empty();

    let mut dashboard = Dashboard::default();
    let warnings = dashboard.apply(refresh(&settings(), &weather, &solar, &states).await);
    assert!(warnings.is_empty());
    let previous_solar = dashboard.solar.clone();

    let broken = MockServer::start().await;
    mount_solar(&broken, 503).await;
    let failing_solar = HamQslClient::with_url(&format!("{}/solarxml.php", broken.uri()));

    let warnings = dashboard.apply(refresh(&settings(), &weather, &failing_solar, &states).await);

    assert_eq!(dashboard.solar, previous_solar);
    assert!(dashboard.weather.is_some());
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].source, Some(DataSource::Solar));
    assert_eq!(warnings[0].message, "Failed to get solar weather data.");
}

#[tokio::test]
async fn non_us_location_shows_country() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo/1.0/zip"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "San Juan",
            "lat": 18.46,
            "lon": -66.1,
            "country": "PR"
        })))
        .mount(&server)
        .await;
    mount_one_call(&server, 5).await;
    mount_solar(&server, 200).await;

    let weather = OpenWeatherClient::with_base_url("KEY".into(), &server.uri());
    let solar = HamQslClient::with_url(&format!("{}/solarxml.php", server.uri()));
    let states = GeoNamesStates::parse(STATES);

    let result = refresh(&settings(), &weather, &solar, &states).await;
    let location = result.location.unwrap();

    assert_eq!(location.country, "PR");
    assert!(location.state_name.is_none());
    assert_eq!(location.region_label(), "PR");
}

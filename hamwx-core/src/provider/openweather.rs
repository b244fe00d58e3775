use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::{
    UnitSystem,
    display::icon_url_with_base,
    error::{DataSource, Result, WxError},
    payload::{GeoPlace, OneCall},
};

use super::{WeatherProvider, truncate_body};

pub const GEOCODE_URL: &str = "http://api.openweathermap.org/geo/1.0/zip";
pub const ONE_CALL_URL: &str = "https://api.openweathermap.org/data/3.0/onecall";

/// Geocoding is restricted to this country.
const GEOCODE_COUNTRY: &str = "US";

#[derive(Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    http: Client,
    geocode_url: String,
    one_call_url: String,
    icon_base_url: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
            geocode_url: GEOCODE_URL.to_string(),
            one_call_url: ONE_CALL_URL.to_string(),
            icon_base_url: crate::display::ICON_BASE_URL.to_string(),
        }
    }

    /// Point all requests at `base` (e.g. a mock server): `{base}/geo/1.0/zip`,
    /// `{base}/data/3.0/onecall` and `{base}/img/wn/`.
    pub fn with_base_url(api_key: String, base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            geocode_url: format!("{base}/geo/1.0/zip"),
            one_call_url: format!("{base}/data/3.0/onecall"),
            icon_base_url: format!("{base}/img/wn/"),
            ..Self::new(api_key)
        }
    }

    /// Download the `@2x` PNG for a condition icon.
    pub async fn fetch_icon(&self, icon_id: &str) -> Result<Vec<u8>> {
        let url = icon_url_with_base(&self.icon_base_url, icon_id);
        tracing::debug!(%url, "fetching icon");

        let res = self.http.get(&url).send().await.map_err(|source| WxError::Network {
            origin: DataSource::Icon,
            source,
        })?;
        let res = check_status(res, DataSource::Icon).await?;

        let bytes = res.bytes().await.map_err(|source| WxError::Network {
            origin: DataSource::Icon,
            source,
        })?;
        Ok(bytes.to_vec())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        origin: DataSource,
    ) -> Result<T> {
        let res = self
            .http
            .get(url)
            .query(query)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|source| WxError::Network { origin, source })?;
        let res = check_status(res, origin).await?;

        let body = res.text().await.map_err(|source| WxError::Network { origin, source })?;
        serde_json::from_str(&body).map_err(|source| WxError::Decode { origin, source })
    }
}

impl std::fmt::Debug for OpenWeatherClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherClient")
            .field("api_key", &"[REDACTED]")
            .field("geocode_url", &self.geocode_url)
            .field("one_call_url", &self.one_call_url)
            .finish()
    }
}

/// Anything but 200 is a failed fetch.
pub(crate) async fn check_status(res: Response, origin: DataSource) -> Result<Response> {
    let status = res.status();
    if status == reqwest::StatusCode::OK {
        return Ok(res);
    }

    let body = res.text().await.unwrap_or_default();
    tracing::warn!(%origin, %status, body = %truncate_body(&body), "request rejected");
    Err(WxError::Status { origin, status: status.as_u16() })
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn geocode(&self, zip_code: &str) -> Result<GeoPlace> {
        let zip = format!("{zip_code},{GEOCODE_COUNTRY}");
        tracing::debug!(%zip, "geocoding postal code");

        self.get_json(&self.geocode_url, &[("zip", zip.as_str())], DataSource::Geocode)
            .await
    }

    async fn one_call(&self, lat: f64, lon: f64, units: UnitSystem) -> Result<OneCall> {
        let lat = lat.to_string();
        let lon = lon.to_string();
        tracing::debug!(%lat, %lon, %units, "fetching one call weather");

        self.get_json(
            &self.one_call_url,
            &[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("units", units.as_str()),
                ("exclude", "minutely,hourly"),
            ],
            DataSource::Weather,
        )
        .await
    }
}

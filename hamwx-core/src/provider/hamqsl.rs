use async_trait::async_trait;
use reqwest::Client;

use crate::error::{DataSource, Result, WxError};

use super::{SolarProvider, openweather::check_status};

pub const SOLAR_XML_URL: &str = "https://www.hamqsl.com/solarxml.php";

/// N0NBH's solar-terrestrial feed on hamqsl.com.
#[derive(Debug, Clone)]
pub struct HamQslClient {
    http: Client,
    url: String,
}

impl Default for HamQslClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HamQslClient {
    pub fn new() -> Self {
        Self::with_url(SOLAR_XML_URL)
    }

    pub fn with_url(url: &str) -> Self {
        Self { http: Client::new(), url: url.to_string() }
    }
}

#[async_trait]
impl SolarProvider for HamQslClient {
    async fn fetch_solar(&self) -> Result<Vec<u8>> {
        tracing::debug!(url = %self.url, "fetching solar data");

        let res = self.http.get(&self.url).send().await.map_err(|source| WxError::Network {
            origin: DataSource::Solar,
            source,
        })?;
        let res = check_status(res, DataSource::Solar).await?;

        let bytes = res.bytes().await.map_err(|source| WxError::Network {
            origin: DataSource::Solar,
            source,
        })?;
        Ok(bytes.to_vec())
    }
}

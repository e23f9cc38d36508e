//! OpenWeather API client for zip code resolution.
//!
//! Uses the current-weather endpoint, which accepts a `zip={code},{country}`
//! query and returns the coordinates and UTC offset of the matching location
//! alongside the weather data this service ignores.

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use serde::Deserialize;

use zipdir_core::ResolvedLocation;

use super::{GeocodeError, Geocoder};
use crate::config::OpenWeatherConfig;

/// OpenWeather current-weather endpoint.
const BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Country suffix for zip queries. Zip codes are assumed to be US postal
/// codes throughout the service.
const COUNTRY: &str = "us";

/// OpenWeather API client.
#[derive(Clone)]
pub struct OpenWeatherClient {
    client: reqwest::Client,
    api_key: secrecy::SecretString,
}

impl OpenWeatherClient {
    /// Create a new OpenWeather API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &OpenWeatherConfig) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl Geocoder for OpenWeatherClient {
    async fn resolve(&self, zip_code: &str) -> Result<ResolvedLocation, GeocodeError> {
        let response = self
            .client
            .get(BASE_URL)
            .query(&[
                ("zip", format!("{zip_code},{COUNTRY}")),
                ("appid", self.api_key.expose_secret().to_owned()),
            ])
            .send()
            .await?;

        let status = response.status();

        // OpenWeather reports unknown zip codes with 404 and a
        // {"cod": "404", "message": "city not found"} body.
        if status == StatusCode::NOT_FOUND {
            return Err(GeocodeError::UnknownZip(zip_code.to_owned()));
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: WeatherResponse = response
            .json()
            .await
            .map_err(|e| GeocodeError::Parse(e.to_string()))?;

        Ok(ResolvedLocation::new(
            body.coord.lat,
            body.coord.lon,
            body.timezone,
        ))
    }
}

/// Subset of the current-weather response this service needs.
#[derive(Debug, Deserialize)]
struct WeatherResponse {
    coord: Coord,
    /// Shift in seconds from UTC.
    timezone: i32,
}

/// Coordinates of the resolved location.
#[derive(Debug, Deserialize)]
struct Coord {
    lat: f64,
    lon: f64,
}

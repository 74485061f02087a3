//! HTTP adapter for the OpenWeather current-weather and geocoding APIs.

use crate::config::BoardConfig;
use crate::task::domain::Location;
use crate::weather::{
    domain::{PlaceQuery, PlaceSuggestion, WeatherReading},
    ports::{LookupError, LookupResult, PlaceLookup, WeatherLookup},
};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::debug;

/// OpenWeather client implementing both lookup ports.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    weather_url: String,
    geocoding_url: String,
    api_key: Option<String>,
}

impl OpenWeatherClient {
    /// Builds a client from configuration.
    ///
    /// A missing API key is accepted here and reported by each lookup as
    /// [`LookupError::MissingApiKey`].
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn new(config: &BoardConfig) -> LookupResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(LookupError::transport)?;
        Ok(Self {
            client,
            weather_url: config.weather_base_url.clone(),
            geocoding_url: config.geocoding_base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn api_key(&self) -> LookupResult<&str> {
        self.api_key.as_deref().ok_or(LookupError::MissingApiKey)
    }
}

#[async_trait]
impl WeatherLookup for OpenWeatherClient {
    async fn current_conditions(&self, location: &Location) -> LookupResult<WeatherReading> {
        let api_key = self.api_key()?;
        debug!(location = %location, "requesting current weather");
        let response = self
            .client
            .get(&self.weather_url)
            .query(&[
                ("q", location.as_str()),
                ("appid", api_key),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(LookupError::transport)?;
        let body = read_success_body(response).await?;
        parse_current_weather(&body)
    }
}

#[async_trait]
impl PlaceLookup for OpenWeatherClient {
    async fn search_places(
        &self,
        query: &PlaceQuery,
        limit: u8,
    ) -> LookupResult<Vec<PlaceSuggestion>> {
        let api_key = self.api_key()?;
        debug!(query = %query, limit, "requesting place suggestions");
        let limit = limit.to_string();
        let response = self
            .client
            .get(&self.geocoding_url)
            .query(&[
                ("q", query.as_str()),
                ("limit", limit.as_str()),
                ("appid", api_key),
            ])
            .send()
            .await
            .map_err(LookupError::transport)?;
        let body = read_success_body(response).await?;
        parse_places(&body)
    }
}

/// Returns the body of a successful response, or the service error.
async fn read_success_body(response: Response) -> LookupResult<String> {
    let status = response.status();
    let body = response.text().await.map_err(LookupError::transport)?;
    if status.is_success() {
        return Ok(body);
    }
    Err(service_error(status.as_u16(), &body))
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Maps an error response to [`LookupError::Service`], keeping the
/// service's message when the body carries one.
pub(crate) fn service_error(status: u16, body: &str) -> LookupError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|parsed| parsed.message)
        .unwrap_or_default();
    LookupError::Service { status, message }
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherBody {
    weather: Vec<ConditionBody>,
    main: MainBody,
    wind: WindBody,
}

#[derive(Debug, Deserialize)]
struct ConditionBody {
    description: String,
}

#[derive(Debug, Deserialize)]
struct MainBody {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct WindBody {
    speed: f64,
}

/// Decodes a current-weather response body.
pub(crate) fn parse_current_weather(body: &str) -> LookupResult<WeatherReading> {
    let parsed: CurrentWeatherBody =
        serde_json::from_str(body).map_err(|err| LookupError::InvalidResponse(err.to_string()))?;
    let condition = parsed
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| LookupError::InvalidResponse("no weather conditions reported".to_owned()))?;
    Ok(WeatherReading {
        description: condition.description,
        temperature: parsed.main.temp,
        humidity: parsed.main.humidity,
        wind_speed: parsed.wind.speed,
    })
}

#[derive(Debug, Deserialize)]
struct PlaceBody {
    name: String,
    #[serde(default)]
    country: String,
    #[serde(default)]
    state: Option<String>,
}

/// Decodes a direct-geocoding response body.
pub(crate) fn parse_places(body: &str) -> LookupResult<Vec<PlaceSuggestion>> {
    let parsed: Vec<PlaceBody> =
        serde_json::from_str(body).map_err(|err| LookupError::InvalidResponse(err.to_string()))?;
    Ok(parsed
        .into_iter()
        .map(|place| PlaceSuggestion {
            name: place.name,
            country: place.country,
            state: place.state,
        })
        .collect())
}

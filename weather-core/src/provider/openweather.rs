use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::{
    error::ProviderError,
    model::{ForecastDay, ForecastSummary, WeatherSummary},
};

use super::WeatherProvider;

const CURRENT_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const FORECAST_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";

/// Fixed unit system: temperatures in °C.
const UNITS: &str = "metric";
/// Fixed response language for the condition descriptions.
const LANG: &str = "ru";

/// Fallback detail for the by-city path when the provider's error body
/// carries no usable message.
const CITY_FETCH_FAILED: &str = "Error fetching weather data";

// The coordinate and forecast paths never forward the provider's own error
// message, only its status code. Observed behavior of the deployed service;
// kept as-is pending product clarification.
const COORDS_FETCH_FAILED: &str = "Ошибка определении координат";
const FORECAST_FETCH_FAILED: &str = "Ошибка получения координат";

/// Time-step format of `dt_txt` entries in the forecast list.
const DT_TXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: Option<String>,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key, http: Client::new() }
    }

    fn api_key(&self) -> Result<&str, ProviderError> {
        self.api_key.as_deref().ok_or(ProviderError::ApiKeyMissing)
    }

    async fn fetch(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<(StatusCode, Vec<u8>), ProviderError> {
        let res = self
            .http
            .get(url)
            .query(query)
            .query(&[("units", UNITS), ("lang", LANG)])
            .send()
            .await?;

        let status = res.status();
        let body = res.bytes().await?;

        tracing::debug!(url, status = status.as_u16(), "weather provider responded");

        Ok((status, body.to_vec()))
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_by_city(&self, city: &str) -> Result<WeatherSummary, ProviderError> {
        let key = self.api_key()?;
        let (status, body) = self.fetch(CURRENT_URL, &[("q", city), ("appid", key)]).await?;
        decode_current_by_city(status, &body)
    }

    async fn current_by_coords(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<WeatherSummary, ProviderError> {
        let key = self.api_key()?;
        let (lat, lon) = (lat.to_string(), lon.to_string());
        let (status, body) = self
            .fetch(CURRENT_URL, &[("lat", lat.as_str()), ("lon", lon.as_str()), ("appid", key)])
            .await?;
        decode_current_by_coords(status, &body)
    }

    async fn forecast(&self, city: &str) -> Result<ForecastSummary, ProviderError> {
        let key = self.api_key()?;
        let (status, body) = self.fetch(FORECAST_URL, &[("q", city), ("appid", key)]).await?;
        decode_forecast(status, &body)
    }
}

/// Status mapping for the by-city lookup: 404 means the city is unknown, any
/// other non-success forwards the provider's own message when it has one.
fn decode_current_by_city(
    status: StatusCode,
    body: &[u8],
) -> Result<WeatherSummary, ProviderError> {
    if status == StatusCode::NOT_FOUND {
        return Err(ProviderError::CityNotFound);
    }
    if !status.is_success() {
        return Err(ProviderError::Upstream {
            status: status.as_u16(),
            message: upstream_message(body),
        });
    }

    project_current(body)
}

/// Status mapping for the coordinate lookup: every non-success answers with
/// the generic detail, 404 included.
fn decode_current_by_coords(
    status: StatusCode,
    body: &[u8],
) -> Result<WeatherSummary, ProviderError> {
    if !status.is_success() {
        return Err(ProviderError::Upstream {
            status: status.as_u16(),
            message: COORDS_FETCH_FAILED.to_string(),
        });
    }

    project_current(body)
}

fn decode_forecast(status: StatusCode, body: &[u8]) -> Result<ForecastSummary, ProviderError> {
    if !status.is_success() {
        return Err(ProviderError::Upstream {
            status: status.as_u16(),
            message: FORECAST_FETCH_FAILED.to_string(),
        });
    }

    let parsed: OwForecastResponse = serde_json::from_slice(body).map_err(schema_error)?;

    let mut forecast = Vec::new();
    for entry in &parsed.list {
        // The provider returns 3-hour steps; the midday slot stands in for
        // its calendar day.
        if !entry.dt_txt.ends_with("12:00:00") {
            continue;
        }

        let stamp = NaiveDateTime::parse_from_str(&entry.dt_txt, DT_TXT_FORMAT)
            .map_err(|err| ProviderError::Schema(format!("bad dt_txt {:?}: {err}", entry.dt_txt)))?;
        let conditions = first_condition(&entry.weather)?;

        forecast.push(ForecastDay {
            date: stamp.date(),
            temperature: entry.main.temp,
            description: conditions.description.clone(),
            icon: conditions.icon.clone(),
        });
    }

    Ok(ForecastSummary { city: parsed.city.name, forecast })
}

/// Project the fixed field set out of a current-conditions success body.
fn project_current(body: &[u8]) -> Result<WeatherSummary, ProviderError> {
    let parsed: OwCurrentResponse = serde_json::from_slice(body).map_err(schema_error)?;
    let conditions = first_condition(&parsed.weather)?;

    Ok(WeatherSummary {
        city_name: parsed.name,
        temperature: parsed.main.temp,
        description: conditions.description.clone(),
        icon: conditions.icon.clone(),
    })
}

fn first_condition(weather: &[OwWeather]) -> Result<&OwWeather, ProviderError> {
    weather.first().ok_or_else(|| ProviderError::Schema("empty weather list".to_string()))
}

/// Pull the provider's own error message out of a non-success body, e.g.
/// `{"cod":"404","message":"city not found"}`.
fn upstream_message(body: &[u8]) -> String {
    serde_json::from_slice::<OwError>(body)
        .ok()
        .and_then(|err| err.message)
        .unwrap_or_else(|| CITY_FETCH_FAILED.to_string())
}

fn schema_error(err: serde_json::Error) -> ProviderError {
    ProviderError::Schema(err.to_string())
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt_txt: String,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    list: Vec<OwForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct OwError {
    message: Option<String>,
}

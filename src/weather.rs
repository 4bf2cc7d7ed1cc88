//! Weather provider integration (OpenWeatherMap-shaped API).
//!
//! Consulted once per workout creation for a configured city. Every provider
//! failure is recoverable: callers get `None` and a warning is logged, so a
//! provider outage can never fail a create.

use reqwest::Client;
use serde::Deserialize;
use std::env;
use url::Url;

/// ---------------------------------------------------------------------------
/// Configuration
/// ---------------------------------------------------------------------------

const DEFAULT_API_BASE: &str = "https://api.openweathermap.org/data/2.5";
const DEFAULT_CITY: &str = "London";

/// Deadline for the provider call so a stalled provider cannot stall
/// workout creation.
pub const REQUEST_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct WeatherConfig {
  /// Provider API key; lookups fail (recoverably) when unset.
  pub api_key: Option<String>,
  pub city: String,
  /// Overridable so tests can point at a local mock server.
  pub api_base: String,
}

impl WeatherConfig {
  pub fn from_env() -> Self {
    Self {
      api_key: env::var("WEATHER_API_KEY").ok(),
      city: env::var("WEATHER_CITY").unwrap_or_else(|_| DEFAULT_CITY.into()),
      api_base: env::var("WEATHER_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.into()),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
  #[error("Missing configuration: {0}")]
  MissingConfig(String),

  #[error("Invalid provider URL: {0}")]
  InvalidUrl(String),

  #[error("HTTP request failed: {0}")]
  Request(String),

  #[error("API error {0}: {1}")]
  Api(reqwest::StatusCode, String),

  #[error("Malformed provider response: {0}")]
  Malformed(String),
}

impl From<reqwest::Error> for WeatherError {
  fn from(e: reqwest::Error) -> Self {
    WeatherError::Request(e.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// Provider API Data Structures
/// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CurrentConditionsResponse {
  weather: Vec<ConditionEntry>,
  main: MainReadings,
}

#[derive(Debug, Deserialize)]
struct ConditionEntry {
  description: String,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
  temp: f64, // degrees Celsius with units=metric
}

/// ---------------------------------------------------------------------------
/// Current Conditions Fetching
/// ---------------------------------------------------------------------------

fn build_request_url(config: &WeatherConfig, api_key: &str) -> Result<Url, WeatherError> {
  let mut url = Url::parse(&format!("{}/weather", config.api_base))
    .map_err(|e| WeatherError::InvalidUrl(e.to_string()))?;

  url
    .query_pairs_mut()
    .append_pair("q", &config.city)
    .append_pair("appid", api_key)
    .append_pair("units", "metric");

  Ok(url)
}

/// Fetch current conditions for the configured city, rendered as
/// `"<description>, <temp>°C"`.
pub async fn fetch_current(
  client: &Client,
  config: &WeatherConfig,
) -> Result<String, WeatherError> {
  let api_key = config
    .api_key
    .as_deref()
    .ok_or_else(|| WeatherError::MissingConfig("WEATHER_API_KEY".into()))?;

  let url = build_request_url(config, api_key)?;

  let response = client.get(url).send().await?;

  if !response.status().is_success() {
    let status = response.status();
    let error_text = response.text().await.unwrap_or_default();
    return Err(WeatherError::Api(status, error_text));
  }

  let conditions: CurrentConditionsResponse = response
    .json()
    .await
    .map_err(|e| WeatherError::Malformed(e.to_string()))?;

  let description = conditions
    .weather
    .first()
    .map(|c| c.description.clone())
    .ok_or_else(|| WeatherError::Malformed("no conditions in payload".into()))?;

  Ok(format!("{}, {:.1}°C", description, conditions.main.temp))
}

/// Fetch current conditions, degrading to `None` on any provider failure.
pub async fn lookup_current(client: &Client, config: &WeatherConfig) -> Option<String> {
  match fetch_current(client, config).await {
    Ok(snapshot) => Some(snapshot),
    Err(e) => {
      tracing::warn!(error = %e, city = %config.city, "weather lookup failed");
      None
    }
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

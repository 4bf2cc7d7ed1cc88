//! Process configuration, read from the environment (and `.env` via dotenvy).

use std::env;

use crate::weather::WeatherConfig;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
const DEFAULT_DATABASE_PATH: &str = "workouts.db";

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub bind_addr: String,
  pub database_path: String,
  pub weather: WeatherConfig,
}

impl AppConfig {
  pub fn from_env() -> Self {
    Self {
      bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into()),
      database_path: env::var("DATABASE_PATH")
        .unwrap_or_else(|_| DEFAULT_DATABASE_PATH.into()),
      weather: WeatherConfig::from_env(),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

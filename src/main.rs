use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use workout_log::config::AppConfig;
use workout_log::db::{self, AppState};
use workout_log::routes;
use workout_log::weather;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();

  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let config = AppConfig::from_env();

  let pool = db::initialize_db(&config.database_path).await?;

  // One shared client; the timeout bounds the inline weather lookup.
  let http = reqwest::Client::builder()
    .timeout(Duration::from_secs(weather::REQUEST_TIMEOUT_SECS))
    .build()?;

  let state = Arc::new(AppState {
    db: pool,
    http,
    weather: config.weather.clone(),
  });

  let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
  tracing::info!(addr = %config.bind_addr, "listening");

  axum::serve(listener, routes::router(state)).await?;

  Ok(())
}

//! Test utilities and helpers for integration and unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Shared application state factories
//! - Row seeding helpers

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::db::{AppState, DbPool};
use crate::weather::WeatherConfig;

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> DbPool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  // Run migrations
  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: DbPool) {
  pool.close().await;
}

/// ---------------------------------------------------------------------------
/// State Factories
/// ---------------------------------------------------------------------------

/// Weather configuration pointing nowhere; lookups fail fast and creates
/// store a NULL snapshot.
pub fn disabled_weather() -> WeatherConfig {
  WeatherConfig {
    api_key: None,
    city: "Testville".into(),
    api_base: "http://127.0.0.1:1".into(),
  }
}

/// Assemble handler state around a test pool and weather configuration.
pub fn test_state(pool: DbPool, weather: WeatherConfig) -> Arc<AppState> {
  Arc::new(AppState {
    db: pool,
    http: reqwest::Client::new(),
    weather,
  })
}

/// ---------------------------------------------------------------------------
/// Row Seeding
/// ---------------------------------------------------------------------------

/// Insert one workout row directly, bypassing the HTTP surface.
/// Returns the assigned row id.
pub async fn insert_test_workout(
  pool: &DbPool,
  route_name: &str,
  date: DateTime<Utc>,
  distance: Option<f64>,
  duration: Option<f64>,
  heart_rate: Option<i64>,
) -> i64 {
  let result = sqlx::query(
    r#"
    INSERT INTO workouts (route_name, description, date, distance, duration, heart_rate)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
    "#,
  )
  .bind(route_name)
  .bind(format!("Test workout on {}", route_name))
  .bind(date)
  .bind(distance)
  .bind(duration)
  .bind(heart_rate)
  .execute(pool)
  .await
  .expect("Failed to insert test workout");

  result.last_insert_rowid()
}

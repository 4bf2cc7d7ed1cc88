use reqwest::Client;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::weather::WeatherConfig;

pub type DbPool = SqlitePool;

/// Application state holding the database pool, the shared HTTP client, and
/// the weather provider configuration.
pub struct AppState {
  pub db: DbPool,
  pub http: Client,
  pub weather: WeatherConfig,
}

/// Schema for the sole table, taken from the migration itself so `/reset`
/// recreates exactly what startup created.
const CREATE_WORKOUTS_TABLE: &str = include_str!("../migrations/0001_create_workouts.sql");

/// Initialize the database connection pool and run migrations
pub async fn initialize_db(database_path: &str) -> Result<DbPool, Box<dyn std::error::Error>> {
  let db_url = format!("sqlite://{}?mode=rwc", database_path);

  tracing::info!(path = database_path, "initializing database");

  // Create connection pool
  let pool = SqlitePoolOptions::new()
    .max_connections(5)
    .connect(&db_url)
    .await?;

  // Run migrations
  sqlx::migrate!("./migrations").run(&pool).await?;

  tracing::info!("database initialized");

  Ok(pool)
}

/// Drop and recreate the workouts table, destroying every stored row.
pub async fn reset_schema(pool: &DbPool) -> Result<(), sqlx::Error> {
  sqlx::query("DROP TABLE IF EXISTS workouts").execute(pool).await?;
  sqlx::query(CREATE_WORKOUTS_TABLE).execute(pool).await?;
  Ok(())
}

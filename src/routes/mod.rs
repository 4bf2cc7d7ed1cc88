pub mod workouts;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::db::{self, AppState};
use crate::error::ApiError;

/// Assemble the full HTTP surface.
pub fn router(state: Arc<AppState>) -> Router {
  Router::new()
    .route("/", get(index))
    .route(
      "/workouts",
      get(workouts::list_workouts).post(workouts::create_workout),
    )
    .route("/workouts/aggregate", get(workouts::aggregate_workouts))
    .route("/reset", get(reset))
    .with_state(state)
}

async fn index() -> &'static str {
  "Welcome to the Workouts Tracker API"
}

/// Drop and recreate the workouts table, destroying every row. Irreversible.
/// Stays on GET because existing clients call it that way.
async fn reset(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
  db::reset_schema(&state.db).await?;
  tracing::info!("database reset");
  Ok(Json(json!({ "message": "Database reset" })))
}

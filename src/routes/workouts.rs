use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};
use sqlx::{QueryBuilder, Sqlite};
use std::sync::Arc;

use crate::db::{AppState, DbPool};
use crate::error::ApiError;
use crate::models::workout::{
  AggregateParams, AggregateStats, ListParams, NewWorkout, Workout, WorkoutFilter,
  WorkoutResponse,
};
use crate::weather;

/// ---------------------------------------------------------------------------
/// Create
/// ---------------------------------------------------------------------------

/// POST /workouts
///
/// Validates presence of `routeName` and `description`, snapshots current
/// weather for the configured city (best effort), and inserts one row.
pub async fn create_workout(
  State(state): State<Arc<AppState>>,
  Json(body): Json<NewWorkout>,
) -> Result<Json<Value>, ApiError> {
  body.validate()?;

  // Provider failures degrade to a missing snapshot, never a failed create.
  let snapshot = weather::lookup_current(&state.http, &state.weather).await;

  sqlx::query(
    r#"
    INSERT INTO workouts (route_name, description, date, distance, duration, heart_rate, weather, image)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
    "#,
  )
  .bind(body.route_name.unwrap_or_default())
  .bind(body.description.unwrap_or_default())
  .bind(Utc::now())
  .bind(body.distance)
  .bind(body.duration)
  .bind(body.heart_rate)
  .bind(snapshot)
  .bind(body.image.map(String::into_bytes))
  .execute(&state.db)
  .await?;

  Ok(Json(json!({ "message": "Workout created" })))
}

/// ---------------------------------------------------------------------------
/// Filtered List
/// ---------------------------------------------------------------------------

/// GET /workouts
pub async fn list_workouts(
  State(state): State<Arc<AppState>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<WorkoutResponse>>, ApiError> {
  let filter = WorkoutFilter::from_params(params)?;
  let workouts = fetch_filtered(&state.db, &filter).await?;

  Ok(Json(workouts.into_iter().map(WorkoutResponse::from).collect()))
}

async fn fetch_filtered(pool: &DbPool, filter: &WorkoutFilter) -> Result<Vec<Workout>, sqlx::Error> {
  let mut query = QueryBuilder::<Sqlite>::new(
    "SELECT id, route_name, description, date, distance, duration, heart_rate, weather, image \
     FROM workouts",
  );
  push_filters(&mut query, filter);

  query.build_query_as::<Workout>().fetch_all(pool).await
}

/// Append the AND-combined WHERE clauses for the set bounds.
fn push_filters(query: &mut QueryBuilder<'_, Sqlite>, filter: &WorkoutFilter) {
  let mut first = true;
  let mut clause = |query: &mut QueryBuilder<'_, Sqlite>| {
    query.push(if first { " WHERE " } else { " AND " });
    first = false;
  };

  if let Some(route_name) = &filter.route_name {
    clause(query);
    query
      .push("LOWER(route_name) = LOWER(")
      .push_bind(route_name.clone())
      .push(")");
  }
  // Inclusive on both ends, compared against the calendar day of the stored
  // timestamp.
  if let Some(start_date) = filter.start_date {
    clause(query);
    query.push("date(date) >= date(").push_bind(start_date).push(")");
  }
  if let Some(end_date) = filter.end_date {
    clause(query);
    query.push("date(date) <= date(").push_bind(end_date).push(")");
  }
  if let Some(min_distance) = filter.min_distance {
    clause(query);
    query.push("distance >= ").push_bind(min_distance);
  }
  if let Some(max_distance) = filter.max_distance {
    clause(query);
    query.push("distance <= ").push_bind(max_distance);
  }
}

/// ---------------------------------------------------------------------------
/// Aggregate Statistics
/// ---------------------------------------------------------------------------

/// GET /workouts/aggregate
///
/// Null aggregates (empty set, all-null column) come back as 0.
pub async fn aggregate_workouts(
  State(state): State<Arc<AppState>>,
  Query(params): Query<AggregateParams>,
) -> Result<Json<AggregateStats>, ApiError> {
  let filter = WorkoutFilter::from_params(params.into())?;

  let mut query = QueryBuilder::<Sqlite>::new(
    "SELECT \
       COALESCE(SUM(distance), 0.0) AS total_dist, \
       COALESCE(AVG(heart_rate), 0.0) AS avg_heart_rate, \
       COALESCE(AVG(duration), 0.0) AS avg_duration, \
       COUNT(id) AS total_workouts \
     FROM workouts",
  );
  push_filters(&mut query, &filter);

  let stats = query
    .build_query_as::<AggregateStats>()
    .fetch_one(&state.db)
    .await?;

  Ok(Json(stats))
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Stored workout row. Columns are snake_case; the wire shape is camelCase
/// (see [`WorkoutResponse`]).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Workout {
  pub id: i64,
  pub route_name: String,
  pub description: String,
  pub date: DateTime<Utc>,
  pub distance: Option<f64>,
  pub duration: Option<f64>,
  pub heart_rate: Option<i64>,
  pub weather: Option<String>,
  pub image: Option<Vec<u8>>,
}

/// Incoming body for POST /workouts. Required fields are modeled as options
/// so absence can be reported with the fixed 400 message instead of a
/// deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkout {
  #[serde(default)]
  pub route_name: Option<String>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub distance: Option<f64>,
  #[serde(default)]
  pub duration: Option<f64>,
  #[serde(default)]
  pub heart_rate: Option<i64>,
  /// Opaque; stored as the string's raw bytes.
  #[serde(default)]
  pub image: Option<String>,
}

impl NewWorkout {
  /// Presence check only. Numeric fields are trusted as-is.
  pub fn validate(&self) -> Result<(), ApiError> {
    let missing = |field: &Option<String>| field.as_deref().is_none_or(|s| s.trim().is_empty());
    if missing(&self.route_name) || missing(&self.description) {
      return Err(ApiError::MissingFields);
    }
    Ok(())
  }
}

/// Wire shape for a workout row: camelCase keys, `date` collapsed to its
/// calendar day, image blob decoded back to text.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutResponse {
  pub id: i64,
  pub route_name: String,
  pub description: String,
  pub date: String,
  pub distance: Option<f64>,
  pub duration: Option<f64>,
  pub heart_rate: Option<i64>,
  pub weather: Option<String>,
  pub image: Option<String>,
}

impl From<Workout> for WorkoutResponse {
  fn from(workout: Workout) -> Self {
    Self {
      id: workout.id,
      route_name: workout.route_name,
      description: workout.description,
      date: workout.date.format("%Y-%m-%d").to_string(),
      distance: workout.distance,
      duration: workout.duration,
      heart_rate: workout.heart_rate,
      weather: workout.weather,
      image: workout
        .image
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned()),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Filters
/// ---------------------------------------------------------------------------

/// Raw query parameters for GET /workouts, exactly as received.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
  pub route_name: Option<String>,
  pub start_date: Option<String>,
  pub end_date: Option<String>,
  pub min_distance: Option<String>,
  pub max_distance: Option<String>,
}

/// Raw query parameters for GET /workouts/aggregate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AggregateParams {
  pub start_date: Option<String>,
  pub end_date: Option<String>,
}

impl From<AggregateParams> for ListParams {
  fn from(params: AggregateParams) -> Self {
    Self {
      start_date: params.start_date,
      end_date: params.end_date,
      ..Default::default()
    }
  }
}

/// Typed filter set, AND-combined. Date bounds are inclusive on both ends;
/// `route_name` matches case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct WorkoutFilter {
  pub route_name: Option<String>,
  pub start_date: Option<NaiveDate>,
  pub end_date: Option<NaiveDate>,
  pub min_distance: Option<f64>,
  pub max_distance: Option<f64>,
}

impl WorkoutFilter {
  /// Parse raw query strings into typed bounds. Malformed values produce
  /// [`ApiError::InvalidFilter`] naming the offending parameter.
  pub fn from_params(params: ListParams) -> Result<Self, ApiError> {
    Ok(Self {
      route_name: params.route_name.filter(|s| !s.is_empty()),
      start_date: parse_date("start_date", params.start_date)?,
      end_date: parse_date("end_date", params.end_date)?,
      min_distance: parse_number("min_distance", params.min_distance)?,
      max_distance: parse_number("max_distance", params.max_distance)?,
    })
  }
}

fn parse_date(name: &'static str, raw: Option<String>) -> Result<Option<NaiveDate>, ApiError> {
  raw
    .filter(|s| !s.is_empty())
    .map(|s| {
      NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|e| ApiError::InvalidFilter {
        name,
        reason: e.to_string(),
      })
    })
    .transpose()
}

fn parse_number(name: &'static str, raw: Option<String>) -> Result<Option<f64>, ApiError> {
  raw
    .filter(|s| !s.is_empty())
    .map(|s| {
      s.parse::<f64>().map_err(|e| ApiError::InvalidFilter {
        name,
        reason: e.to_string(),
      })
    })
    .transpose()
}

/// ---------------------------------------------------------------------------
/// Aggregates
/// ---------------------------------------------------------------------------

/// Summary statistics over a filtered set of workouts. All fields come back
/// zeroed (never null) when nothing matches.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
  pub total_dist: f64,
  pub avg_heart_rate: f64,
  pub avg_duration: f64,
  pub total_workouts: i64,
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

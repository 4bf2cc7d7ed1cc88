//! Workout tracking HTTP API.
//!
//! A small JSON service backed by SQLite: create workout records, list them
//! with optional filters, compute aggregate statistics, and reset the store.
//! An external weather provider is consulted at creation time; provider
//! failures degrade to a missing weather snapshot.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod test_utils;
pub mod weather;

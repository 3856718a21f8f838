// src/models/country.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

use crate::models::difficulty::DifficultyOverview;

/// Represents the 'countries' table in the database.
/// Top level of the read-only quiz catalog.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Country {
    pub id: i64,
    pub name: String,
}

/// DTO for the catalog browse view: a country with its difficulties and
/// the calling user's attempt history per difficulty.
#[derive(Debug, Serialize)]
pub struct CountryOverview {
    pub id: i64,
    pub name: String,
    pub difficulties: Vec<DifficultyOverview>,
}

// src/models/difficulty.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

use crate::models::score::UserScore;

/// Represents the 'difficulties' table in the database.
/// Each difficulty belongs to one country and fixes the reward for a
/// fully-correct answer.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Difficulty {
    pub id: i64,
    pub country_id: i64,
    pub name: String,
    pub points_per_question: i32,
}

/// DTO for the catalog browse view: a difficulty with the calling user's
/// prior scores attached.
#[derive(Debug, Serialize)]
pub struct DifficultyOverview {
    pub id: i64,
    pub name: String,
    pub points_per_question: i32,
    pub scores: Vec<UserScore>,
}

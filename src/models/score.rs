// src/models/score.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'user_scores' table in the database.
/// One immutable summary row per completed quiz attempt.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserScore {
    pub id: i64,
    pub user_id: i64,
    pub country_id: i64,
    pub difficulty_id: i64,
    pub score: i32,
    pub total_questions: i32,
    pub correct_answers: i32,
    pub incorrect_answers: i32,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO for submitting a quiz attempt.
///
/// Key: Question ID. Value: the choice IDs the user ticked for that
/// question. Questions of the difficulty missing from the map are graded
/// as unanswered.
#[derive(Debug, Deserialize)]
pub struct SubmitQuizRequest {
    pub answers: HashMap<i64, Vec<i64>>,
}

/// DTO returned after a successful submission.
#[derive(Debug, Serialize)]
pub struct SubmitQuizResponse {
    pub summary_id: i64,
    pub score: i32,
    pub correct_answers: i32,
    pub incorrect_answers: i32,
    pub total_questions: i32,
}

/// Query parameters for the results history listing.
#[derive(Debug, Deserialize)]
pub struct ResultListParams {
    pub page: Option<i64>,
}

/// Aggregated row for the results history: a summary joined with its
/// country and difficulty display names.
#[derive(Debug, Serialize, FromRow)]
pub struct ResultSummary {
    pub id: i64,
    pub country_name: String,
    pub difficulty_name: String,
    pub score: i32,
    pub total_questions: i32,
    pub correct_answers: i32,
    pub incorrect_answers: i32,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// One page of the results history.
#[derive(Debug, Serialize)]
pub struct ResultPage {
    pub data: Vec<ResultSummary>,
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
}

// src/models/answer.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::score::ResultSummary;

/// Represents the 'user_answers' table in the database.
///
/// One row per (user, question, selected choice); `choice_id` is NULL for
/// the single sentinel row of an unanswered question. Rows are written
/// once by the submission flow and never updated.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserAnswer {
    pub id: i64,
    pub user_id: i64,
    pub question_id: i64,
    pub choice_id: Option<i64>,
    pub is_correct: bool,
    pub points_earned: i32,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Aggregated row for the result detail view: a stored answer joined with
/// its question text and, when a choice was selected, the choice text.
#[derive(Debug, Serialize, FromRow)]
pub struct AnswerDetail {
    pub question_id: i64,
    pub question_text: String,
    pub choice_id: Option<i64>,
    pub choice_text: Option<String>,
    pub is_correct: bool,
    pub points_earned: i32,
}

/// DTO for the result detail view: the attempt summary plus every stored
/// answer row for that user and difficulty.
#[derive(Debug, Serialize)]
pub struct ResultDetailResponse {
    pub summary: ResultSummary,
    pub answers: Vec<AnswerDetail>,
}

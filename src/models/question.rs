// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub difficulty_id: i64,
    pub question_text: String,
}

/// Represents the 'choices' table in the database.
/// The correctness flag never leaves the server.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Choice {
    pub id: i64,
    pub question_id: i64,
    pub choice_text: String,
    pub is_correct: bool,
}

/// DTO for a choice shown to the quiz taker (excludes `is_correct`).
#[derive(Debug, Serialize)]
pub struct QuizChoice {
    pub id: i64,
    pub choice_text: String,
}

/// DTO for a question shown to the quiz taker, with its choices attached.
#[derive(Debug, Serialize)]
pub struct QuizQuestion {
    pub id: i64,
    pub question_text: String,
    pub choices: Vec<QuizChoice>,
}

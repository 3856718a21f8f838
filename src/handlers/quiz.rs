// src/handlers/quiz.rs

use std::collections::HashMap;

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use sqlx::PgPool;

use crate::{
    config::QUIZ_QUESTION_COUNT,
    error::AppError,
    grading::{QuestionKey, grade_attempt},
    models::{
        country::{Country, CountryOverview},
        difficulty::{Difficulty, DifficultyOverview},
        question::{Choice, Question, QuizChoice, QuizQuestion},
        score::{SubmitQuizRequest, SubmitQuizResponse, UserScore},
    },
    utils::jwt::Claims,
};

/// Fetches a user's attempt summaries, grouped by difficulty.
/// Most recent attempt first within each group.
async fn scores_by_difficulty(
    pool: &PgPool,
    user_id: i64,
) -> Result<HashMap<i64, Vec<UserScore>>, AppError> {
    let scores = sqlx::query_as::<_, UserScore>(
        r#"
        SELECT id, user_id, country_id, difficulty_id, score,
               total_questions, correct_answers, incorrect_answers, completed_at
        FROM user_scores
        WHERE user_id = $1
        ORDER BY completed_at DESC, id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let mut grouped: HashMap<i64, Vec<UserScore>> = HashMap::new();
    for score in scores {
        grouped.entry(score.difficulty_id).or_default().push(score);
    }

    Ok(grouped)
}

/// Lists the whole catalog: every country with its difficulties, each
/// difficulty carrying the calling user's prior scores.
pub async fn list_countries(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id();

    let countries = sqlx::query_as::<_, Country>("SELECT id, name FROM countries ORDER BY id")
        .fetch_all(&pool)
        .await?;

    let difficulties = sqlx::query_as::<_, Difficulty>(
        "SELECT id, country_id, name, points_per_question FROM difficulties ORDER BY id",
    )
    .fetch_all(&pool)
    .await?;

    let mut user_scores = scores_by_difficulty(&pool, user_id).await?;

    let mut by_country: HashMap<i64, Vec<DifficultyOverview>> = HashMap::new();
    for difficulty in difficulties {
        by_country
            .entry(difficulty.country_id)
            .or_default()
            .push(DifficultyOverview {
                id: difficulty.id,
                name: difficulty.name,
                points_per_question: difficulty.points_per_question,
                scores: user_scores.remove(&difficulty.id).unwrap_or_default(),
            });
    }

    let overview: Vec<CountryOverview> = countries
        .into_iter()
        .map(|country| CountryOverview {
            difficulties: by_country.remove(&country.id).unwrap_or_default(),
            id: country.id,
            name: country.name,
        })
        .collect();

    Ok(Json(overview))
}

/// Lists one country's difficulties with the calling user's prior scores.
pub async fn list_difficulties(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    Path(country_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id();

    let country = sqlx::query_as::<_, Country>("SELECT id, name FROM countries WHERE id = $1")
        .bind(country_id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::NotFound("Country not found".to_string()))?;

    let difficulties = sqlx::query_as::<_, Difficulty>(
        r#"
        SELECT id, country_id, name, points_per_question
        FROM difficulties
        WHERE country_id = $1
        ORDER BY id
        "#,
    )
    .bind(country.id)
    .fetch_all(&pool)
    .await?;

    let mut user_scores = scores_by_difficulty(&pool, user_id).await?;

    let overview: Vec<DifficultyOverview> = difficulties
        .into_iter()
        .map(|difficulty| DifficultyOverview {
            scores: user_scores.remove(&difficulty.id).unwrap_or_default(),
            id: difficulty.id,
            name: difficulty.name,
            points_per_question: difficulty.points_per_question,
        })
        .collect();

    Ok(Json(serde_json::json!({
        "country": country,
        "difficulties": overview,
    })))
}

/// Fetches a random quiz paper for one difficulty: at most 5 questions with
/// their full choice lists, correctness flags stripped.
///
/// Sampling is independent per call; repeat attempts may see the same
/// questions again. A difficulty with fewer than 5 questions yields them all.
pub async fn get_quiz_questions(
    State(pool): State<PgPool>,
    Path(difficulty_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let difficulty = fetch_difficulty(&pool, difficulty_id).await?;

    let questions = sqlx::query_as::<_, Question>(
        r#"
        SELECT id, difficulty_id, question_text
        FROM questions
        WHERE difficulty_id = $1
        ORDER BY RANDOM()
        LIMIT $2
        "#,
    )
    .bind(difficulty.id)
    .bind(QUIZ_QUESTION_COUNT)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to sample quiz questions: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    let mut choices = choices_by_question(&pool, &questions).await?;

    let paper: Vec<QuizQuestion> = questions
        .into_iter()
        .map(|question| QuizQuestion {
            choices: choices
                .remove(&question.id)
                .unwrap_or_default()
                .into_iter()
                .map(|choice| QuizChoice {
                    id: choice.id,
                    choice_text: choice.choice_text,
                })
                .collect(),
            id: question.id,
            question_text: question.question_text,
        })
        .collect();

    Ok(Json(serde_json::json!({
        "difficulty": difficulty,
        "questions": paper,
    })))
}

/// Submits a quiz attempt for one difficulty.
///
/// Grades every question belonging to the difficulty (questions missing
/// from the answer map count as unanswered), then persists all answer rows
/// and the summary row in a single transaction. A failure anywhere rolls
/// the whole attempt back.
pub async fn submit_quiz(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    Path(difficulty_id): Path<i64>,
    Json(req): Json<SubmitQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id();

    if req.answers.is_empty() {
        return Err(AppError::BadRequest("No answers submitted".to_string()));
    }

    let difficulty = fetch_difficulty(&pool, difficulty_id).await?;

    let questions = sqlx::query_as::<_, Question>(
        r#"
        SELECT id, difficulty_id, question_text
        FROM questions
        WHERE difficulty_id = $1
        ORDER BY id
        "#,
    )
    .bind(difficulty.id)
    .fetch_all(&pool)
    .await?;

    let choices = choices_by_question(&pool, &questions).await?;

    let keys: Vec<QuestionKey> = questions
        .iter()
        .map(|question| QuestionKey {
            question_id: question.id,
            correct_choice_ids: choices
                .get(&question.id)
                .map(|list| {
                    list.iter()
                        .filter(|c| c.is_correct)
                        .map(|c| c.id)
                        .collect()
                })
                .unwrap_or_default(),
        })
        .collect();

    tracing::info!(
        user_id,
        difficulty_id = difficulty.id,
        questions = keys.len(),
        "grading quiz attempt"
    );

    let graded = grade_attempt(&keys, &req.answers, difficulty.points_per_question);

    // One transaction for the whole attempt: every answer row plus the
    // summary become visible together, or not at all.
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    for answer in &graded.answers {
        sqlx::query(
            r#"
            INSERT INTO user_answers (user_id, question_id, choice_id, is_correct, points_earned)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user_id)
        .bind(answer.question_id)
        .bind(answer.choice_id)
        .bind(answer.is_correct)
        .bind(answer.points_earned)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to record answer: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;
    }

    let summary_id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO user_scores
            (user_id, country_id, difficulty_id, score,
             total_questions, correct_answers, incorrect_answers)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(difficulty.country_id)
    .bind(difficulty.id)
    .bind(graded.score)
    .bind(graded.total_questions)
    .bind(graded.correct_answers)
    .bind(graded.incorrect_answers)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| {
        tracing::error!("Failed to record attempt summary: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    tx.commit()
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    tracing::info!(
        user_id,
        summary_id,
        score = graded.score,
        correct = graded.correct_answers,
        total = graded.total_questions,
        "quiz attempt recorded"
    );

    Ok(Json(SubmitQuizResponse {
        summary_id,
        score: graded.score,
        correct_answers: graded.correct_answers,
        incorrect_answers: graded.incorrect_answers,
        total_questions: graded.total_questions,
    }))
}

async fn fetch_difficulty(pool: &PgPool, difficulty_id: i64) -> Result<Difficulty, AppError> {
    sqlx::query_as::<_, Difficulty>(
        "SELECT id, country_id, name, points_per_question FROM difficulties WHERE id = $1",
    )
    .bind(difficulty_id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound("Difficulty not found".to_string()))
}

/// Fetches the choice lists for a set of questions, grouped by question.
async fn choices_by_question(
    pool: &PgPool,
    questions: &[Question],
) -> Result<HashMap<i64, Vec<Choice>>, AppError> {
    let question_ids: Vec<i64> = questions.iter().map(|q| q.id).collect();

    let mut grouped: HashMap<i64, Vec<Choice>> = HashMap::new();
    if question_ids.is_empty() {
        return Ok(grouped);
    }

    let choices = sqlx::query_as::<_, Choice>(
        r#"
        SELECT id, question_id, choice_text, is_correct
        FROM choices
        WHERE question_id = ANY($1)
        ORDER BY id
        "#,
    )
    .bind(&question_ids)
    .fetch_all(pool)
    .await?;

    for choice in choices {
        grouped.entry(choice.question_id).or_default().push(choice);
    }

    Ok(grouped)
}

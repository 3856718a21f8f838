// src/handlers/results.rs

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use sqlx::PgPool;

use crate::{
    config::RESULTS_PER_PAGE,
    error::AppError,
    models::{
        answer::{AnswerDetail, ResultDetailResponse},
        score::{ResultListParams, ResultPage, ResultSummary, UserScore},
    },
    utils::jwt::Claims,
};

/// Lists the calling user's attempt history, most recent first.
/// Fixed page size of 10, joined with country and difficulty names.
pub async fn list_results(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<ResultListParams>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id();
    let page = params.page.unwrap_or(1).max(1);
    let offset = (page - 1) * RESULTS_PER_PAGE;

    let summaries = sqlx::query_as::<_, ResultSummary>(
        r#"
        SELECT
            s.id,
            c.name AS country_name,
            d.name AS difficulty_name,
            s.score, s.total_questions, s.correct_answers, s.incorrect_answers,
            s.completed_at
        FROM user_scores s
        JOIN countries c ON s.country_id = c.id
        JOIN difficulties d ON s.difficulty_id = d.id
        WHERE s.user_id = $1
        ORDER BY s.completed_at DESC, s.id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(RESULTS_PER_PAGE)
    .bind(offset)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch results page: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    let total =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM user_scores WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&pool)
            .await?;

    Ok(Json(ResultPage {
        data: summaries,
        page,
        per_page: RESULTS_PER_PAGE,
        total,
    }))
}

/// Shows one attempt summary with its reconstructed answer rows.
///
/// Only the owner may view a summary; anyone else gets 403, never the data.
/// The answer rows are every stored answer of this user for questions of the
/// summary's difficulty, so repeated attempts at the same difficulty all
/// appear together.
pub async fn result_detail(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    Path(summary_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id();

    let score = sqlx::query_as::<_, UserScore>(
        r#"
        SELECT id, user_id, country_id, difficulty_id, score,
               total_questions, correct_answers, incorrect_answers, completed_at
        FROM user_scores
        WHERE id = $1
        "#,
    )
    .bind(summary_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Result not found".to_string()))?;

    if score.user_id != user_id {
        return Err(AppError::Forbidden(
            "You do not have access to this result".to_string(),
        ));
    }

    let summary = sqlx::query_as::<_, ResultSummary>(
        r#"
        SELECT
            s.id,
            c.name AS country_name,
            d.name AS difficulty_name,
            s.score, s.total_questions, s.correct_answers, s.incorrect_answers,
            s.completed_at
        FROM user_scores s
        JOIN countries c ON s.country_id = c.id
        JOIN difficulties d ON s.difficulty_id = d.id
        WHERE s.id = $1
        "#,
    )
    .bind(score.id)
    .fetch_one(&pool)
    .await?;

    let answers = sqlx::query_as::<_, AnswerDetail>(
        r#"
        SELECT
            a.question_id,
            q.question_text,
            a.choice_id,
            ch.choice_text,
            a.is_correct,
            a.points_earned
        FROM user_answers a
        JOIN questions q ON a.question_id = q.id
        LEFT JOIN choices ch ON a.choice_id = ch.id
        WHERE a.user_id = $1 AND q.difficulty_id = $2
        ORDER BY a.question_id, a.id
        "#,
    )
    .bind(user_id)
    .bind(score.difficulty_id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to reconstruct result detail: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(ResultDetailResponse { summary, answers }))
}

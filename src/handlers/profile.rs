// src/handlers/profile.rs

use axum::{Extension, Json, extract::State, response::IntoResponse};
use sqlx::PgPool;

use crate::{
    error::AppError,
    models::{
        chat::ChatLog,
        quiz_result::{QuizResult, QuizStats},
        user::{MeResponse, User},
    },
    utils::jwt::Claims,
};

/// Get current user's profile with derived quiz statistics and recent
/// activity. Statistics are computed from the result rows at read time,
/// never stored.
pub async fn get_me(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id();

    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, name, password, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("User not found".to_string()))?;

    let results = sqlx::query_as::<_, QuizResult>(
        r#"
        SELECT id, user_id, score, total_questions, submitted_at
        FROM quiz_results
        WHERE user_id = $1
        ORDER BY submitted_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(&pool)
    .await?;

    let recent_chats = sqlx::query_as::<_, ChatLog>(
        r#"
        SELECT id, user_id, question, answer, language, timestamp
        FROM chat_logs
        WHERE user_id = $1
        ORDER BY timestamp DESC
        LIMIT 10
        "#,
    )
    .bind(user_id)
    .fetch_all(&pool)
    .await?;

    let quiz_stats = QuizStats::from_results(&results);
    let recent_results = results.into_iter().take(10).collect();

    Ok(Json(MeResponse {
        id: user.id,
        email: user.email,
        name: user.name,
        created_at: user.created_at,
        quiz_stats,
        recent_results,
        recent_chats,
    }))
}

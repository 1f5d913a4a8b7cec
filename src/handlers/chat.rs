// src/handlers/chat.rs

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    chat::{generate_response, translate_to_hindi},
    config::CHAT_HISTORY_LIMIT,
    error::AppError,
    handlers::knowledge::knowledge_base,
    models::chat::{ChatLog, ChatRequest, ChatResponse, Language},
    state::AppState,
    utils::{jwt::Claims, sanitize::clean_html},
};

/// Returns the user's chat history: the most recent messages, oldest
/// first, capped at the history limit.
pub async fn list_messages(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let messages = sqlx::query_as::<_, ChatLog>(
        r#"
        SELECT id, user_id, question, answer, language, timestamp
        FROM (
            SELECT id, user_id, question, answer, language, timestamp
            FROM chat_logs
            WHERE user_id = $1
            ORDER BY timestamp DESC
            LIMIT $2
        ) recent
        ORDER BY timestamp ASC
        "#,
    )
    .bind(claims.user_id())
    .bind(CHAT_HISTORY_LIMIT)
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(messages))
}

/// Handles one chat exchange: selects a canned response for the message,
/// applies the Hindi pass when requested, and appends the exchange to
/// the user's log.
///
/// The insert is best-effort with optimistic local echo: if the store
/// write fails the generated answer is still returned (with
/// `persisted: false` and a synthetic timestamp) instead of being
/// dropped from view.
pub async fn send_message(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<ChatRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let question = clean_html(payload.message.trim());
    if question.is_empty() {
        return Err(AppError::BadRequest("Message must not be empty".to_string()));
    }

    let kb = knowledge_base(&state).await;

    let mut answer = generate_response(&question, &kb, &mut rand::thread_rng());
    if payload.language == Language::Hindi {
        answer = translate_to_hindi(&answer);
    }

    let user_id = claims.user_id();
    let inserted = sqlx::query_as::<_, ChatLog>(
        r#"
        INSERT INTO chat_logs (user_id, question, answer, language)
        VALUES ($1, $2, $3, $4)
        RETURNING id, user_id, question, answer, language, timestamp
        "#,
    )
    .bind(user_id)
    .bind(&question)
    .bind(&answer)
    .bind(payload.language.as_str())
    .fetch_one(&state.pool)
    .await;

    let response = match inserted {
        Ok(message) => ChatResponse {
            message,
            persisted: true,
        },
        Err(e) => {
            tracing::error!("Failed to persist chat log for user {}: {:?}", user_id, e);
            ChatResponse {
                message: ChatLog::local_echo(user_id, question, answer, payload.language),
                persisted: false,
            }
        }
    };

    Ok((StatusCode::CREATED, Json(response)))
}

// src/handlers/quiz.rs

use std::time::Duration;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    config::{MIN_QUESTION_POOL, QUIZ_SESSION_SIZE, SESSION_TTL_SECS},
    error::AppError,
    models::question::{AnswerLabel, PublicQuestion, QuizQuestion, QuizRow},
    quiz::{QuizError, QuizSession, fallback},
    state::{AppState, SessionEntry},
    utils::jwt::Claims,
};

/// DTO for answering the current question. Unknown labels are rejected
/// at deserialization with 422, so the engine only ever sees A-D.
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub label: AnswerLabel,
}

/// DTO for one second of countdown. Carries the index the client timer
/// was counting for, so a stale timer firing after an advance is
/// detected and dropped instead of burning the next question's budget.
#[derive(Debug, Deserialize)]
pub struct TickRequest {
    pub question_index: usize,
}

/// The in-progress view of a session: the current question without its
/// correct answer.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub current_index: usize,
    pub total_questions: usize,
    pub seconds_remaining: u32,
    pub completed: bool,
    pub question: PublicQuestion,
    pub selected: Option<AnswerLabel>,
}

/// Per-question entry of the post-completion review.
#[derive(Debug, Serialize)]
pub struct ReviewEntry {
    pub question: String,
    pub correct_option: AnswerLabel,
    pub correct_answer: String,
    pub selected: Option<AnswerLabel>,
    pub correct: bool,
}

/// The completed view: score, review, and whether the result reached
/// the store (`saved` is only present on the completing response).
#[derive(Debug, Serialize)]
pub struct ResultsView {
    pub session_id: Uuid,
    pub score: usize,
    pub total_questions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved: Option<bool>,
    pub review: Vec<ReviewEntry>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum QuizStateResponse {
    Completed(ResultsView),
    InProgress(Box<SessionView>),
}

fn option_text(q: &QuizQuestion, label: AnswerLabel) -> String {
    match label {
        AnswerLabel::A => q.option_a.clone(),
        AnswerLabel::B => q.option_b.clone(),
        AnswerLabel::C => q.option_c.clone(),
        AnswerLabel::D => q.option_d.clone(),
    }
}

fn session_view(session: &QuizSession) -> SessionView {
    SessionView {
        session_id: session.id(),
        current_index: session.current_index(),
        total_questions: session.pool().len(),
        seconds_remaining: session.seconds_remaining(),
        completed: false,
        question: PublicQuestion::from(session.current_question()),
        selected: session.answers()[session.current_index()],
    }
}

fn results_view(session: &QuizSession, saved: Option<bool>) -> ResultsView {
    let review = session
        .pool()
        .iter()
        .zip(session.answers())
        .map(|(q, selected)| ReviewEntry {
            question: q.question.clone(),
            correct_option: q.correct_option,
            correct_answer: option_text(q, q.correct_option),
            selected: *selected,
            correct: *selected == Some(q.correct_option),
        })
        .collect();

    ResultsView {
        session_id: session.id(),
        score: session.score().unwrap_or(0),
        total_questions: session.pool().len(),
        saved,
        review,
    }
}

fn state_response(session: &QuizSession, saved: Option<bool>) -> QuizStateResponse {
    if session.is_completed() {
        QuizStateResponse::Completed(results_view(session, saved))
    } else {
        QuizStateResponse::InProgress(Box::new(session_view(session)))
    }
}

/// Loads the candidate question pool from the store, validating each row
/// at the boundary. Falls back to the bundled questions when the store
/// is unreachable or yields fewer than `MIN_QUESTION_POOL` usable rows.
async fn load_question_pool(pool: &PgPool) -> Vec<QuizQuestion> {
    let rows = match sqlx::query_as::<_, QuizRow>(
        r#"
        SELECT id, question, option_a, option_b, option_c, option_d,
               correct_option, category, difficulty
        FROM quizzes
        "#,
    )
    .fetch_all(pool)
    .await
    {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!("Question store unreachable, using fallback set: {:?}", e);
            return fallback::questions();
        }
    };

    let questions: Vec<QuizQuestion> = rows
        .into_iter()
        .filter_map(|row| match QuizQuestion::try_from(row) {
            Ok(q) => Some(q),
            Err(e) => {
                tracing::warn!("Skipping malformed quiz row: {}", e);
                None
            }
        })
        .collect();

    if questions.len() < MIN_QUESTION_POOL {
        tracing::warn!(
            "Question store has {} usable rows (minimum {}), using fallback set",
            questions.len(),
            MIN_QUESTION_POOL
        );
        return fallback::questions();
    }

    questions
}

fn not_found() -> AppError {
    AppError::NotFound("Quiz session not found".to_string())
}

/// Starts a quiz session: samples up to 5 questions without replacement
/// and registers the session in app state, bound to the caller.
/// Sessions abandoned past their TTL are swept here rather than by a
/// background task.
pub async fn start_quiz(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let candidates = load_question_pool(&state.pool).await;

    let session = QuizSession::start(candidates, QUIZ_SESSION_SIZE, &mut rand::thread_rng())
        .map_err(|e| match e {
            QuizError::EmptyPool => {
                AppError::EmptyPool("No quiz questions are available right now".to_string())
            }
        })?;

    let view = session_view(&session);
    let ttl = Duration::from_secs(SESSION_TTL_SECS);

    let mut sessions = state.sessions.write().await;
    sessions.retain(|_, entry| entry.started_at.elapsed() < ttl);
    sessions.insert(session.id(), SessionEntry::new(claims.user_id(), session));

    Ok((StatusCode::CREATED, Json(view)))
}

/// Returns the current state of a session. Sessions belonging to other
/// users are indistinguishable from missing ones.
pub async fn get_session(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let sessions = state.sessions.read().await;
    let entry = sessions
        .get(&id)
        .filter(|e| e.owner == claims.user_id())
        .ok_or_else(not_found)?;

    Ok(Json(state_response(&entry.session, None)))
}

/// Records an answer for the current question.
pub async fn select_answer(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(req): Json<AnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut sessions = state.sessions.write().await;
    let entry = sessions
        .get_mut(&id)
        .filter(|e| e.owner == claims.user_id())
        .ok_or_else(not_found)?;

    entry.session.select_answer(req.label);

    Ok(Json(state_response(&entry.session, None)))
}

/// Moves to the next question, completing the session on the last one.
/// Completion persists the result best-effort: a failed insert is
/// reported via `saved: false` while the in-memory score stays
/// authoritative for display.
pub async fn advance(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let session = {
        let mut sessions = state.sessions.write().await;
        let entry = sessions
            .get_mut(&id)
            .filter(|e| e.owner == claims.user_id())
            .ok_or_else(not_found)?;

        entry.session.advance();
        take_if_completed(&mut sessions, id)?
    };

    finish_transition(&state, claims.user_id(), session).await
}

/// Steps back one question so an earlier answer can be revised.
pub async fn previous(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut sessions = state.sessions.write().await;
    let entry = sessions
        .get_mut(&id)
        .filter(|e| e.owner == claims.user_id())
        .ok_or_else(not_found)?;

    entry.session.previous();

    Ok(Json(state_response(&entry.session, None)))
}

/// Applies one second of countdown. Ticks carrying an index other than
/// the current question are stale timer callbacks and are dropped.
pub async fn tick(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(req): Json<TickRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = {
        let mut sessions = state.sessions.write().await;
        let entry = sessions
            .get_mut(&id)
            .filter(|e| e.owner == claims.user_id())
            .ok_or_else(not_found)?;

        if req.question_index == entry.session.current_index() {
            entry.session.tick();
        }
        take_if_completed(&mut sessions, id)?
    };

    finish_transition(&state, claims.user_id(), session).await
}

/// Discards a session (reset / navigation away).
pub async fn reset(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut sessions = state.sessions.write().await;
    let owned = sessions
        .get(&id)
        .map(|e| e.owner == claims.user_id())
        .unwrap_or(false);
    if !owned {
        return Err(not_found());
    }
    sessions.remove(&id);
    Ok(StatusCode::NO_CONTENT)
}

/// Snapshots the session after a mutating transition, evicting it from
/// the map once completed. The completing response carries the full
/// results view, so nothing is lost by dropping the entry; a session is
/// only ever in the map while it is still in progress.
fn take_if_completed(
    sessions: &mut std::collections::HashMap<Uuid, SessionEntry>,
    id: Uuid,
) -> Result<QuizSession, AppError> {
    let entry = sessions.get(&id).ok_or_else(not_found)?;
    if entry.session.is_completed() {
        let entry = sessions.remove(&id).ok_or_else(not_found)?;
        Ok(entry.session)
    } else {
        Ok(entry.session.clone())
    }
}

/// Shared tail of the mutating handlers: persists the result exactly
/// once, on the transition that completed (and evicted) the session.
async fn finish_transition(
    state: &AppState,
    user_id: i64,
    session: QuizSession,
) -> Result<Json<QuizStateResponse>, AppError> {
    let saved = if session.is_completed() {
        let score = session.score().unwrap_or(0) as i64;
        let total = session.pool().len() as i64;
        Some(persist_result(&state.pool, user_id, score, total).await)
    } else {
        None
    };

    Ok(Json(state_response(&session, saved)))
}

async fn persist_result(pool: &PgPool, user_id: i64, score: i64, total: i64) -> bool {
    let result = sqlx::query(
        r#"
        INSERT INTO quiz_results (user_id, score, total_questions)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(user_id)
    .bind(score)
    .bind(total)
    .execute(pool)
    .await;

    match result {
        Ok(_) => true,
        Err(e) => {
            tracing::error!("Failed to persist quiz result for user {}: {:?}", user_id, e);
            false
        }
    }
}

// src/models/chat.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Response language of the chat assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Hindi,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Hindi => "hindi",
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::English
    }
}

/// Represents the 'chat_logs' table in the database.
/// Append-only conversation log, one row per exchange.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ChatLog {
    pub id: i64,
    pub user_id: i64,
    pub question: String,
    pub answer: String,
    pub language: String,
    pub timestamp: Option<chrono::DateTime<chrono::Utc>>,
}

impl ChatLog {
    /// Sentinel id of a locally echoed exchange that never reached the
    /// store. Real rows are BIGSERIAL and always positive.
    pub const ECHO_ID: i64 = -1;

    /// Builds the local-echo row returned when the chat-log insert
    /// fails: sentinel id, synthetic timestamp.
    pub fn local_echo(user_id: i64, question: String, answer: String, language: Language) -> Self {
        ChatLog {
            id: Self::ECHO_ID,
            user_id,
            question,
            answer,
            language: language.as_str().to_string(),
            timestamp: Some(chrono::Utc::now()),
        }
    }
}

/// DTO for sending a chat message.
#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1, max = 1000, message = "Message must be 1-1000 characters."))]
    pub message: String,
    #[serde(default)]
    pub language: Language,
}

/// DTO returned after a message exchange.
///
/// `persisted` is false when the chat-log insert failed; the answer is
/// still echoed locally so a store outage never eats the reply.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub message: ChatLog,
    pub persisted: bool,
}

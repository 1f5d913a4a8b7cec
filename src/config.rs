// src/config.rs

use dotenvy::dotenv;
use std::env;

/// Number of questions sampled into one quiz session.
pub const QUIZ_SESSION_SIZE: usize = 5;

/// Countdown budget per question, in seconds.
pub const QUESTION_TIME_LIMIT_SECS: u32 = 30;

/// Minimum number of rows the question store must yield before we trust it.
/// Below this the bundled fallback questions are used instead.
pub const MIN_QUESTION_POOL: usize = 3;

/// Chat history page size (timestamp ascending).
pub const CHAT_HISTORY_LIMIT: i64 = 20;

/// How long an in-flight quiz session may sit idle before it is swept
/// from the session map. A full session is 5 questions at 30 seconds
/// each, so half an hour is generous.
pub const SESSION_TTL_SECS: u64 = 30 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        let jwt_expiration = env::var("JWT_EXPIRATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(86400);

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            database_url,
            jwt_secret,
            jwt_expiration,
            rust_log,
        }
    }
}

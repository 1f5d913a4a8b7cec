// src/state.rs

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::FromRef;
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::Config;
use crate::models::knowledge::KnowledgeBase;
use crate::quiz::QuizSession;

/// One live quiz session together with the id of the user who started
/// it. Handlers must not touch the session unless the caller is the
/// owner; `started_at` drives TTL eviction of abandoned entries.
pub struct SessionEntry {
    pub owner: i64,
    pub session: QuizSession,
    pub started_at: Instant,
}

impl SessionEntry {
    pub fn new(owner: i64, session: QuizSession) -> Self {
        SessionEntry {
            owner,
            session,
            started_at: Instant::now(),
        }
    }
}

/// Shared application state, constructed once at startup and injected
/// into every handler. Replaces any notion of module-level singletons:
/// the pool, config, live quiz sessions, and the knowledge-base cache
/// all live here.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
    /// In-flight quiz sessions, keyed by session id and bound to the
    /// user who started them. Entries are removed on reset, on
    /// completion, and by TTL sweep when abandoned.
    pub sessions: Arc<RwLock<HashMap<Uuid, SessionEntry>>>,
    /// Knowledge base loaded lazily on first chat use; staleness is
    /// acceptable, so there is no invalidation.
    pub knowledge: Arc<RwLock<Option<KnowledgeBase>>>,
}

impl AppState {
    pub fn new(pool: PgPool, config: Config) -> Self {
        AppState {
            pool,
            config,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            knowledge: Arc::new(RwLock::new(None)),
        }
    }
}

impl FromRef<AppState> for PgPool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

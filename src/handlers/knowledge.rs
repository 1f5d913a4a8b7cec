// src/handlers/knowledge.rs

use axum::{Json, extract::State, response::IntoResponse};
use sqlx::PgPool;

use crate::{
    error::AppError,
    models::knowledge::{KnowledgeBase, Mission, Planet},
    state::AppState,
};

/// Lists all planets in the knowledge base.
pub async fn list_planets(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let planets = sqlx::query_as::<_, Planet>(
        r#"
        SELECT id, name, description, planet_type, distance_from_earth
        FROM planets
        ORDER BY id
        "#,
    )
    .fetch_all(&pool)
    .await
    .map_err(|e| AppError::Fetch(e.to_string()))?;

    Ok(Json(planets))
}

/// Lists all missions, most recent first.
pub async fn list_missions(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let missions = sqlx::query_as::<_, Mission>(
        r#"
        SELECT id, name, agency, mission_date, objective, description
        FROM missions
        ORDER BY mission_date DESC NULLS LAST
        "#,
    )
    .fetch_all(&pool)
    .await
    .map_err(|e| AppError::Fetch(e.to_string()))?;

    Ok(Json(missions))
}

/// Returns the cached knowledge base, loading it on first use.
///
/// Planet and mission reads are issued concurrently; they populate
/// disjoint fields so no ordering is required. A failed load degrades to
/// an empty knowledge base (the chat falls back to its static texts)
/// and is retried on the next call rather than cached.
pub async fn knowledge_base(state: &AppState) -> KnowledgeBase {
    if let Some(kb) = state.knowledge.read().await.as_ref() {
        return kb.clone();
    }

    let planets = sqlx::query_as::<_, Planet>(
        "SELECT id, name, description, planet_type, distance_from_earth FROM planets",
    )
    .fetch_all(&state.pool);
    let missions = sqlx::query_as::<_, Mission>(
        "SELECT id, name, agency, mission_date, objective, description FROM missions",
    )
    .fetch_all(&state.pool);

    match tokio::try_join!(planets, missions) {
        Ok((planets, missions)) => {
            let kb = KnowledgeBase { planets, missions };
            *state.knowledge.write().await = Some(kb.clone());
            kb
        }
        Err(e) => {
            tracing::warn!("Knowledge base load failed, using empty fallback: {:?}", e);
            KnowledgeBase::default()
        }
    }
}

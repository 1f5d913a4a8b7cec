// src/routes.rs

use axum::{
    Router, http::Method, middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{auth, chat, knowledge, profile, quiz},
    state::AppState,
    utils::jwt::auth_middleware,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (auth, knowledge, quiz, chat, profile).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (pool, config, quiz sessions, knowledge cache).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    let knowledge_routes = Router::new()
        .route("/planets", get(knowledge::list_planets))
        .route("/missions", get(knowledge::list_missions));

    let quiz_routes = Router::new()
        .route("/start", post(quiz::start_quiz))
        .route("/{id}", get(quiz::get_session).delete(quiz::reset))
        .route("/{id}/answer", post(quiz::select_answer))
        .route("/{id}/advance", post(quiz::advance))
        .route("/{id}/previous", post(quiz::previous))
        .route("/{id}/tick", post(quiz::tick))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let chat_routes = Router::new()
        .route(
            "/messages",
            get(chat::list_messages).post(chat::send_message),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let profile_routes = Router::new()
        .route("/me", get(profile::get_me))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/knowledge", knowledge_routes)
        .nest("/api/quiz", quiz_routes)
        .nest("/api/chat", chat_routes)
        .nest("/api/profile", profile_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

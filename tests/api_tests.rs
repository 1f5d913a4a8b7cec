// tests/api_tests.rs

use cosmo_backend::{config::Config, routes, state::AppState};
use sqlx::postgres::PgPoolOptions;

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app() -> String {
    // Note: For Postgres, you must have a running database.
    // We'll read from DATABASE_URL environment variable.
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    // 1. Create a pool
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
        .expect("Failed to connect to Postgres for testing. Make sure DATABASE_URL is set.");

    // 2. Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    // 3. Create test configuration and state
    let config = Config {
        database_url: database_url.clone(),
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600, // 10 minutes for tests
        rust_log: "error".to_string(),
    };

    let state = AppState::new(pool, config);

    // 4. Create the router with the app state
    let app = routes::create_router(state);

    // 5. Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    // 6. Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

/// Registers a fresh user and returns (email, token).
async fn register_and_login(client: &reqwest::Client, address: &str) -> (String, String) {
    let email = format!("u_{}@example.com", &uuid::Uuid::new_v4().to_string()[..8]);
    let password = "password123";

    let register_resp = client
        .post(format!("{}/api/auth/register", address))
        .json(&serde_json::json!({
            "email": email,
            "name": "Test Explorer",
            "password": password
        }))
        .send()
        .await
        .expect("Register failed");
    assert_eq!(register_resp.status().as_u16(), 201);

    let login_resp = client
        .post(format!("{}/api/auth/login", address))
        .json(&serde_json::json!({
            "email": email,
            "password": password
        }))
        .send()
        .await
        .expect("Login failed")
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse login json");

    let token = login_resp["token"].as_str().expect("Token not found");
    (email, token.to_string())
}

/// Seeds enough questions (all answered by option_a) for a full session.
async fn seed_questions(database_url: &str) {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(database_url)
        .await
        .expect("Failed to connect to test DB");

    for i in 0..10 {
        sqlx::query(
            r#"
            INSERT INTO quizzes (question, option_a, option_b, option_c, option_d, correct_option, category, difficulty)
            VALUES ($1, 'Correct', 'Wrong 1', 'Wrong 2', 'Wrong 3', 'option_a', 'planets', 'easy')
            "#,
        )
        .bind(format!("Seeded question {}", i))
        .execute(&pool)
        .await
        .unwrap();
    }
}

#[tokio::test]
async fn health_check_404() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn register_fails_validation() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act: not an email address
    let response = client
        .post(format!("{}/api/auth/register", address))
        .json(&serde_json::json!({
            "email": "not-an-email",
            "name": "x",
            "password": "password123"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn quiz_requires_auth() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/quiz/start", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn test_quiz_flow() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    seed_questions(&database_url).await;
    let (_, token) = register_and_login(&client, &address).await;

    // 1. Start a session
    let start: serde_json::Value = client
        .post(format!("{}/api/quiz/start", address))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Start failed")
        .json()
        .await
        .unwrap();

    let session_id = start["session_id"].as_str().expect("No session id");
    let total = start["total_questions"].as_u64().unwrap();
    assert_eq!(total, 5, "pool of >=10 rows samples 5 questions");
    assert_eq!(start["seconds_remaining"].as_u64().unwrap(), 30);
    assert!(
        start["question"].get("correct_option").is_none(),
        "correct answer must not leak to the client"
    );

    // 2. Answer everything with option_a (all seeded rows agree) and advance
    let mut last = serde_json::Value::Null;
    for _ in 0..total {
        let answered = client
            .post(format!("{}/api/quiz/{}/answer", address, session_id))
            .bearer_auth(&token)
            .json(&serde_json::json!({ "label": "option_a" }))
            .send()
            .await
            .expect("Answer failed");
        assert_eq!(answered.status().as_u16(), 200);

        last = client
            .post(format!("{}/api/quiz/{}/advance", address, session_id))
            .bearer_auth(&token)
            .send()
            .await
            .expect("Advance failed")
            .json()
            .await
            .unwrap();
    }

    // 3. Completed with a perfect score, persisted to the store
    assert_eq!(last["score"].as_u64().unwrap(), total);
    assert_eq!(last["saved"], true);
    assert_eq!(last["review"].as_array().unwrap().len(), total as usize);

    // 4. The result shows up in profile statistics
    let me: serde_json::Value = client
        .get(format!("{}/api/profile/me", address))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Profile failed")
        .json()
        .await
        .unwrap();

    assert_eq!(me["quiz_stats"]["total_quizzes"].as_i64().unwrap(), 1);
    assert_eq!(me["quiz_stats"]["best_score"].as_i64().unwrap(), total as i64);
    assert_eq!(me["quiz_stats"]["average_percent"].as_i64().unwrap(), 100);
}

#[tokio::test]
async fn test_quiz_rejects_unknown_label() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    seed_questions(&database_url).await;
    let (_, token) = register_and_login(&client, &address).await;

    let start: serde_json::Value = client
        .post(format!("{}/api/quiz/start", address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let session_id = start["session_id"].as_str().unwrap();

    let response = client
        .post(format!("{}/api/quiz/{}/answer", address, session_id))
        .bearer_auth(&token)
        .json(&serde_json::json!({ "label": "option_e" }))
        .send()
        .await
        .unwrap();

    // Labels are a closed enum; anything else fails deserialization.
    assert_eq!(response.status().as_u16(), 422);
}

#[tokio::test]
async fn test_quiz_session_is_owner_scoped() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    seed_questions(&database_url).await;
    let (_, owner_token) = register_and_login(&client, &address).await;
    let (_, other_token) = register_and_login(&client, &address).await;

    let start: serde_json::Value = client
        .post(format!("{}/api/quiz/start", address))
        .bearer_auth(&owner_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let session_id = start["session_id"].as_str().unwrap();

    // Another authenticated user holding the session id cannot read,
    // advance, or delete it; the session looks like it does not exist.
    let read = client
        .get(format!("{}/api/quiz/{}", address, session_id))
        .bearer_auth(&other_token)
        .send()
        .await
        .unwrap();
    assert_eq!(read.status().as_u16(), 404);

    let advance = client
        .post(format!("{}/api/quiz/{}/advance", address, session_id))
        .bearer_auth(&other_token)
        .send()
        .await
        .unwrap();
    assert_eq!(advance.status().as_u16(), 404);

    let delete = client
        .delete(format!("{}/api/quiz/{}", address, session_id))
        .bearer_auth(&other_token)
        .send()
        .await
        .unwrap();
    assert_eq!(delete.status().as_u16(), 404);

    // The owner is unaffected.
    let read = client
        .get(format!("{}/api/quiz/{}", address, session_id))
        .bearer_auth(&owner_token)
        .send()
        .await
        .unwrap();
    assert_eq!(read.status().as_u16(), 200);
}

#[tokio::test]
async fn test_completed_session_is_evicted() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    seed_questions(&database_url).await;
    let (_, token) = register_and_login(&client, &address).await;

    let start: serde_json::Value = client
        .post(format!("{}/api/quiz/start", address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let session_id = start["session_id"].as_str().unwrap();
    let total = start["total_questions"].as_u64().unwrap();

    // Advance straight through without answering.
    let mut last = serde_json::Value::Null;
    for _ in 0..total {
        last = client
            .post(format!("{}/api/quiz/{}/advance", address, session_id))
            .bearer_auth(&token)
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
    }
    assert_eq!(last["score"].as_u64().unwrap(), 0);
    assert_eq!(last["saved"], true);

    // The completing response carries the full results view; the map
    // entry is gone, so reads and replayed advances now 404 and cannot
    // double-insert a result.
    let read = client
        .get(format!("{}/api/quiz/{}", address, session_id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(read.status().as_u16(), 404);

    let replay = client
        .post(format!("{}/api/quiz/{}/advance", address, session_id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(replay.status().as_u16(), 404);
}

#[tokio::test]
async fn test_stale_tick_is_dropped() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    seed_questions(&database_url).await;
    let (_, token) = register_and_login(&client, &address).await;

    let start: serde_json::Value = client
        .post(format!("{}/api/quiz/start", address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let session_id = start["session_id"].as_str().unwrap();

    // A tick for question 3 while question 0 is current must not count.
    let view: serde_json::Value = client
        .post(format!("{}/api/quiz/{}/tick", address, session_id))
        .bearer_auth(&token)
        .json(&serde_json::json!({ "question_index": 3 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(view["seconds_remaining"].as_u64().unwrap(), 30);

    // A tick for the current question does.
    let view: serde_json::Value = client
        .post(format!("{}/api/quiz/{}/tick", address, session_id))
        .bearer_auth(&token)
        .json(&serde_json::json!({ "question_index": 0 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(view["seconds_remaining"].as_u64().unwrap(), 29);
}

#[tokio::test]
async fn test_chat_flow() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let (_, token) = register_and_login(&client, &address).await;

    // 1. A greeting gets the greeting response, persisted
    let hello: serde_json::Value = client
        .post(format!("{}/api/chat/messages", address))
        .bearer_auth(&token)
        .json(&serde_json::json!({ "message": "hello" }))
        .send()
        .await
        .expect("Send failed")
        .json()
        .await
        .unwrap();

    assert_eq!(hello["persisted"], true);
    assert!(
        hello["message"]["answer"]
            .as_str()
            .unwrap()
            .starts_with("Hello there, space explorer!")
    );

    // 2. Hindi mode substitutes the domain terms
    let mars: serde_json::Value = client
        .post(format!("{}/api/chat/messages", address))
        .bearer_auth(&token)
        .json(&serde_json::json!({ "message": "Tell me about Mars", "language": "hindi" }))
        .send()
        .await
        .expect("Send failed")
        .json()
        .await
        .unwrap();

    let answer = mars["message"]["answer"].as_str().unwrap();
    assert!(answer.contains("मंगल"));
    assert!(!answer.contains("Mars"));

    // 3. History returns both, oldest first
    let history: Vec<serde_json::Value> = client
        .get(format!("{}/api/chat/messages", address))
        .bearer_auth(&token)
        .send()
        .await
        .expect("History failed")
        .json()
        .await
        .unwrap();

    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["question"], "hello");
    assert_eq!(history[1]["question"], "Tell me about Mars");
}

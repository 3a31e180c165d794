// tests/api_tests.rs

use std::sync::Arc;
use std::time::Duration;

use pharmasol_backend::{
    ai::OfflineTutor,
    attempt::registry::SessionRegistry,
    config::Config,
    models::user::Role,
    routes,
    state::AppState,
    store::{MemoryStore, users::NewUser},
    utils::hash::hash_password,
};

pub const ADMIN_EMAIL: &str = "admin@pharma.test";
pub const ADMIN_PASSWORD: &str = "admin-password";

fn test_config() -> Config {
    Config {
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600, // 10 minutes for tests
        rust_log: "error".to_string(),
        store_latency_ms: 0,
        tutor_api_key: None,
        tutor_endpoint: String::new(),
        admin_name: None,
        admin_email: None,
        admin_password: None,
    }
}

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
///
/// The store starts empty apart from one seeded admin account; latency
/// simulation is disabled.
async fn spawn_app() -> String {
    let store = Arc::new(MemoryStore::new(Duration::ZERO));

    store
        .create_user(NewUser {
            name: "System Admin".to_string(),
            email: ADMIN_EMAIL.to_string(),
            password_hash: hash_password(ADMIN_PASSWORD).expect("hash admin password"),
            role: Role::Admin,
            program: None,
            is_verified: true,
        })
        .await
        .expect("seed admin");

    let sessions = Arc::new(SessionRegistry::new(Arc::clone(&store)));

    let state = AppState {
        store,
        sessions,
        tutor: Arc::new(OfflineTutor),
        config: test_config(),
    };

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

#[tokio::test]
async fn health_check_404() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(&format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn register_works() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .post(&format!("{}/api/auth/register", address))
        .json(&serde_json::json!({
            "name": "Aarav Student",
            "email": "aarav@pharma.test",
            "password": "password123",
            "role": "student",
            "program": "Bachelor"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 201);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["role"], "student");
    assert!(body.get("password_hash").is_none(), "hash must never leak");
}

#[tokio::test]
async fn register_fails_validation() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act: Send an invalid email
    let response = client
        .post(&format!("{}/api/auth/register", address))
        .json(&serde_json::json!({
            "name": "Aarav Student",
            "email": "not-an-email",
            "password": "password123",
            "role": "student"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn register_rejects_duplicate_email() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let payload = serde_json::json!({
        "name": "Aarav Student",
        "email": "dup@pharma.test",
        "password": "password123",
        "role": "student"
    });

    let first = client
        .post(&format!("{}/api/auth/register", address))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(first.status().as_u16(), 201);

    let second = client
        .post(&format!("{}/api/auth/register", address))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(second.status().as_u16(), 409);
}

#[tokio::test]
async fn register_rejects_admin_role() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(&format!("{}/api/auth/register", address))
        .json(&serde_json::json!({
            "name": "Sneaky",
            "email": "sneaky@pharma.test",
            "password": "password123",
            "role": "admin"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn login_returns_token_and_me_returns_profile() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let login = client
        .post(&format!("{}/api/auth/login", address))
        .json(&serde_json::json!({
            "email": ADMIN_EMAIL,
            "password": ADMIN_PASSWORD
        }))
        .send()
        .await
        .unwrap()
        .json::<serde_json::Value>()
        .await
        .unwrap();

    let token = login["token"].as_str().expect("Token not found");
    assert_eq!(login["user"]["role"], "admin");

    let me = client
        .get(&format!("{}/api/auth/me", address))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap();
    assert_eq!(me.status().as_u16(), 200);
    let me: serde_json::Value = me.json().await.unwrap();
    assert_eq!(me["email"], ADMIN_EMAIL);
}

#[tokio::test]
async fn login_rejects_wrong_password() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(&format!("{}/api/auth/login", address))
        .json(&serde_json::json!({
            "email": ADMIN_EMAIL,
            "password": "wrong-password"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(&format!("{}/api/results/mine", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn tutor_answers_in_offline_mode() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let login = client
        .post(&format!("{}/api/auth/login", address))
        .json(&serde_json::json!({
            "email": ADMIN_EMAIL,
            "password": ADMIN_PASSWORD
        }))
        .send()
        .await
        .unwrap()
        .json::<serde_json::Value>()
        .await
        .unwrap();
    let token = login["token"].as_str().unwrap();

    let response = client
        .post(&format!("{}/api/tutor/ask", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({ "question": "What is pharmacokinetics?" }))
        .send()
        .await
        .unwrap();

    // The collaborator never fails; offline mode still yields a reply.
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["reply"].as_str().unwrap().len() > 0);
}

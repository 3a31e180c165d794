// src/main.rs

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use dotenvy::dotenv;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use pharmasol_backend::ai::{GenerativeTutor, OfflineTutor, TutorService};
use pharmasol_backend::attempt::registry::SessionRegistry;
use pharmasol_backend::config::Config;
use pharmasol_backend::models::user::Role;
use pharmasol_backend::routes;
use pharmasol_backend::state::AppState;
use pharmasol_backend::store::MemoryStore;
use pharmasol_backend::store::users::NewUser;
use pharmasol_backend::utils::hash::hash_password;

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Initialize the in-memory store with the demo catalog
    let store = Arc::new(MemoryStore::with_demo_data(Duration::from_millis(
        config.store_latency_ms,
    )));
    tracing::info!("In-memory store initialized");

    // Seed Admin User
    if let Err(e) = seed_admin_user(&store, &config).await {
        tracing::error!("Failed to seed admin user: {:?}", e);
    }

    let sessions = Arc::new(SessionRegistry::new(Arc::clone(&store)));

    let tutor: Arc<dyn TutorService> = match config.tutor_api_key.clone() {
        Some(key) => Arc::new(GenerativeTutor::new(key, config.tutor_endpoint.clone())),
        None => {
            tracing::warn!("TUTOR_API_KEY not set, AI tutor runs in offline mode");
            Arc::new(OfflineTutor)
        }
    };

    // Create AppState
    let state = AppState {
        store,
        sessions,
        tutor,
        config,
    };

    // Create the Axum application router
    let app = routes::create_router(state);

    // Bind to the listening address
    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();

    // Start the server
    axum::serve(listener, app).await.unwrap();
}

async fn seed_admin_user(
    store: &MemoryStore,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    if let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) {
        if store.find_user_by_email(email).await.is_none() {
            tracing::info!("Seeding admin user: {}", email);
            let password_hash = hash_password(password)?;

            store
                .create_user(NewUser {
                    name: config
                        .admin_name
                        .clone()
                        .unwrap_or_else(|| "System Admin".to_string()),
                    email: email.clone(),
                    password_hash,
                    role: Role::Admin,
                    program: None,
                    is_verified: true,
                })
                .await?;
            tracing::info!("Admin user created successfully.");
        }
    }
    Ok(())
}

// src/config.rs

use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub rust_log: String,

    /// Base unit for the store's simulated network latency, in milliseconds.
    /// Individual operations sleep a small multiple of this. Zero disables it.
    pub store_latency_ms: u64,

    /// API key for the external text-completion service. When absent the
    /// tutor falls back to a canned offline reply.
    pub tutor_api_key: Option<String>,
    pub tutor_endpoint: String,

    pub admin_name: Option<String>,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        let jwt_expiration = env::var("JWT_EXPIRATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(86400);

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let store_latency_ms = env::var("STORE_LATENCY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(100);

        let tutor_api_key = env::var("TUTOR_API_KEY").ok();
        let tutor_endpoint = env::var("TUTOR_ENDPOINT").unwrap_or_else(|_| {
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
                .to_string()
        });

        Self {
            jwt_secret,
            jwt_expiration,
            rust_log,
            store_latency_ms,
            tutor_api_key,
            tutor_endpoint,
            admin_name: env::var("ADMIN_NAME").ok(),
            admin_email: env::var("ADMIN_EMAIL").ok(),
            admin_password: env::var("ADMIN_PASSWORD").ok(),
        }
    }
}

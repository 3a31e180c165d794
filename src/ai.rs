// src/ai.rs
//
// The AI tutor collaborator: an opaque external text-completion service.
// Input is a prompt string, output is a completion string; transport
// failures never reach the caller, a canned apology comes back instead.

use async_trait::async_trait;
use std::time::Duration;

const TUTOR_PREAMBLE: &str = "You are an expert pharmacology tutor for students in Nepal. \
Answer the following question clearly and concisely. \
If the question is not related to pharmacy, medicine, or science, politely decline.";

const FALLBACK_REPLY: &str =
    "Sorry, I'm having trouble connecting to the Pharma Brain right now.";

const EMPTY_REPLY: &str = "I couldn't generate a response. Please try again.";

#[async_trait]
pub trait TutorService: Send + Sync {
    /// Answers a student's question. Never fails; the implementation maps
    /// every error onto a user-facing fallback string.
    async fn ask(&self, question: &str) -> String;
}

/// Client for a Gemini-style `generateContent` endpoint.
pub struct GenerativeTutor {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl GenerativeTutor {
    pub fn new(api_key: String, endpoint: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            endpoint,
        }
    }

    async fn complete(&self, prompt: &str) -> Result<Option<String>, reqwest::Error> {
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .timeout(Duration::from_secs(30))
            .send()
            .await?
            .error_for_status()?;

        let payload: serde_json::Value = response.json().await?;
        Ok(payload
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(|t| t.as_str())
            .map(|t| t.to_string()))
    }
}

#[async_trait]
impl TutorService for GenerativeTutor {
    async fn ask(&self, question: &str) -> String {
        let prompt = format!("{TUTOR_PREAMBLE}\n\nQuestion: {question}");
        match self.complete(&prompt).await {
            Ok(Some(text)) => text,
            Ok(None) => EMPTY_REPLY.to_string(),
            Err(e) => {
                tracing::warn!("tutor completion failed: {e}");
                FALLBACK_REPLY.to_string()
            }
        }
    }
}

/// Stand-in used when no API key is configured (and in tests).
pub struct OfflineTutor;

#[async_trait]
impl TutorService for OfflineTutor {
    async fn ask(&self, _question: &str) -> String {
        "The AI tutor is not configured on this server. Please ask your question on the doubt forum instead.".to_string()
    }
}

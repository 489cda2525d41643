use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::dispatch::AnswerSource;
use crate::error::AskError;

pub const DEFAULT_API_URL: &str = "https://cv-assistant-duuy.onrender.com/ask";

/// Longest error body kept in an [`AskError::Status`]
const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Serialize)]
struct AskRequest<'a> {
    question: &'a str,
}

#[derive(Deserialize)]
struct AskResponse {
    answer: Option<String>,
}

/// HTTP client for the remote answer service
#[derive(Clone, Debug)]
pub struct AskClient {
    client: Client,
    endpoint: String,
}

impl AskClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST `{"question": ...}` and read back `{"answer": ...}`.
    /// One attempt only; no retry and no client-side timeout.
    pub async fn post_question(&self, question: &str) -> Result<String, AskError> {
        tracing::debug!(endpoint = %self.endpoint, "posting question");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&AskRequest { question })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AskError::Status {
                status,
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let parsed: AskResponse = serde_json::from_str(&body)?;
        parsed.answer.ok_or(AskError::MissingAnswer)
    }
}

#[async_trait]
impl AnswerSource for AskClient {
    async fn ask(&self, question: &str) -> Result<String, AskError> {
        self.post_question(question).await
    }
}

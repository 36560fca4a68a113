use reqwest::Client;
use std::env;
use thiserror::Error;
use tracing::{debug, warn};

use super::endpoints::{ChatCompletionRequest, ChatCompletionResponse};

const APP_NAME: &str = "RecipePlanner";

#[derive(Debug, Error)]
pub enum ApiConnectionError {
    #[error("API key not found in environment: {0}")]
    MissingApiKey(String),
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("API error {status}: {error_body}")]
    ApiError {
        status: reqwest::StatusCode,
        error_body: String,
    },
    #[error("No response choices received from API")]
    NoChoices,
    #[error("API returned empty content")]
    EmptyContent,
}

/// Client for an OpenAI-compatible chat-completions endpoint.
///
/// The credential is looked up by variable name on every call so a missing
/// key is reported as a call failure rather than at construction.
#[derive(Debug, Clone)]
pub struct ChatClient {
    endpoint: String,
    api_key_env_var: String,
    client: Client,
}

impl ChatClient {
    pub fn new(endpoint: impl Into<String>, api_key_env_var: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key_env_var: api_key_env_var.into(),
            client: Client::new(),
        }
    }

    pub async fn call_chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ApiConnectionError> {
        let api_key = env::var(&self.api_key_env_var)
            .map_err(|_| ApiConnectionError::MissingApiKey(self.api_key_env_var.clone()))?;

        debug!(endpoint = %self.endpoint, model = %request.model, "sending chat completion");
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .header("X-Title", APP_NAME)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(response.json::<ChatCompletionResponse>().await?)
        } else {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            warn!(%status, "chat completion rejected");
            Err(ApiConnectionError::ApiError { status, error_body })
        }
    }
}

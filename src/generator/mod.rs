//! Recipe generation through a chat-completions model.

pub mod connection;
pub mod decode;
pub mod endpoints;
pub mod prompt;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::GeneratorConfig;
use crate::recipe::Recipe;
use connection::{ApiConnectionError, ChatClient};
use endpoints::{ChatCompletionRequest, ChatMessage, ResponseFormat};

pub const KNOWN_CUISINES: &[&str] = &[
    "North Indian",
    "South Indian",
    "Gujarati",
    "Bengali",
    "Punjabi",
];

pub const KNOWN_DIETS: &[&str] = &["Vegan", "Gluten-Free", "Jain"];

/// A cuisine or diet constraint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    Any,
    Named(String),
}

impl Filter {
    pub fn name(&self) -> Option<&str> {
        match self {
            Filter::Any => None,
            Filter::Named(name) => Some(name),
        }
    }
}

impl FromStr for Filter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("any") {
            Ok(Filter::Any)
        } else {
            Ok(Filter::Named(trimmed.to_string()))
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Any => f.write_str("any"),
            Filter::Named(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchFilters {
    pub cuisine: Filter,
    pub diet: Filter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub pantry_items: Vec<String>,
    pub filters: SearchFilters,
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Failed to generate recipes. Please check your API key and try again.")]
    Connection(#[from] ApiConnectionError),
}

/// Produces candidate recipes for a pantry. Returned recipes carry fresh ids
/// and no match score.
#[async_trait]
pub trait RecipeGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<Recipe>, GenerationError>;
}

pub struct ChatCompletionGenerator {
    client: ChatClient,
    config: GeneratorConfig,
}

impl ChatCompletionGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            client: ChatClient::new(config.endpoint.clone(), config.api_key_env_var.clone()),
            config,
        }
    }

    fn chat_request(&self, request: &GenerationRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system("You are a recipe generation assistant. Output JSON."),
                ChatMessage::user(prompt::build_prompt(request, self.config.recipe_count)),
            ],
            response_format: Some(ResponseFormat::json_schema(prompt::recipe_batch_schema())),
            temperature: Some(self.config.temperature),
            max_tokens: Some(self.config.max_tokens),
        }
    }
}

#[async_trait]
impl RecipeGenerator for ChatCompletionGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<Recipe>, GenerationError> {
        info!(
            pantry_items = request.pantry_items.len(),
            cuisine = %request.filters.cuisine,
            diet = %request.filters.diet,
            "requesting recipes"
        );
        let response = self
            .client
            .call_chat_completion(&self.chat_request(request))
            .await?;

        if response.choices.is_empty() {
            return Err(ApiConnectionError::NoChoices.into());
        }
        let content = response.first_content().unwrap_or_default();
        debug!(content, "raw model output");

        let batch = Uuid::new_v4().simple().to_string();
        let recipes = decode::decode_recipes(content, &batch)?;
        info!(count = recipes.len(), "recipes generated");
        Ok(recipes)
    }
}

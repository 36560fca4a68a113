use std::env;

use thiserror::Error;

use crate::generator::endpoints::{default_model, DEFAULT_ENDPOINT};
use crate::session::User;

pub const API_KEY_ENV_VAR: &str = "OPENROUTER_API_KEY";
pub const ENDPOINT_ENV_VAR: &str = "RECIPE_PLANNER_ENDPOINT";
pub const MODEL_ENV_VAR: &str = "RECIPE_PLANNER_MODEL";
pub const RECIPE_COUNT_ENV_VAR: &str = "RECIPE_PLANNER_RECIPE_COUNT";

pub const DEFAULT_PANTRY: &[&str] = &[
    "onions",
    "tomatoes",
    "ginger",
    "garlic",
    "potatoes",
    "rice",
    "turmeric powder",
    "lentils",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Name of the variable holding the credential, not the credential.
    pub api_key_env_var: String,
    pub endpoint: String,
    pub model: String,
    pub recipe_count: u32,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_key_env_var: API_KEY_ENV_VAR.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: default_model().to_string(),
            recipe_count: 5,
            temperature: 0.7,
            max_tokens: 4096,
        }
    }
}

impl GeneratorConfig {
    /// Reads overrides from the process environment. Call `dotenv` first if
    /// a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(endpoint) = lookup(ENDPOINT_ENV_VAR).filter(|v| !v.trim().is_empty()) {
            config.endpoint = endpoint.trim().to_string();
        }
        if let Some(model) = lookup(MODEL_ENV_VAR).filter(|v| !v.trim().is_empty()) {
            config.model = model.trim().to_string();
        }
        if let Some(raw) = lookup(RECIPE_COUNT_ENV_VAR) {
            config.recipe_count = match raw.trim().parse::<u32>() {
                Ok(count) if count > 0 => count,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: RECIPE_COUNT_ENV_VAR,
                        value: raw,
                        reason: "expected a positive integer",
                    })
                }
            };
        }
        Ok(config)
    }
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub seed_pantry: Vec<String>,
    pub user: Option<User>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed_pantry: DEFAULT_PANTRY.iter().map(|item| item.to_string()).collect(),
            user: None,
        }
    }
}

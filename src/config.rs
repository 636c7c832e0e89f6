use std::env;

use crate::llm::{DEFAULT_API_BASE, DEFAULT_MODEL};

/// Runtime configuration, read from the environment. The API key is held in
/// memory only and is never written anywhere.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            api_key: env::var("TOGETHER_API_KEY").ok().filter(|k| !k.is_empty()),
            model: env::var("DATALENS_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            api_base: env::var("DATALENS_API_BASE")
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
        }
    }
}

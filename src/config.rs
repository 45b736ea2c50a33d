// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{ProxyError, Result};
use crate::utils::validation::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const PRODUCTION_ENVIRONMENT: &str = "production";

const DEFAULT_SEARCH_ENDPOINT: &str = "https://discoveryengine.googleapis.com/v1alpha/projects/345518488840/locations/global/collections/default_collection/engines/abcall-search-issues_1731299780547/servingConfigs/default_search:search";

const DEFAULT_SYSTEM_PROMPT: &str = "Eres un asistente técnico experto en soporte de incidentes. Responde de forma clara, breve y en español, proponiendo pasos concretos para resolver el problema descrito por el usuario.";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub credentials: CredentialsConfig,
    pub search: SearchConfig,
    pub chat: ChatConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,
}

fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CredentialsConfig {
    /// `production` selects ambient workload identity, anything else the key file.
    pub environment: String,
    pub service_account_file: PathBuf,
    pub scope: String,
    pub metadata_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    pub endpoint: String,
    pub page_size: usize,
    pub max_results: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatConfig {
    pub endpoint: String,
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    pub model: String,
    pub system_prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

impl CredentialsConfig {
    pub fn is_production(&self) -> bool {
        self.environment == PRODUCTION_ENVIRONMENT
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("ANALITICA")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| ProxyError::Config(e.to_string()))?;

        let mut config: Config = settings
            .try_deserialize()
            .map_err(|e| ProxyError::Config(e.to_string()))?;

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        let mut config = Self::builtin();
        config.apply_env_overrides();
        config
    }

    fn builtin() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                cors_allowed_origins: default_cors_origins(),
            },
            credentials: CredentialsConfig {
                environment: "development".to_string(),
                service_account_file: PathBuf::from("service-account.json"),
                scope: "https://www.googleapis.com/auth/cloud-platform".to_string(),
                metadata_url: "http://metadata.google.internal".to_string(),
            },
            search: SearchConfig {
                endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
                page_size: 10,
                max_results: 5,
            },
            chat: ChatConfig {
                endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
                api_key: None,
                model: "gpt-3.5-turbo".to_string(),
                system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
                temperature: 0.7,
                max_tokens: 256,
                top_p: 1.0,
                frequency_penalty: 0.0,
                presence_penalty: 0.0,
            },
        }
    }

    /// `ENV` and `OPENAI_API_KEY` win over every other source.
    fn apply_env_overrides(&mut self) {
        if let Ok(environment) = std::env::var("ENV") {
            self.credentials.environment = environment;
        }
        if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
            if !api_key.is_empty() {
                self.chat.api_key = Some(api_key);
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        Validator::validate_port(self.server.port)?;
        Validator::validate_url(&self.credentials.metadata_url)?;
        Validator::validate_url(&self.search.endpoint)?;
        Validator::validate_url(&self.chat.endpoint)?;

        if self.search.page_size == 0 {
            return Err(ProxyError::Config(
                "search.page_size must be greater than 0".to_string(),
            ));
        }

        if self.search.max_results == 0 || self.search.max_results > self.search.page_size {
            return Err(ProxyError::Config(format!(
                "search.max_results must be between 1 and page_size ({})",
                self.search.page_size
            )));
        }

        if !(0.0..=2.0).contains(&self.chat.temperature) {
            return Err(ProxyError::Config(
                "chat.temperature must be within [0, 2]".to_string(),
            ));
        }

        if self.chat.max_tokens == 0 {
            return Err(ProxyError::Config(
                "chat.max_tokens must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

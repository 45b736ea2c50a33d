// file: src/proxy/chat.rs
// description: forwards queries to the chat-completion engine with a fixed system prompt
// reference: https://platform.openai.com/docs/api-reference/chat

use crate::config::ChatConfig;
use crate::error::{ProxyError, Result};
use crate::models::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatReply, Query};
use crate::utils::Validator;
use reqwest::Client;
use tracing::{debug, warn};

pub struct ChatProxy {
    client: Client,
    config: ChatConfig,
}

impl ChatProxy {
    pub fn new(client: Client, config: ChatConfig) -> Self {
        Self { client, config }
    }

    /// Every failure, whatever its cause, comes back as `ProxyError::Chat`.
    pub async fn generate(&self, query: &Query) -> Result<ChatReply> {
        self.complete(query.as_str()).await.map_err(|message| {
            warn!("Chat completion failed: {}", message);
            ProxyError::Chat(message)
        })
    }

    async fn complete(&self, text: &str) -> std::result::Result<ChatReply, String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| "no API key configured (set OPENAI_API_KEY)".to_string())?;

        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage::system(&self.config.system_prompt),
                ChatMessage::user(text),
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            top_p: self.config.top_p,
            frequency_penalty: self.config.frequency_penalty,
            presence_penalty: self.config.presence_penalty,
        };

        debug!(
            "Requesting completion from {} for {} chars",
            self.config.model,
            text.len()
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| format!("Failed to send request: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(format!(
                "Error code: {} - {}",
                status.as_u16(),
                Validator::truncate_text(&error_text, 500)
            ));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))?;

        completion
            .into_first_content()
            .map(|response| ChatReply { response })
            .ok_or_else(|| "No completion returned".to_string())
    }
}

//! Async LLM client for narrative text generation
//!
//! A model-agnostic HTTP client supporting both Anthropic and
//! OpenAI-compatible chat APIs. The model writes flavor prose only;
//! it never decides simulation outcomes.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::core::error::{GameError, Result};
use crate::core::types::Faction;
use crate::narrative::{NarrationFuture, Narrator};

/// API format type
#[derive(Debug, Clone, PartialEq)]
pub enum ApiFormat {
    Anthropic,
    OpenAI,
}

/// Narrative client backed by a hosted language model
#[derive(Clone)]
pub struct LlmNarrator {
    client: Client,
    api_key: String,
    api_url: String,
    model: String,
    api_format: ApiFormat,
}

const SYSTEM_PROMPT: &str = "You are a terse Roman chronicler of the Punic Wars. \
    Write two or three vivid sentences in the style of a period annalist. \
    Never contradict the facts you are given.";

impl LlmNarrator {
    /// Create a new narrator with explicit configuration
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        let api_format = Self::detect_api_format(&api_url);
        Self {
            client: Client::new(),
            api_key,
            api_url,
            model,
            api_format,
        }
    }

    /// Detect API format from URL
    fn detect_api_format(url: &str) -> ApiFormat {
        if url.contains("anthropic.com") {
            ApiFormat::Anthropic
        } else {
            ApiFormat::OpenAI
        }
    }

    /// Create a narrator from environment variables
    ///
    /// Required: LLM_API_KEY
    /// Optional: LLM_API_URL (defaults to Anthropic API)
    /// Optional: LLM_MODEL (defaults to claude-3-haiku-20240307)
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("LLM_API_KEY")
            .map_err(|_| GameError::Narrative("LLM_API_KEY not set".into()))?;
        let api_url = std::env::var("LLM_API_URL")
            .unwrap_or_else(|_| "https://api.anthropic.com/v1/messages".into());
        let model = std::env::var("LLM_MODEL").unwrap_or_else(|_| "claude-3-haiku-20240307".into());

        Ok(Self::new(api_key, api_url, model))
    }

    async fn complete(&self, user: String) -> Result<String> {
        match self.api_format {
            ApiFormat::Anthropic => self.complete_anthropic(user).await,
            ApiFormat::OpenAI => self.complete_openai(user).await,
        }
    }

    async fn complete_anthropic(&self, user: String) -> Result<String> {
        let request = AnthropicRequest {
            model: self.model.clone(),
            max_tokens: 512,
            system: SYSTEM_PROMPT.into(),
            messages: vec![Message {
                role: "user".into(),
                content: user,
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| GameError::Narrative(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GameError::Narrative(format!("API error: {}", error_text)));
        }

        let completion: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| GameError::Narrative(e.to_string()))?;

        completion
            .content
            .first()
            .map(|c| c.text.clone())
            .ok_or_else(|| GameError::Narrative("Empty response".into()))
    }

    async fn complete_openai(&self, user: String) -> Result<String> {
        let request = OpenAIRequest {
            model: self.model.clone(),
            max_tokens: 512,
            messages: vec![
                Message {
                    role: "system".into(),
                    content: SYSTEM_PROMPT.into(),
                },
                Message {
                    role: "user".into(),
                    content: user,
                },
            ],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| GameError::Narrative(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GameError::Narrative(format!("API error: {}", error_text)));
        }

        let completion: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| GameError::Narrative(e.to_string()))?;

        completion
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or_else(|| GameError::Narrative("Empty response".into()))
    }
}

impl Narrator for LlmNarrator {
    fn report_battle(
        &self,
        location: String,
        winner: Faction,
        loser: Faction,
    ) -> NarrationFuture {
        let narrator = self.clone();
        Box::pin(async move {
            let prompt = format!(
                "Report this battle: the forces of {} defeated the forces of {} at {}.",
                winner, loser, location
            );
            narrator.complete(prompt).await
        })
    }

    fn report_yearly(&self, summary: String) -> NarrationFuture {
        let narrator = self.clone();
        Box::pin(async move {
            let prompt = format!(
                "Winter has passed. Summarize the state of the war for the new \
                 campaign season. The facts: {}",
                summary
            );
            narrator.complete(prompt).await
        })
    }
}

// Anthropic API format
#[derive(Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    system: String,
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

// OpenAI-compatible API format
#[derive(Serialize)]
struct OpenAIRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

// Shared
#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let narrator = LlmNarrator::new(
            "test-key".into(),
            "https://api.example.com".into(),
            "test-model".into(),
        );
        assert_eq!(narrator.api_key, "test-key");
        assert_eq!(narrator.api_format, ApiFormat::OpenAI);

        let narrator = LlmNarrator::new(
            "test-key".into(),
            "https://api.anthropic.com/v1/messages".into(),
            "test-model".into(),
        );
        assert_eq!(narrator.api_format, ApiFormat::Anthropic);
    }
}

//! Conversational fallback - one blocking OpenAI-compatible completion
//!
//! No history is kept: every request carries the persona and the single
//! user utterance, matching the one-shot turn model of the session loop.

use crate::config::ChatConfig;
use anyhow::Context;
use serde_json::{Value, json};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Remote chat capability. Optional: the dispatcher degrades gracefully
/// when none is configured.
pub trait ChatBackend {
    fn complete(&self, system_prompt: &str, user_text: &str) -> anyhow::Result<String>;
}

pub struct OpenAiChat {
    client: reqwest::blocking::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl OpenAiChat {
    /// Build a backend from config, or `None` when no API key is configured.
    pub fn from_config(config: &ChatConfig) -> anyhow::Result<Option<Self>> {
        if config.api_key.is_empty() {
            return Ok(None);
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("could not build HTTP client")?;
        Ok(Some(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        }))
    }
}

impl ChatBackend for OpenAiChat {
    fn complete(&self, system_prompt: &str, user_text: &str) -> anyhow::Result<String> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_text },
            ],
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .context("chat request failed")?
            .error_for_status()
            .context("chat request rejected")?;

        let reply: Value = response.json().context("chat response was not JSON")?;
        extract_reply(&reply)
    }
}

/// Pull the assistant text out of a chat-completions response.
fn extract_reply(response: &Value) -> anyhow::Result<String> {
    response["choices"][0]["message"]["content"]
        .as_str()
        .map(|content| content.trim().to_string())
        .context("chat response had no message content")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_trimmed_content() {
        let response = json!({
            "choices": [
                { "message": { "role": "assistant", "content": "  Hello there. \n" } }
            ]
        });
        assert_eq!(extract_reply(&response).unwrap(), "Hello there.");
    }

    #[test]
    fn test_missing_content_is_an_error() {
        assert!(extract_reply(&json!({ "choices": [] })).is_err());
        assert!(extract_reply(&json!({})).is_err());
    }

    #[test]
    fn test_no_key_means_no_backend() {
        let config = ChatConfig {
            base_url: "https://api.openai.com/v1".into(),
            model: "gpt-4o-mini".into(),
            api_key: String::new(),
        };
        assert!(OpenAiChat::from_config(&config).unwrap().is_none());
    }

    #[test]
    fn test_key_enables_backend_and_trims_base_url() {
        let config = ChatConfig {
            base_url: "http://localhost:1234/v1/".into(),
            model: "qwen".into(),
            api_key: "sk-test".into(),
        };
        let backend = OpenAiChat::from_config(&config).unwrap().unwrap();
        assert_eq!(backend.base_url, "http://localhost:1234/v1");
    }
}

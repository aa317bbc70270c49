//! HTTP text-generation client for the delegated strategy.
//!
//! Speaks a messages-style JSON API: one user message in, a list of text
//! content blocks out.

use std::fmt;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use td_extract::{ServiceError, TextGenerationService};
use tracing::debug;

use crate::config::ServiceConfig;
use crate::error::{AppError, AppResult};

const API_VERSION: &str = "2023-06-01";

/// Messages API request body
#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

/// Messages API response body
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

/// Text-generation service reached over HTTP.
#[derive(Clone)]
pub struct HttpTextService {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    max_tokens: u32,
}

impl HttpTextService {
    /// Build a client from configuration. The API key is passed separately
    /// so callers decide where it comes from.
    pub fn new(config: &ServiceConfig, api_key: String) -> AppResult<Self> {
        if api_key.is_empty() {
            return Err(AppError::Config("API key is empty".to_string()));
        }

        // Client-side timeout backs up the extractor's own deadline.
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| AppError::Http(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key,
            max_tokens: config.max_tokens,
        })
    }

    /// Build from configuration, reading the key from its environment variable.
    pub fn from_config(config: &ServiceConfig) -> AppResult<Self> {
        Self::new(config, config.api_key()?)
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerationService for HttpTextService {
    async fn generate(&self, prompt: &str) -> Result<String, ServiceError> {
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };

        debug!(endpoint = %self.endpoint, model = %self.model, "sending generation request");

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| ServiceError::Request {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => unreadable_body(&e),
            };
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: MessagesResponse =
            response.json().await.map_err(|e| ServiceError::Request {
                message: e.to_string(),
            })?;

        extract_text(parsed).ok_or(ServiceError::EmptyResponse)
    }

    fn name(&self) -> &str {
        &self.model
    }
}

impl fmt::Debug for HttpTextService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTextService")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &"***")
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

/// Stand-in body text when an error response cannot be read.
fn unreadable_body(err: &dyn fmt::Display) -> String {
    format!("<unreadable body: {err}>")
}

/// Concatenate the text blocks of a reply; `None` when there is no text.
fn extract_text(response: MessagesResponse) -> Option<String> {
    let text: String = response
        .content
        .into_iter()
        .filter_map(|block| block.text)
        .collect::<Vec<_>>()
        .join("");
    if text.trim().is_empty() { None } else { Some(text) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_client_keeps_config() {
        let config = ServiceConfig {
            model: "test-model".to_string(),
            ..ServiceConfig::default()
        };
        let service = HttpTextService::new(&config, "test-key".to_string()).unwrap();
        assert_eq!(service.model(), "test-model");
        assert_eq!(service.name(), "test-model");
        assert!(!format!("{:?}", service).contains("test-key"));
    }

    #[test]
    fn empty_key_rejected() {
        let err = HttpTextService::new(&ServiceConfig::default(), String::new()).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn request_body_shape() {
        let body = MessagesRequest {
            model: "m",
            max_tokens: 16,
            messages: [Message {
                role: "user",
                content: "hi",
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "m",
                "max_tokens": 16,
                "messages": [{"role": "user", "content": "hi"}]
            })
        );
    }

    #[test]
    fn text_blocks_are_joined() {
        let response: MessagesResponse = serde_json::from_str(
            r#"{"content": [{"type": "text", "text": "{\"components\": "}, {"type": "text", "text": "[]}"}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(response).as_deref(), Some("{\"components\": []}"));
    }

    #[test]
    fn unreadable_error_body_keeps_reason() {
        let body = unreadable_body(&"connection reset mid-body");
        assert_eq!(body, "<unreadable body: connection reset mid-body>");

        let err = ServiceError::Status { status: 502, body };
        assert!(err.to_string().contains("connection reset mid-body"));
    }

    #[test]
    fn no_text_is_empty() {
        let response: MessagesResponse = serde_json::from_str(r#"{"content": []}"#).unwrap();
        assert_eq!(extract_text(response), None);
    }
}

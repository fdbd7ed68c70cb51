//! REST client for the OpenAI-compatible `chat/completions` endpoint.

use serde::{Deserialize, Serialize};

use crate::config::TextGenConfig;

/// HTTP client for a single text-generation endpoint.
pub struct TextGenApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

/// Errors from the text-generation layer.
#[derive(Debug, thiserror::Error)]
pub enum TextGenError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint returned a non-2xx status code.
    #[error("Text generation API error ({status}): {body}")]
    ApiError {
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A 2xx response with no message content.
    #[error("Text generation API returned no choices")]
    EmptyReply,
}

// ----- Wire types -----

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl TextGenApi {
    /// Build a client from configuration.
    pub fn new(config: &TextGenConfig) -> Result<Self, TextGenError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, config))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: &TextGenConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    /// Send one user message and return the first choice's content.
    pub async fn chat(&self, prompt: &str) -> Result<String, TextGenError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let mut request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&body);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        tracing::debug!(model = %self.model, prompt_chars = prompt.len(), "Sending completion request");
        let response = request.send().await?;
        let parsed: ChatResponse = Self::parse_response(response).await?;
        extract_reply(parsed)
    }

    // ---- private helpers ----

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, TextGenError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(TextGenError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }
}

fn extract_reply(response: ChatResponse) -> Result<String, TextGenError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or(TextGenError::EmptyReply)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_has_single_user_message() {
        let body = ChatRequest {
            model: "m",
            messages: [ChatMessage {
                role: "user",
                content: "hi",
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"model": "m", "messages": [{"role": "user", "content": "hi"}]})
        );
    }

    #[test]
    fn first_choice_content_is_returned() {
        let parsed: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"Brand A wins"}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_reply(parsed).unwrap(), "Brand A wins");
    }

    #[test]
    fn no_choices_is_an_error() {
        let parsed: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(extract_reply(parsed), Err(TextGenError::EmptyReply)));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_request_error() {
        let config = TextGenConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            api_key: String::new(),
            model: "m".to_string(),
            timeout: Some(std::time::Duration::from_secs(2)),
        };
        let api = TextGenApi::new(&config).unwrap();
        assert!(matches!(api.chat("hi").await, Err(TextGenError::Request(_))));
    }
}

//! LLM Client — the single point of entry for all chat-completion calls.
//!
//! ARCHITECTURAL RULE: No other module may call the completion API directly.
//! Pipeline code talks to `ChatCompletion`; `OpenAiClient` is the production backend.
//!
//! Calls are made once. Faults are returned to the caller as-is and never retried.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod messages;
pub mod sanitize;

#[cfg(test)]
pub mod fake;

pub use messages::{Message, MessageListBuilder, Role};

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed completion response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// One outbound completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: &'static str,
    pub messages: Vec<Message>,
    /// Ask the service for a JSON object reply. The reply is still sanitized either way.
    pub json_output: bool,
    pub temperature: Option<f32>,
}

/// The completion collaborator: role-tagged messages in, one text reply out.
///
/// Carried in `Pipeline` as `Arc<dyn ChatCompletion>` so tests can swap in a scripted fake.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(&self, api_key: &str, request: &CompletionRequest)
        -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
/// The credential is supplied per call since requests may carry their own key.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
}

impl OpenAiClient {
    /// `timeout` bounds each call; `None` waits as long as the service does.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, LlmError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ChatCompletion for OpenAiClient {
    async fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<String, LlmError> {
        let body = ChatRequest {
            model: request.model,
            messages: &request.messages,
            response_format: request.json_output.then_some(ResponseFormat {
                kind: "json_object",
            }),
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            // Prefer the service's own error message when the envelope parses
            let message = serde_json::from_str::<OpenAiError>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat: ChatResponse = serde_json::from_str(&text)?;

        if let Some(usage) = &chat.usage {
            debug!(
                "Completion succeeded: model={}, prompt_tokens={}, completion_tokens={}",
                request.model, usage.prompt_tokens, usage.completion_tokens
            );
        }

        chat.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(LlmError::EmptyContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn request(json_output: bool) -> CompletionRequest {
        CompletionRequest {
            model: "gpt-4o-mini",
            messages: MessageListBuilder::new(Role::System, "be terse")
                .user("hello")
                .build(),
            json_output,
            temperature: None,
        }
    }

    fn client_for(server: &mockito::ServerGuard) -> OpenAiClient {
        OpenAiClient::new(server.url(), Some(Duration::from_secs(5))).unwrap()
    }

    #[tokio::test]
    async fn test_complete_sends_messages_and_returns_content() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(Matcher::PartialJson(json!({
                "model": "gpt-4o-mini",
                "messages": [
                    {"role": "system", "content": "be terse"},
                    {"role": "user", "content": "hello"}
                ],
                "response_format": {"type": "json_object"}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "choices": [{"message": {"role": "assistant", "content": "{\"ok\":true}"}}],
                    "usage": {"prompt_tokens": 10, "completion_tokens": 3}
                })
                .to_string(),
            )
            .create_async()
            .await;

        let reply = client_for(&server)
            .complete("sk-test", &request(true))
            .await
            .unwrap();

        assert_eq!(reply, r#"{"ok":true}"#);
        mock.assert_async().await;
    }

    #[test]
    fn test_plain_text_request_omits_response_format() {
        let body = serde_json::to_value(ChatRequest {
            model: "gpt-4o",
            messages: &request(false).messages,
            response_format: None,
            temperature: Some(1.0),
        })
        .unwrap();

        assert!(body.get("response_format").is_none());
        assert_eq!(body["temperature"], json!(1.0));
    }

    #[tokio::test]
    async fn test_api_error_surfaces_service_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body(json!({"error": {"message": "Incorrect API key provided"}}).to_string())
            .create_async()
            .await;

        let err = client_for(&server)
            .complete("sk-bad", &request(true))
            .await
            .unwrap_err();

        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_server_error_is_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(503)
            .with_body("upstream unavailable")
            .expect(1)
            .create_async()
            .await;

        let err = client_for(&server)
            .complete("sk-test", &request(true))
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::Api { status: 503, .. }));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_client_without_timeout_completes() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(json!({"choices": [{"message": {"content": "hi"}}]}).to_string())
            .create_async()
            .await;

        let reply = OpenAiClient::new(server.url(), None)
            .unwrap()
            .complete("sk-test", &request(false))
            .await
            .unwrap();

        assert_eq!(reply, "hi");
    }

    #[tokio::test]
    async fn test_missing_choices_is_empty_content() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(json!({"choices": []}).to_string())
            .create_async()
            .await;

        let err = client_for(&server)
            .complete("sk-test", &request(true))
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::EmptyContent));
    }
}

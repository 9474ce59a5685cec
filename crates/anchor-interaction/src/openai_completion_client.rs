//! OpenAICompletionClient - Chat Completions REST client.
//!
//! Sends the system prompt and conversation log to the chat-completions
//! endpoint and returns the first choice's text.

use anchor_core::completion::{CompletionClient, CompletionError, CompletionRequest};
use anchor_core::config::CompletionSettings;
use anchor_core::error::{AnchorError, Result};
use anchor_core::session::Message;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

/// `CompletionClient` backed by the OpenAI HTTP API.
#[derive(Clone)]
pub struct OpenAICompletionClient {
    client: Client,
    settings: CompletionSettings,
}

impl OpenAICompletionClient {
    /// Creates a client; fails when the API key is blank.
    pub fn new(settings: CompletionSettings) -> Result<Self> {
        if settings.api_key.trim().is_empty() {
            return Err(AnchorError::config("OpenAI API key is empty"));
        }

        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|err| AnchorError::config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self { client, settings })
    }

    fn build_body<'a>(&'a self, request: &'a CompletionRequest) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.settings.model,
            messages: request.messages(),
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        }
    }

    async fn send_request(
        &self,
        body: &ChatCompletionRequest<'_>,
    ) -> std::result::Result<String, CompletionError> {
        let response = self
            .client
            .post(&self.settings.base_url)
            .bearer_auth(&self.settings.api_key)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                CompletionError::Transport(format!("OpenAI API request failed: {err}"))
            })?;

        let status = response.status();
        let body_text = response.text().await.map_err(|err| {
            CompletionError::Transport(format!("Failed to read OpenAI response: {err}"))
        })?;

        if !status.is_success() {
            return Err(map_http_error(status, &body_text));
        }

        parse_completion(&body_text)
    }
}

#[async_trait]
impl CompletionClient for OpenAICompletionClient {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> std::result::Result<String, CompletionError> {
        let body = self.build_body(request);
        tracing::debug!(
            model = %self.settings.model,
            messages = body.messages.len(),
            "Sending chat completion request"
        );
        self.send_request(&body).await
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    max_tokens: u32,
    temperature: f64,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn parse_completion(body: &str) -> std::result::Result<String, CompletionError> {
    let parsed: ChatCompletionResponse = serde_json::from_str(body).map_err(|err| {
        CompletionError::MalformedResponse(format!("Failed to parse OpenAI response: {err}"))
    })?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| {
            CompletionError::MalformedResponse(
                "OpenAI API returned no content in the response".into(),
            )
        })
}

fn map_http_error(status: StatusCode, body: &str) -> CompletionError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or_else(|_| body.to_string());

    CompletionError::Upstream {
        status: status.as_u16(),
        message,
    }
}

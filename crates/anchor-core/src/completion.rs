//! Completion client seam.
//!
//! Defines the request the session controller sends upstream and the trait a
//! language-model backend implements to answer it.

use async_trait::async_trait;
use thiserror::Error;

use crate::prompt;
use crate::session::Message;

/// One chat-completion exchange: the system prompt followed by the full log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    messages: Vec<Message>,
}

impl CompletionRequest {
    /// Builds the request for the current conversation log.
    pub fn for_log(log: &[Message]) -> Self {
        let mut messages = Vec::with_capacity(log.len() + 1);
        messages.push(prompt::system_message());
        messages.extend(log.iter().cloned());
        Self { messages }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}

/// Ways a completion call can fail.
///
/// The session controller treats every variant the same way; the distinction
/// exists for logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    /// For backends that resolve credentials per call. The OpenAI client
    /// rejects a blank key at construction instead.
    #[error("API credential is missing: {0}")]
    MissingCredential(String),

    #[error("Request failed before a response arrived: {0}")]
    Transport(String),

    #[error("Upstream returned status {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),
}

/// A backend that turns a [`CompletionRequest`] into one assistant reply.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MessageRole;

    #[test]
    fn test_request_prepends_system_prompt() {
        let log = vec![prompt::greeting_message(), Message::user("work")];
        let request = CompletionRequest::for_log(&log);

        assert_eq!(request.messages().len(), 3);
        assert_eq!(request.messages()[0].role(), MessageRole::System);
        assert_eq!(request.messages()[0].content(), prompt::SYSTEM_PROMPT);
        assert_eq!(&request.messages()[1..], log.as_slice());
    }

    #[test]
    fn test_upstream_error_display() {
        let err = CompletionError::Upstream {
            status: 429,
            message: "rate limited".into(),
        };
        assert_eq!(err.to_string(), "Upstream returned status 429: rate limited");
    }
}

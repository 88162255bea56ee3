//! Chat-completions wire payloads and normalization into shared models.

use serde::{Deserialize, Serialize};

use crate::{CompletionRequest, CompletionResponse, FinishReason, ProviderError, TokenUsage};

/// Request body for `POST {base}/chat/completions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCompletionsRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub stream: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

impl ChatCompletionsRequest {
    /// An optional system message followed by exactly one user message.
    pub fn from_request(request: CompletionRequest, stream: bool) -> Self {
        let mut messages = Vec::with_capacity(2);
        if let Some(instruction) = request.system_instruction {
            messages.push(ChatMessage::system(instruction));
        }
        messages.push(ChatMessage::user(request.prompt));

        Self {
            model: request.model,
            messages,
            max_tokens: request.options.max_tokens,
            temperature: request.options.temperature,
            stream,
        }
    }
}

pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<ApiErrorEnvelope>(body).ok()?;
    parsed.error.message.filter(|message| !message.trim().is_empty())
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletionsResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<ApiChoice>,
    #[serde(default)]
    pub usage: Option<ApiUsage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiChoice {
    #[serde(default)]
    pub message: Option<ApiMessage>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

impl ChatCompletionsResponse {
    pub(crate) fn parse(status: u16, body: &str) -> Result<Self, ProviderError> {
        serde_json::from_str(body).map_err(|err| {
            ProviderError::api(status, format!("malformed completion response: {err}"))
        })
    }

    /// Keeps the first choice; a body without choices is an API error.
    pub(crate) fn normalize(
        self,
        status: u16,
        requested_model: &str,
    ) -> Result<CompletionResponse, ProviderError> {
        let choice = self.choices.into_iter().next().ok_or_else(|| {
            ProviderError::api(status, "completion response contained no choices")
        })?;

        let text = choice
            .message
            .and_then(|message| message.content)
            .unwrap_or_default();
        let usage = self.usage.unwrap_or_default();

        Ok(CompletionResponse::single(
            self.id.unwrap_or_default(),
            self.model
                .unwrap_or_else(|| requested_model.to_string()),
            text,
            FinishReason::parse(choice.finish_reason.as_deref()),
            TokenUsage {
                prompt_tokens: usage.prompt_tokens,
                completion_tokens: usage.completion_tokens,
                total_tokens: usage.total_tokens,
            },
        ))
    }
}

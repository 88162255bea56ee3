//! Provider-agnostic request and normalized response types.
//!
//! ```rust
//! use vprovider::{CompletionRequest, ProviderErrorKind};
//!
//! let ok = CompletionRequest::new("grok-1", "Summarize this diff")
//!     .with_system_instruction("Be brief.")
//!     .with_max_tokens(256);
//! assert!(ok.validate().is_ok());
//!
//! let err = CompletionRequest::new("grok-1", "   ")
//!     .validate()
//!     .expect_err("blank prompt should fail");
//! assert_eq!(err.kind, ProviderErrorKind::InvalidRequest);
//! ```

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use vcommon::GenerationOptions;

use crate::ProviderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProviderId {
    OpenAi,
    Anthropic,
    Google,
    DeepSeek,
    Qwen,
    Kimi,
    Meta,
    Xai,
}

impl ProviderId {
    pub const ALL: [ProviderId; 8] = [
        Self::OpenAi,
        Self::Anthropic,
        Self::Google,
        Self::DeepSeek,
        Self::Qwen,
        Self::Kimi,
        Self::Meta,
        Self::Xai,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Google => "google",
            Self::DeepSeek => "deepseek",
            Self::Qwen => "qwen",
            Self::Kimi => "kimi",
            Self::Meta => "meta",
            Self::Xai => "xai",
        }
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = ProviderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let key = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|provider| provider.as_str() == key)
            .ok_or_else(|| ProviderError::unknown_provider(value))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub system_instruction: Option<String>,
    pub options: GenerationOptions,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            system_instruction: None,
            options: GenerationOptions::default(),
        }
    }

    pub fn new_validated(
        model: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        let request = Self::new(model, prompt);
        request.validate()?;
        Ok(request)
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.options.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.options.max_tokens = max_tokens;
        self
    }

    pub fn enable_streaming(mut self) -> Self {
        self.options.stream = true;
        self
    }

    pub fn validate(&self) -> Result<(), ProviderError> {
        if self.model.trim().is_empty() {
            return Err(ProviderError::invalid_request("model must not be empty"));
        }

        if self.prompt.trim().is_empty() {
            return Err(ProviderError::invalid_request("prompt must not be empty"));
        }

        if self.options.max_tokens == 0 {
            return Err(ProviderError::invalid_request(
                "max_tokens must be greater than zero",
            ));
        }

        if !(0.0..=2.0).contains(&self.options.temperature) {
            return Err(ProviderError::invalid_request(
                "temperature must be in the inclusive range 0.0..=2.0",
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    ToolCalls,
    Other,
}

impl FinishReason {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("stop") => Self::Stop,
            Some("length") => Self::Length,
            Some("content_filter") => Self::ContentFilter,
            Some("tool_calls") => Self::ToolCalls,
            _ => Self::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stop => "stop",
            Self::Length => "length",
            Self::ContentFilter => "content_filter",
            Self::ToolCalls => "tool_calls",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionChoice {
    pub text: String,
    pub finish_reason: FinishReason,
}

/// Normalized completion envelope shared by every provider.
///
/// Always holds exactly one choice; construct it through [`CompletionResponse::single`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    pub id: String,
    pub model: String,
    pub choices: Vec<CompletionChoice>,
    pub usage: TokenUsage,
}

impl CompletionResponse {
    pub fn single(
        id: impl Into<String>,
        model: impl Into<String>,
        text: impl Into<String>,
        finish_reason: FinishReason,
        usage: TokenUsage,
    ) -> Self {
        Self {
            id: id.into(),
            model: model.into(),
            choices: vec![CompletionChoice {
                text: text.into(),
                finish_reason,
            }],
            usage,
        }
    }

    pub fn text(&self) -> &str {
        self.choices
            .first()
            .map(|choice| choice.text.as_str())
            .unwrap_or_default()
    }

    pub fn finish_reason(&self) -> FinishReason {
        self.choices
            .first()
            .map(|choice| choice.finish_reason)
            .unwrap_or(FinishReason::Other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProviderErrorKind;

    #[test]
    fn provider_id_round_trips_through_its_key() {
        for provider in ProviderId::ALL {
            let parsed: ProviderId = provider.as_str().parse().expect("key should parse");
            assert_eq!(parsed, provider);
            assert_eq!(provider.to_string(), provider.as_str());
        }

        assert_eq!(" XAI ".parse::<ProviderId>(), Ok(ProviderId::Xai));
        let error = "mistral".parse::<ProviderId>().expect_err("unknown key");
        assert_eq!(error.kind, ProviderErrorKind::UnknownProvider);
    }

    #[test]
    fn completion_request_validate_enforces_contract() {
        let empty_model = CompletionRequest::new("  ", "hi");
        assert_eq!(
            empty_model.validate().expect_err("empty model").kind,
            ProviderErrorKind::InvalidRequest
        );

        let zero_tokens = CompletionRequest::new("gpt-4o", "hi").with_max_tokens(0);
        assert!(zero_tokens.validate().is_err());

        let hot = CompletionRequest::new("gpt-4o", "hi").with_temperature(2.5);
        assert!(hot.validate().is_err());

        let cold = CompletionRequest::new("gpt-4o", "hi").with_temperature(0.0);
        assert!(cold.validate().is_ok());

        let streaming = CompletionRequest::new_validated("gpt-4o", "hi")
            .expect("valid request")
            .enable_streaming();
        assert!(streaming.options.stream);
    }

    #[test]
    fn finish_reason_parse_maps_known_values() {
        assert_eq!(FinishReason::parse(Some("stop")), FinishReason::Stop);
        assert_eq!(FinishReason::parse(Some("length")), FinishReason::Length);
        assert_eq!(
            FinishReason::parse(Some("content_filter")),
            FinishReason::ContentFilter
        );
        assert_eq!(FinishReason::parse(Some("end_turn")), FinishReason::Other);
        assert_eq!(FinishReason::parse(None), FinishReason::Other);
    }

    #[test]
    fn single_response_exposes_exactly_one_choice() {
        let response = CompletionResponse::single(
            "cmpl-1",
            "grok-1",
            "hello",
            FinishReason::Stop,
            TokenUsage::default(),
        );

        assert_eq!(response.choices.len(), 1);
        assert_eq!(response.text(), "hello");
        assert_eq!(response.finish_reason(), FinishReason::Stop);
    }
}

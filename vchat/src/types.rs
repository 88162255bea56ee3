//! Turn, snapshot, and chat option types.

use chrono::{DateTime, Utc};
use vcommon::{GenerationOptions, TurnId};
use vprovider::CompletionRequest;

use crate::ChatError;

pub const DEFAULT_SYSTEM_TEMPLATE: &str = "You are Virtue, a highly intelligent AI assistant using the {model} model. Maintain a professional tone.";
pub const DEFAULT_FAILURE_NOTICE: &str = "An error occurred. Please try again.";
const MODEL_PLACEHOLDER: &str = "{model}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }

    /// Speaker name shown in exported transcripts.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::User => "You",
            Self::Assistant => "Virtue",
        }
    }
}

/// One immutable transcript entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub id: TurnId,
    pub content: String,
    pub role: Role,
    pub model: String,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            id: TurnId::generate(),
            content: content.into(),
            role,
            model: model.into(),
            created_at: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self::new(Role::User, content, model)
    }

    pub fn assistant(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content, model)
    }

    pub fn with_id(mut self, id: impl Into<TurnId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatPhase {
    #[default]
    Idle,
    Sending,
    /// Idle again after the last turn failed.
    IdleWithError,
}

/// What subscribers observe: the phase, the committed turns, and the reply
/// text accumulated so far while a streaming turn is in flight.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatSnapshot {
    pub phase: ChatPhase,
    pub turns: Vec<Turn>,
    pub partial: Option<String>,
}

impl ChatSnapshot {
    pub fn is_sending(&self) -> bool {
        self.phase == ChatPhase::Sending
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    EmptyInput,
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Completed {
        user: Turn,
        reply: Turn,
    },
    /// The turn failed; `notice` is the generic assistant turn that was appended.
    Failed {
        user: Turn,
        notice: Turn,
        error: ChatError,
    },
    Ignored(IgnoreReason),
    /// `clear()` ran while the request was in flight.
    Cancelled,
}

impl SubmitOutcome {
    pub fn reply_text(&self) -> Option<&str> {
        match self {
            Self::Completed { reply, .. } => Some(reply.content.as_str()),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ChatError> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatOptions {
    /// `{model}` is replaced with the selected model id. `None` sends no
    /// system message.
    pub system_template: Option<String>,
    pub generation: GenerationOptions,
    pub failure_notice: String,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            system_template: Some(DEFAULT_SYSTEM_TEMPLATE.to_string()),
            generation: GenerationOptions::default(),
            failure_notice: DEFAULT_FAILURE_NOTICE.to_string(),
        }
    }
}

impl ChatOptions {
    pub fn with_system_template(mut self, template: impl Into<String>) -> Self {
        self.system_template = Some(template.into());
        self
    }

    pub fn without_system_instruction(mut self) -> Self {
        self.system_template = None;
        self
    }

    pub fn with_generation(mut self, generation: GenerationOptions) -> Self {
        self.generation = generation;
        self
    }

    pub fn with_streaming(mut self, stream: bool) -> Self {
        self.generation.stream = stream;
        self
    }

    pub fn enable_streaming(self) -> Self {
        self.with_streaming(true)
    }

    pub fn with_failure_notice(mut self, notice: impl Into<String>) -> Self {
        self.failure_notice = notice.into();
        self
    }

    pub fn system_instruction(&self, model_id: &str) -> Option<String> {
        self.system_template
            .as_ref()
            .map(|template| template.replace(MODEL_PLACEHOLDER, model_id))
    }

    pub fn request_for(&self, model_id: &str, prompt: &str) -> CompletionRequest {
        let request = CompletionRequest::new(model_id, prompt).with_options(self.generation);
        match self.system_instruction(model_id) {
            Some(instruction) => request.with_system_instruction(instruction),
            None => request,
        }
    }
}

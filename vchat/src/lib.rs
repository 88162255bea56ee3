//! Conversational orchestration over provider completion clients.
//!
//! [`ChatOrchestrator`] owns one conversation: it appends the user's turn,
//! routes the request to the provider serving the selected model, and records
//! either the reply or a generic failure notice. Subscribers observe every
//! change through a [`tokio::sync::watch`] channel of [`ChatSnapshot`]s.

mod error;
mod export;
mod orchestrator;
mod store;
mod types;

pub mod prelude {
    pub use crate::{
        ChatError, ChatErrorKind, ChatOptions, ChatOrchestrator, ChatPhase, ChatSnapshot,
        ExportFormat, IgnoreReason, InMemoryTranscriptStore, Role, SubmitOutcome,
        TranscriptStore, Turn,
    };
    pub use vcommon::{GenerationOptions, TurnId};
}

pub use error::{ChatError, ChatErrorKind};
pub use export::{DEFAULT_EXPORT_TITLE, ExportFormat, ExportedDocument, export_transcript};
pub use orchestrator::ChatOrchestrator;
pub use store::{ChatFuture, InMemoryTranscriptStore, TranscriptStore};
pub use types::{
    ChatOptions, ChatPhase, ChatSnapshot, DEFAULT_FAILURE_NOTICE, DEFAULT_SYSTEM_TEMPLATE,
    IgnoreReason, Role, SubmitOutcome, Turn,
};
pub use vcommon::{GenerationOptions, TurnId};

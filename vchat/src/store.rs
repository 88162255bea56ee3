//! Transcript storage contract and the in-memory implementation.

use std::sync::{Mutex, MutexGuard};

use vcommon::BoxFuture;

use crate::{ChatError, Turn};

pub type ChatFuture<'a, T> = BoxFuture<'a, T>;

/// Persistence collaborator for one conversation's transcript.
///
/// `list` returns turns in append order. `clear` removes every turn.
pub trait TranscriptStore: Send + Sync {
    fn append<'a>(&'a self, turn: Turn) -> ChatFuture<'a, Result<(), ChatError>>;

    fn list<'a>(&'a self) -> ChatFuture<'a, Result<Vec<Turn>, ChatError>>;

    fn clear<'a>(&'a self) -> ChatFuture<'a, Result<(), ChatError>>;
}

#[derive(Debug, Default)]
pub struct InMemoryTranscriptStore {
    turns: Mutex<Vec<Turn>>,
}

impl InMemoryTranscriptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a previously saved transcript.
    pub fn with_turns(turns: Vec<Turn>) -> Self {
        Self {
            turns: Mutex::new(turns),
        }
    }

    fn turns(&self) -> Result<MutexGuard<'_, Vec<Turn>>, ChatError> {
        self.turns
            .lock()
            .map_err(|_| ChatError::store("transcript store lock poisoned"))
    }
}

impl TranscriptStore for InMemoryTranscriptStore {
    fn append<'a>(&'a self, turn: Turn) -> ChatFuture<'a, Result<(), ChatError>> {
        Box::pin(async move {
            self.turns()?.push(turn);
            Ok(())
        })
    }

    fn list<'a>(&'a self) -> ChatFuture<'a, Result<Vec<Turn>, ChatError>> {
        Box::pin(async move { Ok(self.turns()?.clone()) })
    }

    fn clear<'a>(&'a self) -> ChatFuture<'a, Result<(), ChatError>> {
        Box::pin(async move {
            self.turns()?.clear();
            Ok(())
        })
    }
}

//! Chat orchestration: one in-flight turn at a time over the provider registry.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use vchat::{ChatOrchestrator, ChatPhase, IgnoreReason, InMemoryTranscriptStore, SubmitOutcome};
//! use vprovider::ProviderRegistry;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let chat = ChatOrchestrator::new(
//!     Arc::new(ProviderRegistry::new()),
//!     Arc::new(InMemoryTranscriptStore::new()),
//! );
//!
//! let outcome = chat.submit("   ", "gpt-4o").await.unwrap();
//! assert_eq!(outcome, SubmitOutcome::Ignored(IgnoreReason::EmptyInput));
//! assert_eq!(chat.snapshot().phase, ChatPhase::Idle);
//! # });
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use futures_util::StreamExt;
use tokio::sync::{Mutex as AsyncMutex, watch};
use tokio_util::sync::CancellationToken;
use vprovider::{ProviderError, ProviderRegistry, resolve};

use crate::{
    ChatError, ChatOptions, ChatPhase, ChatSnapshot, ExportFormat, ExportedDocument,
    IgnoreReason, SubmitOutcome, TranscriptStore, Turn, export_transcript,
};

pub struct ChatOrchestrator {
    registry: Arc<ProviderRegistry>,
    store: Arc<dyn TranscriptStore>,
    options: ChatOptions,
    in_flight: AtomicBool,
    cancel: Mutex<CancellationToken>,
    /// Serializes transcript writes between `submit` and `clear`.
    writes: AsyncMutex<()>,
    state: watch::Sender<ChatSnapshot>,
}

impl ChatOrchestrator {
    pub fn new(registry: Arc<ProviderRegistry>, store: Arc<dyn TranscriptStore>) -> Self {
        let (state, _) = watch::channel(ChatSnapshot::default());
        Self {
            registry,
            store,
            options: ChatOptions::default(),
            in_flight: AtomicBool::new(false),
            cancel: Mutex::new(CancellationToken::new()),
            writes: AsyncMutex::new(()),
            state,
        }
    }

    pub fn with_options(mut self, options: ChatOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ChatOptions {
        &self.options
    }

    /// Loads the store's existing turns into the published snapshot.
    pub async fn restore(&self) -> Result<(), ChatError> {
        let turns = self.store.list().await?;
        self.state.send_modify(|snapshot| snapshot.turns = turns);
        Ok(())
    }

    pub fn subscribe(&self) -> watch::Receiver<ChatSnapshot> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> ChatSnapshot {
        self.state.borrow().clone()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn transcript(&self) -> Result<Vec<Turn>, ChatError> {
        self.store.list().await
    }

    /// Sends `text` to the provider serving `model_id` and records the result.
    ///
    /// Provider failures are not errors here: they append the failure notice
    /// and come back as [`SubmitOutcome::Failed`]. `Err` means the transcript
    /// store failed.
    pub async fn submit(&self, text: &str, model_id: &str) -> Result<SubmitOutcome, ChatError> {
        if text.trim().is_empty() {
            return Ok(SubmitOutcome::Ignored(IgnoreReason::EmptyInput));
        }

        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            tracing::debug!(phase = "chat", event = "submit_ignored", reason = "busy");
            return Ok(SubmitOutcome::Ignored(IgnoreReason::Busy));
        };

        let cancel = self.current_token()?;
        let result = self.run_turn(text, model_id, &cancel).await;
        if let Err(error) = &result {
            tracing::error!(
                phase = "chat",
                event = "store_failure",
                model = model_id,
                error = %error
            );
            self.state.send_modify(|snapshot| {
                snapshot.phase = ChatPhase::IdleWithError;
                snapshot.partial = None;
            });
        }

        result
    }

    /// Empties the transcript and cancels the in-flight turn, if any.
    pub async fn clear(&self) -> Result<(), ChatError> {
        let _writes = self.writes.lock().await;
        let previous = {
            let mut token = self
                .cancel
                .lock()
                .map_err(|_| ChatError::store("cancellation lock poisoned"))?;
            std::mem::replace(&mut *token, CancellationToken::new())
        };
        let cancelled_in_flight = self.is_busy();
        previous.cancel();

        self.store.clear().await?;
        self.state.send_replace(ChatSnapshot::default());

        tracing::info!(
            phase = "chat",
            event = "transcript_cleared",
            cancelled_in_flight
        );
        Ok(())
    }

    pub async fn export(
        &self,
        title: &str,
        format: ExportFormat,
    ) -> Result<ExportedDocument, ChatError> {
        let turns = self.store.list().await?;
        export_transcript(&turns, title, format, Utc::now())
    }

    async fn run_turn(
        &self,
        text: &str,
        model_id: &str,
        cancel: &CancellationToken,
    ) -> Result<SubmitOutcome, ChatError> {
        let user = Turn::user(text, model_id);
        if !self.record(user.clone(), ChatPhase::Sending, cancel).await? {
            return self.cancelled(model_id).await;
        }

        let reply = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            reply = self.request_reply(text, model_id) => Some(reply),
        };

        let Some(reply) = reply.filter(|_| !cancel.is_cancelled()) else {
            return self.cancelled(model_id).await;
        };

        match reply {
            Ok(content) => {
                let reply = Turn::assistant(content, model_id);
                if !self.record(reply.clone(), ChatPhase::Idle, cancel).await? {
                    return self.cancelled(model_id).await;
                }

                tracing::info!(
                    phase = "chat",
                    event = "turn_completed",
                    provider = %resolve(model_id),
                    model = model_id,
                    reply_chars = reply.content.chars().count()
                );
                Ok(SubmitOutcome::Completed { user, reply })
            }
            Err(error) => {
                tracing::warn!(
                    phase = "chat",
                    event = "turn_failed",
                    provider = %resolve(model_id),
                    model = model_id,
                    error_kind = ?error.kind,
                    error = %error
                );

                let notice = Turn::assistant(self.options.failure_notice.clone(), model_id);
                if !self
                    .record(notice.clone(), ChatPhase::IdleWithError, cancel)
                    .await?
                {
                    return self.cancelled(model_id).await;
                }

                Ok(SubmitOutcome::Failed {
                    user,
                    notice,
                    error: error.into(),
                })
            }
        }
    }

    /// Appends `turn` and publishes `phase`. Returns `false` without writing
    /// when `clear` has cancelled the turn.
    async fn record(
        &self,
        turn: Turn,
        phase: ChatPhase,
        cancel: &CancellationToken,
    ) -> Result<bool, ChatError> {
        let _writes = self.writes.lock().await;
        if cancel.is_cancelled() {
            return Ok(false);
        }

        self.store.append(turn).await?;
        self.publish(phase).await?;
        Ok(true)
    }

    async fn cancelled(&self, model_id: &str) -> Result<SubmitOutcome, ChatError> {
        {
            let _writes = self.writes.lock().await;
            self.publish(ChatPhase::Idle).await?;
        }

        tracing::info!(phase = "chat", event = "turn_cancelled", model = model_id);
        Ok(SubmitOutcome::Cancelled)
    }

    async fn request_reply(&self, text: &str, model_id: &str) -> Result<String, ProviderError> {
        let client = self.registry.client_for_model(model_id)?;
        let request = self.options.request_for(model_id, text);

        if !request.options.stream {
            let response = client.complete(request).await?;
            return Ok(response.text().to_string());
        }

        let mut fragments = client.stream_complete(request).await?;
        let mut reply = String::new();
        while let Some(fragment) = fragments.next().await {
            reply.push_str(&fragment?);
            let partial = reply.clone();
            self.state
                .send_modify(|snapshot| snapshot.partial = Some(partial));
        }

        Ok(reply)
    }

    async fn publish(&self, phase: ChatPhase) -> Result<(), ChatError> {
        let turns = self.store.list().await?;
        self.state.send_replace(ChatSnapshot {
            phase,
            turns,
            partial: None,
        });
        Ok(())
    }

    fn current_token(&self) -> Result<CancellationToken, ChatError> {
        self.cancel
            .lock()
            .map(|token| token.clone())
            .map_err(|_| ChatError::store("cancellation lock poisoned"))
    }
}

impl std::fmt::Debug for ChatOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatOrchestrator")
            .field("providers", &self.registry.providers())
            .field("options", &self.options)
            .field("busy", &self.is_busy())
            .finish_non_exhaustive()
    }
}

/// Holds the in-flight flag; releasing happens on drop so every exit path,
/// including a dropped `submit` future, frees the orchestrator.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

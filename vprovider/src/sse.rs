//! Incremental decoder for chat-completion server-sent-event bodies.
//!
//! The decoder is fed raw body chunks as they arrive. It buffers partial UTF-8
//! sequences and partial lines across chunks, so the decoded events do not
//! depend on how the body was split.
//!
//! ```rust
//! use vprovider::sse::{SseDecoder, SseEvent};
//!
//! let mut decoder = SseDecoder::new();
//! let mut events = decoder.feed(b"data: {\"choices\":[{\"delta\":{\"content\":\"H");
//! events.extend(decoder.feed(b"i\"}}]}\n\ndata: [DONE]\n\n"));
//!
//! assert_eq!(events, vec![SseEvent::Fragment("Hi".to_string()), SseEvent::Done]);
//! assert!(decoder.is_finished());
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

use serde::Deserialize;

pub const DATA_PREFIX: &str = "data: ";
pub const DONE_SENTINEL: &str = "[DONE]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseEvent {
    /// Non-empty delta text from the first choice.
    Fragment(String),
    /// A `data:` payload that was not a valid chunk object.
    Malformed(StreamDecodeError),
    /// The `[DONE]` sentinel; the decoder ignores all later input.
    Done,
}

/// One unparseable SSE payload. Reported, never fatal to the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamDecodeError {
    pub payload: String,
    pub message: String,
}

impl StreamDecodeError {
    pub fn new(payload: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            message: message.into(),
        }
    }
}

impl Display for StreamDecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "malformed stream event: {}", self.message)
    }
}

impl Error for StreamDecodeError {}

#[derive(Debug, Default)]
pub struct SseDecoder {
    pending_bytes: Vec<u8>,
    line_buffer: String,
    finished: bool,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Consumes one body chunk and returns the events completed by it.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        if self.finished {
            return Vec::new();
        }

        self.decode_utf8(chunk);

        let mut events = Vec::new();
        while let Some(newline) = self.line_buffer.find('\n') {
            let line = self.line_buffer.drain(..=newline).collect::<String>();
            match parse_line(&line) {
                Some(SseEvent::Done) => {
                    self.finish();
                    events.push(SseEvent::Done);
                    break;
                }
                Some(event) => events.push(event),
                None => {}
            }
        }

        events
    }

    fn finish(&mut self) {
        self.finished = true;
        self.pending_bytes.clear();
        self.line_buffer.clear();
    }

    fn decode_utf8(&mut self, chunk: &[u8]) {
        self.pending_bytes.extend_from_slice(chunk);

        let mut consumed = 0;
        while consumed < self.pending_bytes.len() {
            match std::str::from_utf8(&self.pending_bytes[consumed..]) {
                Ok(text) => {
                    self.line_buffer.push_str(text);
                    consumed = self.pending_bytes.len();
                }
                Err(error) => {
                    let valid_end = consumed + error.valid_up_to();
                    self.line_buffer
                        .push_str(&String::from_utf8_lossy(&self.pending_bytes[consumed..valid_end]));

                    match error.error_len() {
                        Some(invalid_len) => {
                            self.line_buffer.push(char::REPLACEMENT_CHARACTER);
                            consumed = valid_end + invalid_len;
                        }
                        // Incomplete sequence at the end; wait for the next chunk.
                        None => {
                            consumed = valid_end;
                            break;
                        }
                    }
                }
            }
        }

        self.pending_bytes.drain(..consumed);
    }
}

fn parse_line(raw: &str) -> Option<SseEvent> {
    let line = raw.strip_suffix('\n').unwrap_or(raw);
    let line = line.strip_suffix('\r').unwrap_or(line);
    let payload = line.strip_prefix(DATA_PREFIX)?;

    if payload == DONE_SENTINEL {
        return Some(SseEvent::Done);
    }

    match serde_json::from_str::<ChunkPayload>(payload) {
        Ok(chunk) => {
            let content = chunk.into_content();
            if content.is_empty() {
                None
            } else {
                Some(SseEvent::Fragment(content))
            }
        }
        Err(err) => Some(SseEvent::Malformed(StreamDecodeError::new(
            payload,
            err.to_string(),
        ))),
    }
}

#[derive(Debug, Deserialize)]
struct ChunkPayload {
    #[serde(default)]
    choices: Option<Vec<ChunkChoice>>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: Option<ChunkDelta>,
}

#[derive(Debug, Deserialize)]
struct ChunkDelta {
    #[serde(default)]
    content: Option<String>,
}

impl ChunkPayload {
    fn into_content(self) -> String {
        self.choices
            .and_then(|choices| choices.into_iter().next())
            .and_then(|choice| choice.delta)
            .and_then(|delta| delta.content)
            .unwrap_or_default()
    }
}

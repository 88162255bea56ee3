mod client;
mod serde_api;
mod tests;
mod transport;

pub use client::OpenAiCompatibleClient;
pub use serde_api::{ChatCompletionsRequest, ChatMessage};
pub use transport::{ByteStream, ChatCompletionsTransport, HttpChatCompletionsTransport};

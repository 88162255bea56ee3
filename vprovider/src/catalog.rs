//! Models offered in the model picker.
//!
//! ```rust
//! use vprovider::{ProviderId, find_model};
//!
//! let grok = find_model("grok-1").expect("grok-1 is listed");
//! assert_eq!(grok.vendor, "xAI");
//! assert_eq!(grok.provider(), ProviderId::Xai);
//! ```

use crate::{ProviderId, resolve};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelInfo {
    pub id: &'static str,
    pub name: &'static str,
    /// Vendor label shown next to the name; not a routing key.
    pub vendor: &'static str,
    pub description: &'static str,
}

impl ModelInfo {
    pub fn provider(&self) -> ProviderId {
        resolve(self.id)
    }
}

static CATALOG: [ModelInfo; 9] = [
    ModelInfo {
        id: "gpt-4o",
        name: "GPT-4o",
        vendor: "OpenAI",
        description: "Most capable model for a wide range of tasks",
    },
    ModelInfo {
        id: "claude-3-opus",
        name: "Claude 3 Opus",
        vendor: "Anthropic",
        description: "Most powerful model for complex tasks",
    },
    ModelInfo {
        id: "claude-3-sonnet",
        name: "Claude 3 Sonnet",
        vendor: "Anthropic",
        description: "Balanced performance and efficiency",
    },
    ModelInfo {
        id: "deepseek-coder",
        name: "DeepSeek Coder",
        vendor: "DeepSeek",
        description: "Specialized for coding tasks",
    },
    ModelInfo {
        id: "qwen-72b",
        name: "Qwen 72B",
        vendor: "Alibaba",
        description: "Large multilingual model",
    },
    ModelInfo {
        id: "kimi-v1",
        name: "Kimi",
        vendor: "Kimi AI",
        description: "General purpose assistant",
    },
    ModelInfo {
        id: "llama-3-70b",
        name: "Llama 3 70B",
        vendor: "Meta",
        description: "Open model with strong capabilities",
    },
    ModelInfo {
        id: "gemini-pro",
        name: "Gemini Pro",
        vendor: "Google",
        description: "Google's multimodal model",
    },
    ModelInfo {
        id: "grok-1",
        name: "Grok-1",
        vendor: "xAI",
        description: "Grok's conversational AI model",
    },
];

pub fn catalog() -> &'static [ModelInfo] {
    &CATALOG
}

pub fn find_model(model_id: &str) -> Option<&'static ModelInfo> {
    CATALOG.iter().find(|model| model.id == model_id)
}

#[cfg(feature = "provider-openai-compat")]
pub mod openai_compat;

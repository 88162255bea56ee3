//! Focused unit tests for chat-completions adapter internals.

#![cfg(test)]

use futures_util::{StreamExt, stream};

use crate::{CompletionRequest, FinishReason, ProviderError, ProviderErrorKind, ProviderId};

use super::client::decode_fragments;
use super::serde_api::{ChatCompletionsRequest, ChatCompletionsResponse, extract_error_message};
use super::transport::ByteStream;

fn body_of(chunks: Vec<Result<&'static str, ProviderError>>) -> ByteStream<'static> {
    let chunks = chunks
        .into_iter()
        .map(|chunk| chunk.map(|text| text.as_bytes().to_vec()))
        .collect::<Vec<_>>();
    Box::pin(stream::iter(chunks))
}

#[test]
fn wire_request_places_system_message_before_the_prompt() {
    let request = CompletionRequest::new("grok-1", "hello")
        .with_system_instruction("be brief")
        .with_max_tokens(64);

    let wire = ChatCompletionsRequest::from_request(request, true);
    let body = serde_json::to_value(&wire).expect("request should serialize");

    assert_eq!(body["model"], "grok-1");
    assert_eq!(body["max_tokens"], 64);
    assert_eq!(body["stream"], true);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][0]["content"], "be brief");
    assert_eq!(body["messages"][1]["role"], "user");
    assert_eq!(body["messages"][1]["content"], "hello");
    assert_eq!(body["messages"].as_array().map(Vec::len), Some(2));
}

#[test]
fn wire_request_without_instruction_has_only_the_user_message() {
    let wire = ChatCompletionsRequest::from_request(CompletionRequest::new("gpt-4o", "hi"), false);

    assert_eq!(wire.messages.len(), 1);
    assert_eq!(wire.messages[0].role, "user");
    assert_eq!(wire.max_tokens, 1024);
    assert!((wire.temperature - 0.7).abs() < f32::EPSILON);
    assert!(!wire.stream);
}

#[test]
fn normalize_maps_null_content_to_empty_text() {
    let body = r#"{
        "id": "cmpl-1",
        "model": "grok-1",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": null}, "finish_reason": "length"}],
        "usage": {"prompt_tokens": 3, "completion_tokens": 0, "total_tokens": 3}
    }"#;

    let response = ChatCompletionsResponse::parse(200, body)
        .and_then(|parsed| parsed.normalize(200, "grok-1"))
        .expect("response should normalize");

    assert_eq!(response.id, "cmpl-1");
    assert_eq!(response.text(), "");
    assert_eq!(response.finish_reason(), FinishReason::Length);
    assert_eq!(response.usage.total_tokens, 3);
}

#[test]
fn normalize_rejects_empty_choices() {
    let error = ChatCompletionsResponse::parse(200, r#"{"id":"x","choices":[]}"#)
        .and_then(|parsed| parsed.normalize(200, "gpt-4o"))
        .expect_err("empty choices must fail");

    assert_eq!(error.kind, ProviderErrorKind::Api);
    assert_eq!(error.status, Some(200));
}

#[test]
fn normalize_falls_back_to_the_requested_model() {
    let response = ChatCompletionsResponse::parse(
        200,
        r#"{"choices":[{"message":{"content":"ok"}}]}"#,
    )
    .and_then(|parsed| parsed.normalize(200, "kimi-v1"))
    .expect("response should normalize");

    assert_eq!(response.model, "kimi-v1");
    assert_eq!(response.finish_reason(), FinishReason::Other);
}

#[test]
fn error_message_is_read_from_the_error_envelope() {
    assert_eq!(
        extract_error_message(r#"{"error":{"message":"Incorrect API key provided"}}"#),
        Some("Incorrect API key provided".to_string())
    );
    assert_eq!(extract_error_message(r#"{"error":{"message":""}}"#), None);
    assert_eq!(extract_error_message("<html>bad gateway</html>"), None);
}

#[tokio::test]
async fn fragments_are_decoded_across_arbitrary_chunk_boundaries() {
    let body = body_of(vec![
        Ok("data: {\"choices\":[{\"delta\":{\"content\":\"Hel"),
        Ok("lo\"}}]}\n\ndata: {\"choices\":[{\"delta\":{\"content\":\" wor"),
        Ok("ld\"}}]}\n\ndata: [DONE]\n\ndata: {\"choices\":[{\"delta\":{\"content\":\"!\"}}]}\n"),
    ]);

    let fragments = decode_fragments(ProviderId::Xai, body)
        .collect::<Vec<_>>()
        .await;

    assert_eq!(
        fragments,
        vec![Ok("Hello".to_string()), Ok(" world".to_string())]
    );
}

#[tokio::test]
async fn body_error_ends_the_stream_with_one_transport_error() {
    let body = body_of(vec![
        Ok("data: {\"choices\":[{\"delta\":{\"content\":\"partial\"}}]}\n"),
        Err(ProviderError::transport("connection reset")),
        Ok("data: {\"choices\":[{\"delta\":{\"content\":\"never\"}}]}\n"),
    ]);

    let items = decode_fragments(ProviderId::OpenAi, body)
        .collect::<Vec<_>>()
        .await;

    assert_eq!(items.len(), 2);
    assert_eq!(items[0], Ok("partial".to_string()));
    let error = items[1].clone().expect_err("second item is the failure");
    assert_eq!(error.kind, ProviderErrorKind::Transport);
}

#[tokio::test]
async fn body_ending_without_done_completes_normally() {
    let body = body_of(vec![Ok(
        "data: {\"choices\":[{\"delta\":{\"content\":\"a\"}}]}\ndata: {\"choices\":[{\"delta\"",
    )]);

    let items = decode_fragments(ProviderId::Qwen, body)
        .collect::<Vec<_>>()
        .await;

    assert_eq!(items, vec![Ok("a".to_string())]);
}

//! Wire-contract tests for the HTTP provider driver against a mock server.

use paperclip_core::{ChatTurn, PromptContext, Provider, ProviderType, Role};
use paperclip_error::ProviderErrorKind;
use paperclip_interface::ProviderDriver;
use paperclip_models::{DEFAULT_REQUEST_TIMEOUT, HttpProviderDriver};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn context() -> PromptContext {
    PromptContext::new(
        vec![
            ChatTurn::new(Role::System, "be helpful"),
            ChatTurn::new(Role::User, "earlier question"),
            ChatTurn::new(Role::Assistant, "earlier answer"),
            ChatTurn::new(Role::User, "write fizzbuzz"),
        ],
        "write fizzbuzz",
    )
}

fn gemini_provider(server: &MockServer) -> Provider {
    Provider::builder()
        .id("gem")
        .kind(ProviderType::Gemini)
        .base_url(format!("{}/v1beta", server.uri()))
        .model("gemini-2.0-flash")
        .api_key("g-key")
        .build()
        .unwrap()
}

fn chat_provider(server: &MockServer) -> Provider {
    Provider::builder()
        .id("or")
        .kind(ProviderType::OpenRouter)
        .base_url(server.uri())
        .model("meta/llama")
        .api_key("or-key")
        .max_tokens(1024u32)
        .build()
        .unwrap()
}

fn driver() -> HttpProviderDriver {
    HttpProviderDriver::new(DEFAULT_REQUEST_TIMEOUT).unwrap()
}

#[tokio::test]
async fn gemini_sends_only_the_prompt_with_api_key_header() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
        .and(header("x-goog-api-key", "g-key"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({
            "contents": [{"parts": [{"text": "write fizzbuzz"}]}],
            "generationConfig": {"temperature": 0.0, "maxOutputTokens": 4096}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": "print('fizz')"}]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let completion = driver().call(&gemini_provider(&server), &context()).await?;
    assert_eq!(completion.text, "print('fizz')");
    assert!(completion.raw.get("candidates").is_some());

    let requests = server.received_requests().await.unwrap_or_default();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body)?;
    assert_eq!(body["contents"].as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn chat_completions_sends_full_context_with_bearer() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer or-key"))
        .and(body_partial_json(json!({
            "model": "meta/llama",
            "temperature": 0.0,
            "max_tokens": 1024
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "done"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let completion = driver().call(&chat_provider(&server), &context()).await?;
    assert_eq!(completion.text, "done");

    let requests = server.received_requests().await.unwrap_or_default();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body)?;
    let messages = body["messages"].as_array().cloned().unwrap_or_default();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[3], json!({"role": "user", "content": "write fizzbuzz"}));
    Ok(())
}

#[tokio::test]
async fn status_429_carries_retry_hint() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {
                "code": 429,
                "details": [
                    {"@type": "type.googleapis.com/google.rpc.RetryInfo", "retryDelay": "37s"}
                ]
            }
        })))
        .mount(&server)
        .await;

    let err = driver()
        .call(&gemini_provider(&server), &context())
        .await
        .unwrap_err();
    assert!(matches!(
        err.kind,
        ProviderErrorKind::RateLimited {
            retry_after_secs: 37,
            ..
        }
    ));
    Ok(())
}

#[tokio::test]
async fn status_429_without_json_uses_default_delay() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let err = driver()
        .call(&chat_provider(&server), &context())
        .await
        .unwrap_err();
    match err.kind {
        ProviderErrorKind::RateLimited {
            retry_after_secs,
            message,
        } => {
            assert_eq!(retry_after_secs, 10);
            assert_eq!(message, "slow down");
        }
        other => panic!("expected rate limit, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn other_statuses_keep_code_and_body() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let err = driver()
        .call(&chat_provider(&server), &context())
        .await
        .unwrap_err();
    assert_eq!(
        err.kind,
        ProviderErrorKind::HttpStatus {
            status_code: 503,
            body: "overloaded".to_string()
        }
    );
    Ok(())
}

#[tokio::test]
async fn non_json_success_is_malformed() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = driver()
        .call(&chat_provider(&server), &context())
        .await
        .unwrap_err();
    assert!(matches!(err.kind, ProviderErrorKind::MalformedResponse(_)));
    Ok(())
}

#[tokio::test]
async fn gemini_without_model_never_reaches_the_network() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let provider = Provider::builder()
        .id("gem")
        .kind(ProviderType::Gemini)
        .base_url(server.uri())
        .build()
        .unwrap();
    let err = driver().call(&provider, &context()).await.unwrap_err();
    assert!(matches!(err.kind, ProviderErrorKind::MissingField { .. }));
    Ok(())
}

#[tokio::test]
async fn slow_providers_time_out_as_network_failures() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"choices": []}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let driver = HttpProviderDriver::new(Duration::from_millis(100))?;
    let err = driver
        .call(&chat_provider(&server), &context())
        .await
        .unwrap_err();
    assert!(matches!(err.kind, ProviderErrorKind::Network(_)));
    Ok(())
}

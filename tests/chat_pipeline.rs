//! End-to-end pipeline tests against a mock HTTP server: payload shape,
//! failure classification, credential state, and operator notification.

use mockito::{Matcher, ServerGuard};
use openai_bridge::{
    ApiConfig, ChatMessage, Error, ListQuery, MemorySink, OpenAiClient,
};
use serde_json::json;
use std::io::Write;
use std::sync::Arc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

async fn client_for(server: &ServerGuard, sink: Arc<MemorySink>) -> OpenAiClient {
    init_tracing();
    OpenAiClient::builder(ApiConfig::new("sk-test"))
        .base_url_override(server.url())
        .notify_sink(sink)
        .build()
        .expect("client build")
}

#[tokio::test]
async fn simple_chat_sends_defaults_and_yields_the_parsed_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "model": "gpt-4o",
            "messages": [{"role": "user", "content": "Hello!"}],
            "max_tokens": 150,
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"Hi there"}}]}"#)
        .create_async()
        .await;

    let sink = Arc::new(MemorySink::new());
    let client = client_for(&server, Arc::clone(&sink)).await;

    let response = client
        .simple_chat(&[ChatMessage::user("Hello!")])
        .await
        .expect("chat response");
    assert_eq!(
        response["choices"][0]["message"]["content"],
        json!("Hi there")
    );

    mock.assert_async().await;
    assert!(client.credential().is_valid());
    assert!(sink.is_empty());
}

#[tokio::test]
async fn http_error_flags_the_credential_and_notifies_once() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(401)
        .with_body(r#"{"error":"invalid_api_key"}"#)
        .create_async()
        .await;

    let sink = Arc::new(MemorySink::new());
    let client = client_for(&server, Arc::clone(&sink)).await;

    let response = client.simple_chat(&[ChatMessage::user("Hello!")]).await;
    assert!(response.is_none());
    assert!(!client.credential().is_valid());

    let messages = sink.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("401"));
    assert!(messages[0].contains("invalid_api_key"));
}

#[tokio::test]
async fn repeated_http_errors_keep_notifying() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(401)
        .with_body(r#"{"error":"invalid_api_key"}"#)
        .expect(2)
        .create_async()
        .await;

    let sink = Arc::new(MemorySink::new());
    let client = client_for(&server, Arc::clone(&sink)).await;

    assert!(client.simple_chat(&[ChatMessage::user("one")]).await.is_none());
    assert!(client.simple_chat(&[ChatMessage::user("two")]).await.is_none());
    assert_eq!(sink.len(), 2);
}

#[tokio::test]
async fn unparseable_success_body_is_absence_without_a_credential_flip() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/v1/models")
        .with_status(200)
        .with_body("not json at all")
        .create_async()
        .await;

    let sink = Arc::new(MemorySink::new());
    let client = client_for(&server, Arc::clone(&sink)).await;

    assert!(client.list_models().await.is_none());
    assert!(client.credential().is_valid());
    assert!(sink.is_empty());
}

#[tokio::test]
async fn transport_failure_is_absence_without_a_credential_flip() {
    let sink = Arc::new(MemorySink::new());
    let client = OpenAiClient::builder(ApiConfig::new("sk-test"))
        .base_url_override("http://127.0.0.1:1")
        .notify_sink(Arc::clone(&sink) as Arc<dyn openai_bridge::NotifySink>)
        .build()
        .expect("client build");

    assert!(client.list_models().await.is_none());
    assert!(client.credential().is_valid());
    assert!(sink.is_empty());
}

#[tokio::test]
async fn list_model_ids_extracts_identifiers() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/v1/models")
        .with_status(200)
        .with_body(r#"{"data":[{"id":"gpt-4o"},{"id":"gpt-4o-mini"}]}"#)
        .create_async()
        .await;

    let client = client_for(&server, Arc::new(MemorySink::new())).await;
    assert_eq!(client.list_model_ids().await, vec!["gpt-4o", "gpt-4o-mini"]);
}

#[tokio::test]
async fn concurrent_calls_resolve_independently() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/v1/models")
        .with_status(200)
        .with_body(r#"{"data":[]}"#)
        .create_async()
        .await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices":[{"message":{"content":"ok"}}]}"#)
        .create_async()
        .await;

    let client = client_for(&server, Arc::new(MemorySink::new())).await;

    let messages = [ChatMessage::user("Hello!")];
    let (models, chat) = futures::join!(
        client.list_models(),
        client.simple_chat(&messages),
    );
    assert_eq!(models.expect("models")["data"], json!([]));
    assert_eq!(
        chat.expect("chat")["choices"][0]["message"]["content"],
        json!("ok")
    );
}

#[tokio::test]
async fn later_call_completing_first_causes_no_cross_talk() {
    let mut server = mockito::Server::new_async().await;
    // The model listing stalls before replying, so the chat call dispatched
    // after it completes first.
    server
        .mock("GET", "/v1/models")
        .with_status(200)
        .with_chunked_body(|writer| {
            std::thread::sleep(std::time::Duration::from_millis(300));
            writer.write_all(br#"{"data":[{"id":"gpt-4o"}]}"#)
        })
        .create_async()
        .await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices":[{"message":{"content":"fast"}}]}"#)
        .create_async()
        .await;

    let client = Arc::new(client_for(&server, Arc::new(MemorySink::new())).await);
    let completion_order = Arc::new(std::sync::Mutex::new(Vec::new()));

    let slow = tokio::spawn({
        let client = Arc::clone(&client);
        let completion_order = Arc::clone(&completion_order);
        async move {
            let response = client.list_models().await;
            completion_order.lock().unwrap().push("models");
            response
        }
    });
    let fast = tokio::spawn({
        let client = Arc::clone(&client);
        let completion_order = Arc::clone(&completion_order);
        async move {
            let response = client.simple_chat(&[ChatMessage::user("Hello!")]).await;
            completion_order.lock().unwrap().push("chat");
            response
        }
    });

    let models = slow.await.expect("slow task").expect("models");
    let chat = fast.await.expect("fast task").expect("chat");

    assert_eq!(*completion_order.lock().unwrap(), vec!["chat", "models"]);
    assert_eq!(models["data"][0]["id"], json!("gpt-4o"));
    assert_eq!(chat["choices"][0]["message"]["content"], json!("fast"));
}

#[tokio::test]
async fn verify_key_sends_the_fixed_exchange_and_restores_validity() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::Json(json!({
            "model": "gpt-4o",
            "messages": [
                {"role": "system", "content": "This is a test message to verify the API key."},
                {"role": "user", "content": "If you are there, reply by only saying 'Hello '."},
            ],
            "max_tokens": 150,
        })))
        .with_status(200)
        .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"Hello "}}]}"#)
        .create_async()
        .await;

    let sink = Arc::new(MemorySink::new());
    let client = client_for(&server, Arc::clone(&sink)).await;

    // A prior auth failure leaves the key flagged until verification passes.
    client.credential().mark_invalid("HTTP 401: stale");
    assert!(!client.credential().is_valid());

    assert!(client.verify_key().await);
    mock.assert_async().await;
    assert!(client.credential().is_valid());
    assert_eq!(client.credential().last_diagnostic(), None);
}

#[tokio::test]
async fn verify_key_failure_flags_the_key_and_notifies() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(401)
        .with_body(r#"{"error":"invalid_api_key"}"#)
        .create_async()
        .await;

    let sink = Arc::new(MemorySink::new());
    let client = client_for(&server, Arc::clone(&sink)).await;

    assert!(!client.verify_key().await);
    assert!(!client.credential().is_valid());

    // One notification from classification, one from the verification verdict.
    let messages = sink.messages();
    assert_eq!(messages.len(), 2);
    assert!(messages[1].contains("verification failed"));
}

#[tokio::test]
async fn verify_key_skips_the_placeholder_key() {
    let server = mockito::Server::new_async().await;

    let sink = Arc::new(MemorySink::new());
    let client = OpenAiClient::builder(ApiConfig::default())
        .base_url_override(server.url())
        .notify_sink(Arc::clone(&sink) as Arc<dyn openai_bridge::NotifySink>)
        .build()
        .expect("client build");

    // No mock is registered: verification must not touch the network.
    assert!(!client.verify_key().await);
    assert!(client.credential().is_valid());
    assert!(sink.is_empty());
}

#[tokio::test]
async fn dispatch_surfaces_construction_errors_before_the_network() {
    let server = mockito::Server::new_async().await;
    let client = client_for(&server, Arc::new(MemorySink::new())).await;

    let err = client
        .dispatch(
            &openai_bridge::Endpoint::new(
                openai_bridge::Verb::Get,
                "/v1/threads/{thread_id}",
                true,
            ),
            &[],
            None,
            None,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Construction(_)));
    assert!(err.to_string().contains("thread_id"));
}

#[tokio::test]
async fn list_query_defaults_produce_a_bare_path() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/threads/th_1/messages")
        .match_query("")
        .with_status(200)
        .with_body(r#"{"data":[]}"#)
        .create_async()
        .await;

    let client = client_for(&server, Arc::new(MemorySink::new())).await;
    let response = client
        .list_messages("th_1", &ListQuery::new().limit(20).order("desc"))
        .await
        .expect("listing");
    assert_eq!(response["data"], json!([]));
    mock.assert_async().await;
}

#[tokio::test]
async fn uri_cache_grows_only_on_distinct_addresses() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/v1/models")
        .with_status(200)
        .with_body(r#"{"data":[]}"#)
        .expect(2)
        .create_async()
        .await;

    let client = client_for(&server, Arc::new(MemorySink::new())).await;
    assert!(client.uri_cache().is_empty());

    client.list_models().await.expect("first");
    client.list_models().await.expect("second");
    assert_eq!(client.uri_cache().len(), 1);
}

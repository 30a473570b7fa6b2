#![allow(dead_code)]

use bti_assistant::assistant::{AssistantClient, AssistantError};
use bti_assistant::configuration::{AssistantSettings, Settings};
use serde_json::{json, Value};
use std::net::TcpListener;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use wiremock::MockServer;

pub const COMPLETION_PATH: &str = "/foundationModels/v1/completion";
pub const TEST_API_KEY: &str = "test-key";
pub const TEST_FOLDER_ID: &str = "test-folder";

pub struct TestApp {
    pub address: String,
    pub provider: MockServer,
}

/// Settings pointing the assistant at the fake completion API.
pub fn assistant_settings(provider: &MockServer) -> AssistantSettings {
    AssistantSettings {
        endpoint: format!("{}{}", provider.uri(), COMPLETION_PATH),
        folder_id: TEST_FOLDER_ID.to_string(),
        api_key: TEST_API_KEY.to_string(),
        ..Default::default()
    }
}

pub async fn spawn_app_with_settings(provider: MockServer, assistant: AssistantSettings) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let settings = Settings {
        app_port: port,
        app_host: "127.0.0.1".to_string(),
        assistant,
    };

    let server = bti_assistant::startup::run(listener, settings).expect("Failed to bind address.");
    let _ = tokio::spawn(server);

    TestApp { address, provider }
}

pub async fn spawn_app() -> TestApp {
    let provider = MockServer::start().await;
    let assistant = assistant_settings(&provider);
    spawn_app_with_settings(provider, assistant).await
}

/// Provider payload with one alternative per text.
pub fn completion_body(texts: &[&str]) -> Value {
    let alternatives: Vec<Value> = texts
        .iter()
        .map(|text| {
            json!({
                "message": { "role": "assistant", "text": text },
                "status": "ALTERNATIVE_STATUS_FINAL"
            })
        })
        .collect();

    json!({
        "result": {
            "alternatives": alternatives,
            "usage": { "inputTextTokens": "20", "completionTokens": "10", "totalTokens": "30" },
            "modelVersion": "23.10.2024"
        }
    })
}

/// Runs the blocking client on the blocking pool, as the server does.
pub async fn ask(settings: AssistantSettings, question: &str) -> Result<String, AssistantError> {
    let client = AssistantClient::new(&settings);
    let question = question.to_string();
    tokio::task::spawn_blocking(move || client.ask(&question))
        .await
        .expect("blocking task panicked")
}

/// JSON bodies of every request the fake provider received.
pub async fn received_bodies(provider: &MockServer) -> Vec<Value> {
    provider
        .received_requests()
        .await
        .expect("request recording is enabled")
        .iter()
        .map(|request| serde_json::from_slice(&request.body).expect("request body is JSON"))
        .collect()
}

/// Endpoint of a one-shot provider that promises a longer body than it sends
/// and then closes the connection.
pub async fn spawn_truncated_provider() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let endpoint = format!(
        "http://{}{}",
        listener.local_addr().unwrap(),
        COMPLETION_PATH
    );

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.expect("Failed to accept connection");
        read_request(&mut stream).await;
        let response = "HTTP/1.1 200 OK\r\n\
                        Content-Type: application/json\r\n\
                        Content-Length: 1024\r\n\
                        \r\n\
                        {\"result\":{\"alternatives\":[";
        stream
            .write_all(response.as_bytes())
            .await
            .expect("Failed to write response");
        let _ = stream.shutdown().await;
    });

    endpoint
}

// reads headers and the declared body so the client is done sending
async fn read_request(stream: &mut tokio::net::TcpStream) {
    let mut received = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let read = stream.read(&mut chunk).await.expect("Failed to read request");
        if read == 0 {
            return;
        }
        received.extend_from_slice(&chunk[..read]);

        if let Some(end) = received.windows(4).position(|window| window == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&received[..end]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if received.len() >= end + 4 + content_length {
                return;
            }
        }
    }
}

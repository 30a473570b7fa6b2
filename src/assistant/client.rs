use super::errors::AssistantError;
use super::types::{ChatRequest, ChatResponse, CompletionOptions, Message};
use crate::configuration::AssistantSettings;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use std::time::Duration;

/// Tenant header expected by the completion API.
pub const FOLDER_ID_HEADER: &str = "x-folder-id";

/// Blocking client of the text-generation completion API.
///
/// Holds configuration only, so one instance can be shared between threads.
/// Every call makes exactly one HTTP attempt bounded by the configured timeout.
/// Call it from a blocking context (`web::block`, `spawn_blocking` or a plain
/// thread), never directly from an async task.
#[derive(Clone)]
pub struct AssistantClient {
    endpoint: String,
    model_uri: String,
    folder_id: String,
    api_key: String,
    system_prompt: String,
    timeout: Duration,
}

impl AssistantClient {
    pub fn new(settings: &AssistantSettings) -> Self {
        Self {
            endpoint: settings.endpoint.clone(),
            model_uri: settings.model_uri(),
            folder_id: settings.folder_id.clone(),
            api_key: settings.api_key.clone(),
            system_prompt: settings.system_prompt.clone(),
            timeout: settings.timeout(),
        }
    }

    /// Ask a single question and return the first generated answer.
    #[tracing::instrument(
        name = "Ask assistant",
        skip(self, user_question),
        fields(question_len = user_question.len())
    )]
    pub fn ask(&self, user_question: &str) -> Result<String, AssistantError> {
        let request = self.build_request(user_question);
        self.send(&request)
    }

    fn build_request(&self, user_question: &str) -> ChatRequest {
        ChatRequest {
            model_uri: self.model_uri.clone(),
            completion_options: CompletionOptions::default(),
            messages: vec![
                Message::system(self.system_prompt.as_str()),
                Message::user(user_question),
            ],
        }
    }

    fn send(&self, request: &ChatRequest) -> Result<String, AssistantError> {
        let payload = serde_json::to_vec(request).map_err(|err| {
            tracing::error!("Failed to encode completion request: {:?}", err);
            AssistantError::Encoding(err)
        })?;

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|err| {
                tracing::error!("Failed to build HTTP client: {:?}", err);
                AssistantError::RequestBuild(err)
            })?;

        let http_request = client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(&self.api_key)
            .header(FOLDER_ID_HEADER, &self.folder_id)
            .body(payload)
            .build()
            .map_err(|err| {
                tracing::error!("Failed to build completion request: {:?}", err);
                AssistantError::RequestBuild(err)
            })?;

        let response = client.execute(http_request).map_err(|err| {
            tracing::error!("Completion request failed: {:?}", err);
            AssistantError::Transport(err)
        })?;

        let status = response.status();
        let body = response.bytes().map_err(|err| {
            tracing::error!("Failed to read completion response: {:?}", err);
            AssistantError::Read(err)
        })?;

        if status != StatusCode::OK {
            let body = String::from_utf8_lossy(&body).into_owned();
            tracing::error!(status = status.as_u16(), "Completion API returned an error");
            return Err(AssistantError::RemoteApi {
                status: status.as_u16(),
                body,
            });
        }

        let response: ChatResponse = serde_json::from_slice(&body).map_err(|err| {
            tracing::error!("Failed to decode completion response: {:?}", err);
            AssistantError::Decoding(err)
        })?;

        tracing::info!(
            alternatives = response.result.alternatives.len(),
            "Completion received"
        );

        response.into_first_text().ok_or_else(|| {
            tracing::error!("Completion API returned no alternatives");
            AssistantError::EmptyResponse
        })
    }
}

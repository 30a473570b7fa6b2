use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Failures of a single completion call. None of them is retried.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("Failed to encode completion request: {0}")]
    Encoding(#[source] serde_json::Error),

    #[error("Failed to build completion request: {0}")]
    RequestBuild(#[source] reqwest::Error),

    #[error("Failed to send completion request: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Failed to read completion response: {0}")]
    Read(#[source] reqwest::Error),

    #[error("Completion API error (status {status}): {body}")]
    RemoteApi { status: u16, body: String },

    #[error("Failed to decode completion response: {0}")]
    Decoding(#[source] serde_json::Error),

    #[error("Empty response from completion API")]
    EmptyResponse,
}

impl ResponseError for AssistantError {
    fn error_response(&self) -> HttpResponse {
        let message = match self {
            Self::Encoding(_) | Self::RequestBuild(_) => "Assistant request could not be prepared",
            Self::Transport(_) => "Assistant service unreachable",
            Self::Read(_) | Self::Decoding(_) => "Invalid assistant service response",
            Self::RemoteApi { status: 429, .. } => "Assistant rate limit exceeded",
            Self::RemoteApi { .. } => "Assistant service error",
            Self::EmptyResponse => "Assistant returned no answer",
        };

        HttpResponse::build(self.status_code()).json(json!({
            "error": message,
            "details": self.to_string(),
        }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::Encoding(_) | Self::RequestBuild(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Transport(err) if err.is_timeout() || err.is_connect() => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Self::Transport(_) => StatusCode::BAD_GATEWAY,
            Self::RemoteApi { status: 429, .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::Read(_) | Self::RemoteApi { .. } | Self::Decoding(_) | Self::EmptyResponse => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

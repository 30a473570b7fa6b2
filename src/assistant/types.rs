use serde::{Deserialize, Deserializer, Serialize};

pub const TEMPERATURE: f64 = 0.3;
pub const MAX_TOKENS: u32 = 6000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One conversation turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub text: String,
}

impl Message {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionOptions {
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

/// Body of `POST /foundationModels/v1/completion`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub model_uri: String,
    pub completion_options: CompletionOptions,
    /// Conversation history, oldest first
    pub messages: Vec<Message>,
}

// absent and `null` fields decode as their default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub result: CompletionResult,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CompletionResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub alternatives: Vec<Alternative>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Alternative {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: AlternativeMessage,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AlternativeMessage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
}

impl ChatResponse {
    pub fn into_first_text(self) -> Option<String> {
        self.result
            .alternatives
            .into_iter()
            .next()
            .map(|alternative| alternative.message.text)
    }
}

use std::fmt;
use std::time::Duration;

pub const DEFAULT_COMPLETION_URL: &str =
    "https://llm.api.cloud.yandex.net/foundationModels/v1/completion";
pub const DEFAULT_FOLDER_ID: &str = "b1gu5443n2mkggql04p5";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an assistant of an apartment redevelopment \
planning service. Help the user plan layout changes that comply with BTI (building technical \
inventory) rules: point out load-bearing walls, wet zones and the approvals a change may \
require. Answer concisely and in the language of the question.";

/// Environment variable holding the bearer credential of the completion API.
pub const API_KEY_ENV: &str = "YANDEX_CLOUD_API_KEY";

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Settings {
    pub app_port: u16,
    pub app_host: String,
    #[serde(default)]
    pub assistant: AssistantSettings,
}

#[derive(Clone, serde::Deserialize)]
pub struct AssistantSettings {
    #[serde(default = "AssistantSettings::default_endpoint")]
    pub endpoint: String,
    #[serde(default = "AssistantSettings::default_folder_id")]
    pub folder_id: String,
    /// Falls back to `gpt://<folder_id>/yandexgpt/rc`
    #[serde(default)]
    pub model_uri: Option<String>,
    #[serde(default = "AssistantSettings::default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "AssistantSettings::default_system_prompt")]
    pub system_prompt: String,
    /// Read from `YANDEX_CLOUD_API_KEY`, never from the file
    #[serde(skip)]
    pub api_key: String,
}

impl AssistantSettings {
    fn default_endpoint() -> String {
        DEFAULT_COMPLETION_URL.to_string()
    }

    fn default_folder_id() -> String {
        DEFAULT_FOLDER_ID.to_string()
    }

    const fn default_timeout_secs() -> u64 {
        DEFAULT_TIMEOUT_SECS
    }

    fn default_system_prompt() -> String {
        DEFAULT_SYSTEM_PROMPT.to_string()
    }

    pub fn model_uri(&self) -> String {
        match &self.model_uri {
            Some(uri) if !uri.trim().is_empty() => uri.clone(),
            _ => format!("gpt://{}/yandexgpt/rc", self.folder_id),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            endpoint: Self::default_endpoint(),
            folder_id: Self::default_folder_id(),
            model_uri: None,
            timeout_secs: Self::default_timeout_secs(),
            system_prompt: Self::default_system_prompt(),
            api_key: String::new(),
        }
    }
}

// Keeps the credential out of logs and panic messages.
impl fmt::Debug for AssistantSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssistantSettings")
            .field("endpoint", &self.endpoint)
            .field("folder_id", &self.folder_id)
            .field("model_uri", &self.model_uri)
            .field("timeout_secs", &self.timeout_secs)
            .field("system_prompt", &self.system_prompt)
            .field("api_key", &"***")
            .finish()
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // `configuration.yaml` first, then APP_* variables, e.g. APP_ASSISTANT__TIMEOUT_SECS=60
    let settings = config::Config::builder()
        .add_source(config::File::with_name("configuration"))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let mut config: Settings = settings.try_deserialize()?;

    config.assistant.api_key = std::env::var(API_KEY_ENV).unwrap_or_default();
    if config.assistant.api_key.is_empty() {
        tracing::warn!("{} is not set, completion requests will be unauthorized", API_KEY_ENV);
    }

    Ok(config)
}

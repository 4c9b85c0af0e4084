//! Alert channel configuration payloads and submission state

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Status reported by the backend when a configuration was stored
pub const STATUS_SUCCESS: &str = "success";

/// Status published locally when the backend call failed
pub const STATUS_FAILURE: &str = "failure";

/// SMTP settings as the backend expects them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailSettings {
    pub server: String,
    pub port: String,
    pub username: String,
    pub password: String,
    pub sender_email: String,
}

/// Slack incoming webhook settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackSettings {
    pub webhook_url: String,
}

/// Normalized configuration for one alert channel.
///
/// Serializes as `{"config_name": "email" | "slack", "config_settings": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "config_name",
    content = "config_settings",
    rename_all = "lowercase"
)]
pub enum AlertConfigPayload {
    Email(EmailSettings),
    Slack(SlackSettings),
}

impl AlertConfigPayload {
    /// The `config_name` this payload is sent under
    pub fn config_name(&self) -> &'static str {
        match self {
            Self::Email(_) => "email",
            Self::Slack(_) => "slack",
        }
    }
}

/// Response body returned by the backend for a configuration update
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SubmissionData {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Any other keys the backend includes
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SubmissionData {
    #[cfg(test)]
    pub fn success() -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            ..Default::default()
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_FAILURE.to_string(),
            message: Some(message.into()),
            extra: Map::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

/// Loading/result state for the most recent submission
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubmissionState {
    pub loading: bool,
    pub data: Option<SubmissionData>,
    /// Identifies which submission `loading` and `data` belong to
    pub submission_id: Option<Uuid>,
}

impl SubmissionState {
    pub fn is_success(&self) -> bool {
        self.data.as_ref().is_some_and(SubmissionData::is_success)
    }
}

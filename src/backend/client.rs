//! HTTP client for the alert configuration endpoint

use super::{AlertBackend, BackendError};
use crate::state::{AlertConfigPayload, SubmissionData};
use async_trait::async_trait;
use std::time::Duration;

/// Path of the channel configuration endpoint, relative to the base URL
const UPDATE_CONFIG_PATH: &str = "/api/config/update";

/// Client for the backend that stores alert channel settings
pub struct HttpAlertBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpAlertBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn update_config_url(&self) -> String {
        format!("{}{}", self.base_url, UPDATE_CONFIG_PATH)
    }
}

#[async_trait]
impl AlertBackend for HttpAlertBackend {
    async fn update_channel_config(
        &self,
        payload: &AlertConfigPayload,
    ) -> Result<SubmissionData, BackendError> {
        let url = self.update_config_url();
        tracing::debug!(%url, config_name = payload.config_name(), "Posting channel config");

        let resp = self.client.post(&url).json(payload).send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;

        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

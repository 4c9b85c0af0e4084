//! Trait abstractions for the backend and the submission store, enabling
//! mocking in tests

use super::BackendError;
use crate::state::{AlertConfigPayload, SubmissionData, SubmissionState};
use async_trait::async_trait;
use tokio::sync::watch;

/// Remote endpoint that stores alert channel configuration
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlertBackend: Send + Sync {
    /// Store the settings for one channel
    async fn update_channel_config(
        &self,
        payload: &AlertConfigPayload,
    ) -> Result<SubmissionData, BackendError>;
}

/// Capability the form submits through.
///
/// `submit` returns immediately; the outcome is only visible through the
/// receiver handed out by `subscribe`.
#[cfg_attr(test, mockall::automock)]
pub trait AlertDispatch: Send + Sync {
    fn submit(&self, payload: AlertConfigPayload);

    fn subscribe(&self) -> watch::Receiver<SubmissionState>;
}

//! Submission store backing the alert form

use super::{AlertBackend, AlertDispatch};
use crate::state::{AlertConfigPayload, SubmissionData, SubmissionState};
use std::sync::Arc;
use tokio::sync::watch;
use uuid::Uuid;

/// Runs submissions against an `AlertBackend` and publishes their state.
///
/// Only the most recent submission may publish a result; responses for
/// earlier ones are dropped when they arrive.
pub struct AlertStore {
    backend: Arc<dyn AlertBackend>,
    state: Arc<watch::Sender<SubmissionState>>,
}

impl AlertStore {
    pub fn new(backend: Arc<dyn AlertBackend>) -> Self {
        let (state, _) = watch::channel(SubmissionState::default());
        Self {
            backend,
            state: Arc::new(state),
        }
    }
}

impl AlertDispatch for AlertStore {
    fn submit(&self, payload: AlertConfigPayload) {
        let id = Uuid::new_v4();
        tracing::info!(%id, config_name = payload.config_name(), "Submitting channel config");

        self.state.send_replace(SubmissionState {
            loading: true,
            data: None,
            submission_id: Some(id),
        });

        let backend = Arc::clone(&self.backend);
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            let data = match backend.update_channel_config(&payload).await {
                Ok(data) => {
                    if !data.is_success() {
                        tracing::warn!(%id, status = %data.status, "Backend rejected channel config");
                    }
                    data
                }
                Err(err) => {
                    tracing::warn!(%id, error = %err, "Channel config submission failed");
                    SubmissionData::failure(err.to_string())
                }
            };

            let published = state.send_if_modified(|current| {
                if current.submission_id != Some(id) {
                    return false;
                }
                current.loading = false;
                current.data = Some(data);
                true
            });
            if !published {
                tracing::debug!(%id, "Dropping result of superseded submission");
            }
        });
    }

    fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }
}

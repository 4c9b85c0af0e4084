//! Application state and core logic

use crate::backend::AlertDispatch;
use crate::state::{AlertsForm, AppState, ChannelKind, Form, SubmissionState, View};
use anyhow::Result;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::watch;
use uuid::Uuid;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Store the alert form submits through
    dispatcher: Arc<dyn AlertDispatch>,
    /// Submission state published by the store
    submission_rx: watch::Receiver<SubmissionState>,
    /// Submission whose success has already been acted on
    handled_success: Option<Uuid>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App showing `initial`
    pub fn new(dispatcher: Arc<dyn AlertDispatch>, initial: View) -> Self {
        let submission_rx = dispatcher.subscribe();
        let mut app = Self {
            state: AppState::default(),
            dispatcher,
            submission_rx,
            handled_success: None,
            quit: false,
        };
        app.enter_view(initial);
        app
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Navigate to a view, remembering the current one
    pub fn navigate(&mut self, view: View) {
        tracing::debug!(from = %self.state.current_view.path(), to = %view.path(), "Navigate");
        let previous = std::mem::replace(&mut self.state.current_view, View::default());
        self.state.view_history.push(previous);
        self.enter_view(view);
    }

    /// Go back to the previous non-form view
    pub fn go_back(&mut self) {
        while let Some(view) = self.state.view_history.pop() {
            if view.is_form_view() {
                continue;
            }
            self.enter_view(view);
            return;
        }
        self.enter_view(View::ChannelConfiguration);
    }

    /// Make `view` current, mounting a fresh form for form views
    fn enter_view(&mut self, view: View) {
        self.state.clear_form();
        if let View::AlertsForm(kind) = &view {
            self.state.form = Some(AlertsForm::new(kind.clone()));
            // Only changes that happen while this form is mounted count
            let current = self.submission_rx.borrow_and_update().clone();
            if current.is_success() {
                self.handled_success = current.submission_id;
            }
            self.state.submission = current;
        }
        self.state.current_view = view;
    }

    /// Pull the latest submission state from the store.
    ///
    /// Navigates to the channel listing when a submission turns successful
    /// while a form is open. Each submission navigates at most once.
    pub fn sync_submission(&mut self) {
        if !self.submission_rx.has_changed().unwrap_or(false) {
            return;
        }
        let current = self.submission_rx.borrow_and_update().clone();
        let newly_successful =
            current.is_success() && current.submission_id != self.handled_success;
        self.state.submission = current;

        if newly_successful && self.state.current_view.is_form_view() {
            self.handled_success = self.state.submission.submission_id;
            self.on_saved();
        }
    }

    fn on_saved(&mut self) {
        let channel = match &self.state.current_view {
            View::AlertsForm(kind) => kind.label().to_string(),
            View::ChannelConfiguration => return,
        };
        tracing::info!(%channel, "Channel configuration saved");
        let now = Local::now();
        self.state.last_saved_at = Some(now);
        self.state.status_message = Some(format!(
            "{channel} configuration saved at {}",
            now.format("%H:%M:%S")
        ));
        self.navigate(View::ChannelConfiguration);
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.state.current_view.is_form_view() {
            self.handle_alerts_form_key(key)
        } else {
            self.handle_channel_list_key(key)
        }
    }

    /// Handle keys in the channel listing view
    fn handle_channel_list_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('j') | KeyCode::Down => self
                .state
                .move_selection_down(ChannelKind::CONFIGURABLE.len()),
            KeyCode::Char('k') | KeyCode::Up => self.state.move_selection_up(),
            KeyCode::Enter => {
                if let Some(kind) = self.state.selected_channel() {
                    self.state.status_message = None;
                    self.navigate(View::AlertsForm(kind));
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle keys in the alert form view
    fn handle_alerts_form_key(&mut self, key: KeyEvent) -> Result<()> {
        let on_save_button = self
            .state
            .form
            .as_ref()
            .is_some_and(AlertsForm::is_save_button_active);
        match key.code {
            KeyCode::Esc => self.go_back(),
            // Save (Ctrl+S)
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.save_alert_config();
            }
            KeyCode::Enter if on_save_button => self.save_alert_config(),
            code => {
                let Some(form) = self.state.form.as_mut() else {
                    return Ok(());
                };
                match code {
                    // Clear field (Ctrl+U)
                    KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        form.clear_active()
                    }
                    KeyCode::Enter | KeyCode::Tab | KeyCode::Down => form.next_field(),
                    KeyCode::BackTab | KeyCode::Up => form.prev_field(),
                    KeyCode::Char(c) => form.input_char(c),
                    KeyCode::Backspace => form.backspace(),
                    _ => {}
                }
            }
        }
        Ok(())
    }

    /// Handle bracketed paste; only form inputs accept text
    pub fn handle_paste(&mut self, text: &str) {
        if let Some(form) = self.state.form.as_mut() {
            form.paste(text);
        }
    }

    /// Validate the form and dispatch its payload when valid
    fn save_alert_config(&mut self) {
        let Some(form) = self.state.form.as_mut() else {
            return;
        };
        match form.save() {
            Some(payload) => {
                tracing::debug!(config_name = payload.config_name(), "Dispatching");
                self.dispatcher.submit(payload);
            }
            None => tracing::debug!(channel = %form.kind.segment(), "Validation failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockAlertDispatch;
    use crate::state::{
        AlertConfigPayload, ChannelForm, EmailField, EmailSettings, SubmissionData,
        CHANNEL_CONFIGURATION_PATH,
    };

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl_s() -> KeyEvent {
        KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    /// Mock dispatcher that hands out a receiver of `tx`
    fn dispatcher(tx: &watch::Sender<SubmissionState>) -> MockAlertDispatch {
        let rx = tx.subscribe();
        let mut mock = MockAlertDispatch::new();
        mock.expect_subscribe().returning(move || rx.clone());
        mock
    }

    fn app_with(mock: MockAlertDispatch, view: View) -> App {
        App::new(Arc::new(mock), view)
    }

    fn success(id: Uuid) -> SubmissionState {
        SubmissionState {
            loading: false,
            data: Some(SubmissionData::success()),
            submission_id: Some(id),
        }
    }

    fn webhook_error(app: &App) -> bool {
        match &app.state.form.as_ref().unwrap().channel {
            ChannelForm::Slack(webhook) => webhook.error,
            _ => panic!("not a slack form"),
        }
    }

    mod navigation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_initial_form_view_mounts_form() {
            let (tx, _) = watch::channel(SubmissionState::default());
            let app = app_with(dispatcher(&tx), View::from_path("/alerts/email"));
            assert_eq!(app.state.current_view, View::AlertsForm(ChannelKind::Email));
            assert!(app.state.form.is_some());
        }

        #[test]
        fn test_listing_has_no_form() {
            let (tx, _) = watch::channel(SubmissionState::default());
            let app = app_with(dispatcher(&tx), View::ChannelConfiguration);
            assert!(app.state.form.is_none());
        }

        #[test]
        fn test_enter_opens_selected_channel() {
            let (tx, _) = watch::channel(SubmissionState::default());
            let mut app = app_with(dispatcher(&tx), View::ChannelConfiguration);

            app.handle_key(key(KeyCode::Down)).unwrap();
            app.handle_key(key(KeyCode::Enter)).unwrap();

            assert_eq!(app.state.current_view, View::AlertsForm(ChannelKind::Slack));
            assert_eq!(app.state.current_view.path(), "/alerts/slack");
        }

        #[test]
        fn test_esc_returns_to_listing_and_discards_form() {
            let (tx, _) = watch::channel(SubmissionState::default());
            let mut app = app_with(dispatcher(&tx), View::ChannelConfiguration);
            app.handle_key(key(KeyCode::Enter)).unwrap();
            type_text(&mut app, "mail");

            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert_eq!(app.state.current_view, View::ChannelConfiguration);
            assert!(app.state.form.is_none());

            // Re-entering starts from empty fields
            app.handle_key(key(KeyCode::Enter)).unwrap();
            let form = app.state.form.as_ref().unwrap();
            assert_eq!(form.get_field(0).unwrap().as_text(), "");
        }

        #[test]
        fn test_go_back_without_history_lands_on_listing() {
            let (tx, _) = watch::channel(SubmissionState::default());
            let mut app = app_with(dispatcher(&tx), View::from_path("/alerts/slack"));
            app.go_back();
            assert_eq!(app.state.current_view, View::ChannelConfiguration);
        }

        #[test]
        fn test_q_quits_from_listing_only() {
            let (tx, _) = watch::channel(SubmissionState::default());
            let mut app = app_with(dispatcher(&tx), View::from_path("/alerts/slack"));
            app.handle_key(key(KeyCode::Char('q'))).unwrap();
            assert!(!app.should_quit());

            app.handle_key(key(KeyCode::Esc)).unwrap();
            app.handle_key(key(KeyCode::Char('q'))).unwrap();
            assert!(app.should_quit());
        }
    }

    mod slack_save {
        use super::*;

        #[test]
        fn test_empty_webhook_never_dispatches() {
            let (tx, _) = watch::channel(SubmissionState::default());
            let mut mock = dispatcher(&tx);
            mock.expect_submit().times(0);
            let mut app = app_with(mock, View::from_path("/alerts/slack"));

            app.handle_key(ctrl_s()).unwrap();

            assert!(webhook_error(&app));
        }

        #[test]
        fn test_webhook_dispatches_once() {
            let (tx, _) = watch::channel(SubmissionState::default());
            let mut mock = dispatcher(&tx);
            mock.expect_submit()
                .withf(|p| {
                    serde_json::to_value(p).unwrap()
                        == serde_json::json!({
                            "config_name": "slack",
                            "config_settings": {"webhook_url": "https://hooks.slack.com/a"}
                        })
                })
                .times(1)
                .return_const(());
            let mut app = app_with(mock, View::from_path("/alerts/slack"));

            type_text(&mut app, "https://hooks.slack.com/a");
            app.handle_key(ctrl_s()).unwrap();

            assert!(!webhook_error(&app));
        }

        #[test]
        fn test_enter_on_save_button_saves() {
            let (tx, _) = watch::channel(SubmissionState::default());
            let mut mock = dispatcher(&tx);
            mock.expect_submit().times(1).return_const(());
            let mut app = app_with(mock, View::from_path("/alerts/slack"));

            type_text(&mut app, "x");
            app.handle_key(key(KeyCode::Tab)).unwrap();
            app.handle_key(key(KeyCode::Enter)).unwrap();
        }

        #[test]
        fn test_enter_on_input_moves_to_next_field() {
            let (tx, _) = watch::channel(SubmissionState::default());
            let mut mock = dispatcher(&tx);
            mock.expect_submit().times(0);
            let mut app = app_with(mock, View::from_path("/alerts/slack"));

            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert!(app.state.form.as_ref().unwrap().is_save_button_active());
        }

        #[test]
        fn test_typing_after_failed_save_clears_error() {
            let (tx, _) = watch::channel(SubmissionState::default());
            let mut mock = dispatcher(&tx);
            mock.expect_submit().times(0);
            let mut app = app_with(mock, View::from_path("/alerts/slack"));

            app.handle_key(ctrl_s()).unwrap();
            assert!(webhook_error(&app));
            type_text(&mut app, "h");
            assert!(!webhook_error(&app));
        }

        #[test]
        fn test_backspace_on_empty_webhook_keeps_error() {
            let (tx, _) = watch::channel(SubmissionState::default());
            let mut mock = dispatcher(&tx);
            mock.expect_submit().times(0);
            let mut app = app_with(mock, View::from_path("/alerts/slack"));

            app.handle_key(ctrl_s()).unwrap();
            app.handle_key(key(KeyCode::Backspace)).unwrap();
            assert!(webhook_error(&app));
        }

        #[test]
        fn test_pasted_webhook_dispatches() {
            let (tx, _) = watch::channel(SubmissionState::default());
            let mut mock = dispatcher(&tx);
            mock.expect_submit()
                .withf(|p| p.config_name() == "slack")
                .times(1)
                .return_const(());
            let mut app = app_with(mock, View::from_path("/alerts/slack"));

            app.handle_paste("https://hooks.slack.com/services/T0/B0/x");
            app.handle_key(ctrl_s()).unwrap();
        }

        #[test]
        fn test_ctrl_u_clears_input() {
            let (tx, _) = watch::channel(SubmissionState::default());
            let mut mock = dispatcher(&tx);
            mock.expect_submit().times(0);
            let mut app = app_with(mock, View::from_path("/alerts/slack"));

            type_text(&mut app, "https://x");
            app.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL))
                .unwrap();
            app.handle_key(ctrl_s()).unwrap();
            assert!(webhook_error(&app));
        }

        #[test]
        fn test_paste_on_listing_is_ignored() {
            let (tx, _) = watch::channel(SubmissionState::default());
            let mut app = app_with(dispatcher(&tx), View::ChannelConfiguration);
            app.handle_paste("text");
            assert!(app.state.form.is_none());
        }
    }

    mod email_save {
        use super::*;

        #[test]
        fn test_complete_form_dispatches_mapped_payload() {
            let (tx, _) = watch::channel(SubmissionState::default());
            let mut mock = dispatcher(&tx);
            mock.expect_submit()
                .withf(|p| {
                    *p == AlertConfigPayload::Email(EmailSettings {
                        server: "mail.x.com".to_string(),
                        port: "587".to_string(),
                        username: "u".to_string(),
                        password: "p".to_string(),
                        sender_email: "a@x.com".to_string(),
                    })
                })
                .times(1)
                .return_const(());
            let mut app = app_with(mock, View::from_path("/alerts/email"));

            for value in ["mail.x.com", "587", "u", "p", "a@x.com"] {
                type_text(&mut app, value);
                app.handle_key(key(KeyCode::Tab)).unwrap();
            }
            app.handle_key(key(KeyCode::Enter)).unwrap();
        }

        #[test]
        fn test_missing_field_flags_without_dispatch() {
            let (tx, _) = watch::channel(SubmissionState::default());
            let mut mock = dispatcher(&tx);
            mock.expect_submit().times(0);
            let mut app = app_with(mock, View::from_path("/alerts/email"));

            type_text(&mut app, "mail.x.com");
            app.handle_key(ctrl_s()).unwrap();

            let form = app.state.form.as_ref().unwrap();
            assert!(!form.has_error(0));
            assert!((1..5).all(|i| form.has_error(i)));
        }

        #[test]
        fn test_dispatch_follows_live_values_not_flags() {
            let (tx, _) = watch::channel(SubmissionState::default());
            let mut mock = dispatcher(&tx);
            mock.expect_submit().times(1).return_const(());
            let mut app = app_with(mock, View::from_path("/alerts/email"));

            // First attempt with the port missing raises its flag
            {
                let form = app.state.form.as_mut().unwrap();
                form.set_email_field(EmailField::Smtp, "mail.x.com");
                form.set_email_field(EmailField::Username, "u");
                form.set_email_field(EmailField::Password, "p");
                form.set_email_field(EmailField::EmailSender, "a@x.com");
            }
            app.handle_key(ctrl_s()).unwrap();

            // Refill and save again; the stale flag does not block dispatch
            app.state
                .form
                .as_mut()
                .unwrap()
                .set_email_field(EmailField::Port, "587");
            app.handle_key(ctrl_s()).unwrap();

            assert!(app.state.form.as_ref().unwrap().has_error(1));
        }
    }

    mod other_save {
        use super::*;

        #[test]
        fn test_unknown_channel_saves_silently() {
            let (tx, _) = watch::channel(SubmissionState::default());
            let mut mock = dispatcher(&tx);
            mock.expect_submit().times(0);
            let mut app = app_with(mock, View::from_path("/alerts/webhook"));

            type_text(&mut app, "abc");
            app.handle_key(key(KeyCode::Enter)).unwrap();
            app.handle_key(ctrl_s()).unwrap();

            assert!(!app.state.form.as_ref().unwrap().has_error(0));
            assert!(app.state.current_view.is_form_view());
        }
    }

    mod submission {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_loading_is_mirrored() {
            let (tx, _) = watch::channel(SubmissionState::default());
            let mut app = app_with(dispatcher(&tx), View::from_path("/alerts/slack"));

            tx.send_replace(SubmissionState {
                loading: true,
                data: None,
                submission_id: Some(Uuid::new_v4()),
            });
            app.sync_submission();

            assert!(app.state.is_saving());
            assert!(app.state.current_view.is_form_view());
        }

        #[test]
        fn test_success_navigates_to_listing_once() {
            let (tx, _) = watch::channel(SubmissionState::default());
            let mut app = app_with(dispatcher(&tx), View::from_path("/alerts/email"));
            let id = Uuid::new_v4();

            tx.send_replace(success(id));
            app.sync_submission();

            assert_eq!(app.state.current_view.path(), CHANNEL_CONFIGURATION_PATH);
            assert!(app.state.last_saved_at.is_some());
            assert!(app.state
                .status_message
                .as_deref()
                .unwrap()
                .starts_with("Email configuration saved"));
            let history_len = app.state.view_history.len();

            // Re-publishing the same result is not a new transition
            app.navigate(View::AlertsForm(ChannelKind::Email));
            tx.send_replace(success(id));
            app.sync_submission();
            assert!(app.state.current_view.is_form_view());
            assert_eq!(app.state.view_history.len(), history_len + 1);
        }

        #[test]
        fn test_each_successful_submission_navigates() {
            let (tx, _) = watch::channel(SubmissionState::default());
            let mut app = app_with(dispatcher(&tx), View::from_path("/alerts/slack"));

            tx.send_replace(success(Uuid::new_v4()));
            app.sync_submission();
            assert_eq!(app.state.current_view, View::ChannelConfiguration);

            app.navigate(View::AlertsForm(ChannelKind::Slack));
            tx.send_replace(success(Uuid::new_v4()));
            app.sync_submission();
            assert_eq!(app.state.current_view, View::ChannelConfiguration);
        }

        #[test]
        fn test_failure_stays_on_form() {
            let (tx, _) = watch::channel(SubmissionState::default());
            let mut app = app_with(dispatcher(&tx), View::from_path("/alerts/slack"));

            tx.send_replace(SubmissionState {
                loading: false,
                data: Some(SubmissionData::failure("nope")),
                submission_id: Some(Uuid::new_v4()),
            });
            app.sync_submission();

            assert!(app.state.current_view.is_form_view());
            assert!(app.state.status_message.is_none());
        }

        #[test]
        fn test_success_before_mount_is_ignored() {
            let (tx, _) = watch::channel(success(Uuid::new_v4()));
            let mut app = app_with(dispatcher(&tx), View::from_path("/alerts/email"));

            app.sync_submission();
            assert!(app.state.current_view.is_form_view());
        }

        #[test]
        fn test_success_on_listing_does_not_navigate() {
            let (tx, _) = watch::channel(SubmissionState::default());
            let mut app = app_with(dispatcher(&tx), View::ChannelConfiguration);

            tx.send_replace(success(Uuid::new_v4()));
            app.sync_submission();

            assert!(app.state.view_history.is_empty());
            assert!(!app.state.is_saving());
        }

        #[test]
        fn test_no_change_is_noop() {
            let (tx, _) = watch::channel(SubmissionState::default());
            let mut app = app_with(dispatcher(&tx), View::from_path("/alerts/slack"));
            app.sync_submission();
            assert!(app.state.current_view.is_form_view());
        }
    }
}

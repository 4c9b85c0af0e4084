//! Alert channel form state and validation

use super::field::FormField;
use crate::state::{AlertConfigPayload, EmailSettings, SlackSettings};

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// Notification transport the form configures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelKind {
    Email,
    Slack,
    /// Unrecognised route segment; renders no fields
    Other(String),
}

impl ChannelKind {
    /// Channels offered on the channel configuration screen
    pub const CONFIGURABLE: [ChannelKind; 2] = [ChannelKind::Email, ChannelKind::Slack];

    pub fn from_segment(segment: &str) -> Self {
        match segment {
            "email" => Self::Email,
            "slack" => Self::Slack,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn segment(&self) -> &str {
        match self {
            Self::Email => "email",
            Self::Slack => "slack",
            Self::Other(segment) => segment,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Email => "Email",
            Self::Slack => "Slack",
            Self::Other(segment) => segment,
        }
    }
}

/// Identifies one of the SMTP inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailField {
    Smtp,
    Port,
    Username,
    Password,
    EmailSender,
}

impl EmailField {
    /// Form order
    pub const ALL: [EmailField; 5] = [
        EmailField::Smtp,
        EmailField::Port,
        EmailField::Username,
        EmailField::Password,
        EmailField::EmailSender,
    ];
}

/// SMTP input values
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp: FormField,
    pub port: FormField,
    pub username: FormField,
    pub password: FormField,
    pub emailsender: FormField,
}

impl EmailConfig {
    pub fn new() -> Self {
        Self {
            smtp: FormField::text(
                "SMTP server *",
                "Enter SMTP server",
                "Enter SMTP server",
            ),
            port: FormField::text("Port *", "Enter Port", "Enter Port"),
            username: FormField::text(
                "Username *",
                "Enter Username",
                "Enter username",
            ),
            password: FormField::masked(
                "Password *",
                "Enter Password",
                "Enter password",
            ),
            emailsender: FormField::text(
                "Email Sender *",
                "Enter Email",
                "Enter Email sender",
            ),
        }
    }

    pub fn field(&self, which: EmailField) -> &FormField {
        match which {
            EmailField::Smtp => &self.smtp,
            EmailField::Port => &self.port,
            EmailField::Username => &self.username,
            EmailField::Password => &self.password,
            EmailField::EmailSender => &self.emailsender,
        }
    }

    pub fn field_mut(&mut self, which: EmailField) -> &mut FormField {
        match which {
            EmailField::Smtp => &mut self.smtp,
            EmailField::Port => &mut self.port,
            EmailField::Username => &mut self.username,
            EmailField::Password => &mut self.password,
            EmailField::EmailSender => &mut self.emailsender,
        }
    }

    /// True when every input currently holds a value
    pub fn is_complete(&self) -> bool {
        EmailField::ALL.iter().all(|f| !self.field(*f).is_empty())
    }

    fn to_settings(&self) -> EmailSettings {
        EmailSettings {
            server: self.smtp.as_text().to_string(),
            port: self.port.as_text().to_string(),
            username: self.username.as_text().to_string(),
            password: self.password.as_text().to_string(),
            sender_email: self.emailsender.as_text().to_string(),
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-field "was empty at last save" flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmailFieldErrors {
    pub smtp: bool,
    pub port: bool,
    pub username: bool,
    pub password: bool,
    pub emailsender: bool,
}

impl EmailFieldErrors {
    pub fn get(&self, which: EmailField) -> bool {
        match which {
            EmailField::Smtp => self.smtp,
            EmailField::Port => self.port,
            EmailField::Username => self.username,
            EmailField::Password => self.password,
            EmailField::EmailSender => self.emailsender,
        }
    }

    fn flag(&mut self, which: EmailField) {
        match which {
            EmailField::Smtp => self.smtp = true,
            EmailField::Port => self.port = true,
            EmailField::Username => self.username = true,
            EmailField::Password => self.password = true,
            EmailField::EmailSender => self.emailsender = true,
        }
    }
}

/// Slack webhook input and its error flag
#[derive(Debug, Clone)]
pub struct WebhookForm {
    pub webhook_url: FormField,
    pub error: bool,
}

impl WebhookForm {
    pub fn new() -> Self {
        Self {
            webhook_url: FormField::text(
                "Webhook URL *",
                "Enter Webhook URL",
                "Enter Webhook URL",
            ),
            error: false,
        }
    }
}

impl Default for WebhookForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Field set for the active channel
#[derive(Debug, Clone)]
pub enum ChannelForm {
    Email {
        config: EmailConfig,
        errors: EmailFieldErrors,
    },
    Slack(WebhookForm),
    Empty,
}

/// State of the alert channel configuration form.
///
/// The channel is fixed at construction. Inputs are followed by a single
/// Save button row, which is where `active_field_index == field_count() - 1`.
#[derive(Debug, Clone)]
pub struct AlertsForm {
    pub kind: ChannelKind,
    pub channel: ChannelForm,
    pub active_field_index: usize,
}

impl AlertsForm {
    pub fn new(kind: ChannelKind) -> Self {
        let channel = match kind {
            ChannelKind::Email => ChannelForm::Email {
                config: EmailConfig::new(),
                errors: EmailFieldErrors::default(),
            },
            ChannelKind::Slack => ChannelForm::Slack(WebhookForm::new()),
            ChannelKind::Other(_) => ChannelForm::Empty,
        };
        Self {
            kind,
            channel,
            active_field_index: 0,
        }
    }

    /// Number of text inputs, excluding the Save button
    pub fn input_count(&self) -> usize {
        match self.channel {
            ChannelForm::Email { .. } => EmailField::ALL.len(),
            ChannelForm::Slack(_) => 1,
            ChannelForm::Empty => 0,
        }
    }

    /// Returns true if the Save button row is currently active
    pub fn is_save_button_active(&self) -> bool {
        self.active_field_index == self.input_count()
    }

    /// Whether the input at `index` should show its error message
    pub fn has_error(&self, index: usize) -> bool {
        match &self.channel {
            ChannelForm::Email { errors, .. } => EmailField::ALL
                .get(index)
                .is_some_and(|which| errors.get(*which)),
            ChannelForm::Slack(webhook) => index == 0 && webhook.error,
            ChannelForm::Empty => false,
        }
    }

    /// Replace the value of one SMTP input. Its error flag is left as is.
    #[cfg(test)]
    pub fn set_email_field(&mut self, which: EmailField, value: impl Into<String>) {
        if let ChannelForm::Email { config, .. } = &mut self.channel {
            config.field_mut(which).set_text(value);
        }
    }

    /// Replace the webhook URL and clear its error flag
    #[cfg(test)]
    pub fn set_webhook_url(&mut self, value: impl Into<String>) {
        if let ChannelForm::Slack(webhook) = &mut self.channel {
            webhook.webhook_url.set_text(value);
            webhook.error = false;
        }
    }

    /// Type a character into the active input
    pub fn input_char(&mut self, c: char) {
        self.edit_active(|field| field.push_char(c));
    }

    /// Delete the last character of the active input
    pub fn backspace(&mut self) {
        self.edit_active(FormField::pop_char);
    }

    /// Append pasted text to the active input, dropping control characters
    /// such as line breaks and tabs
    pub fn paste(&mut self, text: &str) {
        let text: String = text.chars().filter(|c| !c.is_control()).collect();
        if !text.is_empty() {
            self.edit_active(|field| field.push_str(&text));
        }
    }

    /// Empty the active input
    pub fn clear_active(&mut self) {
        self.edit_active(|field| field.set_text(""));
    }

    fn edit_active(&mut self, edit: impl FnOnce(&mut FormField)) {
        let index = self.active_field_index;
        match &mut self.channel {
            ChannelForm::Email { config, .. } => {
                if let Some(which) = EmailField::ALL.get(index) {
                    edit(config.field_mut(*which));
                }
            }
            ChannelForm::Slack(webhook) => {
                if index == 0 {
                    let before = webhook.webhook_url.as_text().to_string();
                    edit(&mut webhook.webhook_url);
                    if webhook.webhook_url.as_text() != before {
                        webhook.error = false;
                    }
                }
            }
            ChannelForm::Empty => {}
        }
    }

    /// Validate the inputs and build the payload to dispatch.
    ///
    /// Email inputs that are empty get their error flag raised; flags are
    /// never lowered here. Whether a payload is produced depends only on the
    /// live input values, not on the flags.
    pub fn save(&mut self) -> Option<AlertConfigPayload> {
        match &mut self.channel {
            ChannelForm::Email { config, errors } => {
                for which in EmailField::ALL {
                    if config.field(which).is_empty() {
                        errors.flag(which);
                    }
                }
                config
                    .is_complete()
                    .then(|| AlertConfigPayload::Email(config.to_settings()))
            }
            ChannelForm::Slack(webhook) => {
                if webhook.webhook_url.is_empty() {
                    webhook.error = true;
                    None
                } else {
                    Some(AlertConfigPayload::Slack(SlackSettings {
                        webhook_url: webhook.webhook_url.as_text().to_string(),
                    }))
                }
            }
            ChannelForm::Empty => None,
        }
    }
}

impl Form for AlertsForm {
    fn field_count(&self) -> usize {
        self.input_count() + 1 // inputs, save button
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.input_count());
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match &self.channel {
            ChannelForm::Email { config, .. } => {
                EmailField::ALL.get(index).map(|which| config.field(*which))
            }
            ChannelForm::Slack(webhook) if index == 0 => Some(&webhook.webhook_url),
            _ => None,
        }
    }
}

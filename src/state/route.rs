//! Navigation paths and the views they select

use super::forms::ChannelKind;

/// Route segment of the channel listing screen
const CHANNEL_CONFIGURATION: &str = "channelconfiguration";

/// Path navigated to after a configuration was stored
pub const CHANNEL_CONFIGURATION_PATH: &str = "/alerts/channelconfiguration";

/// Current view in the application
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    /// List of configurable channels
    #[default]
    ChannelConfiguration,
    /// Configuration form for one channel
    AlertsForm(ChannelKind),
}

impl View {
    /// Resolve a path of the form `/alerts/<segment>/...`.
    ///
    /// Only the third `/`-separated piece is looked at; a missing segment is
    /// treated as empty and lands on a form with no fields.
    pub fn from_path(path: &str) -> Self {
        let segment = path.split('/').nth(2).unwrap_or_default();
        if segment == CHANNEL_CONFIGURATION {
            Self::ChannelConfiguration
        } else {
            Self::AlertsForm(ChannelKind::from_segment(segment))
        }
    }

    /// Canonical path for this view
    pub fn path(&self) -> String {
        match self {
            Self::ChannelConfiguration => CHANNEL_CONFIGURATION_PATH.to_string(),
            Self::AlertsForm(kind) => format!("/alerts/{}", kind.segment()),
        }
    }

    pub fn is_form_view(&self) -> bool {
        matches!(self, Self::AlertsForm(_))
    }
}

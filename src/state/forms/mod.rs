//! Form domain layer
//!
//! Field values, per-field error flags and validation for the alert
//! channel form. Nothing here touches the terminal or the backend.

mod alerts_form;
mod field;

pub use alerts_form::{AlertsForm, ChannelKind, Form};
pub use field::FormField;

#[cfg(test)]
pub use alerts_form::{ChannelForm, EmailField};

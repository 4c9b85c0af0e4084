//! Form rendering module
//!
//! - `field_renderer`: Field rendering utilities
//! - `alerts_form`: Alert channel configuration form

mod alerts_form;
mod field_renderer;

pub use alerts_form::draw_alerts_form;

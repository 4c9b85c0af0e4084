//! Alert backend access
//!
//! `AlertBackend` is the HTTP seam, `AlertDispatch` is the capability the
//! form submits through. `AlertStore` joins the two.

mod client;
mod error;
mod store;
mod traits;

pub use client::HttpAlertBackend;
pub use error::BackendError;
pub use store::AlertStore;
pub use traits::{AlertBackend, AlertDispatch};

#[cfg(test)]
pub use traits::{MockAlertBackend, MockAlertDispatch};

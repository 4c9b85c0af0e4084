//! Application state module

mod app_state;
mod forms;
mod payload;
mod route;

pub use app_state::*;
pub use forms::*;
pub use payload::*;
pub use route::*;

//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the loaded catalog,
//! pane focus and list selection state.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;

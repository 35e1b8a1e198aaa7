//! Terminal UI
//!
//! ratatui front end for the prompt wizard: an auth screen when there is no
//! session, otherwise the three wizard steps.

pub mod app;
pub mod events;
pub mod render;
mod runner;

pub use app::{App, Screen};
pub use events::{EventHandler, TuiEvent};
pub use runner::run;

//! Prompt Wizard - compose AI content prompts from the terminal
//!
//! A three-step wizard for content editors: pick a Webflow website, pick one
//! of its collections, then write a prompt (or work one out with the chat
//! assistant) and submit it to a workflow webhook.
//!
//! ## Quick Start
//!
//! ```bash
//! # Interactive wizard
//! prompt-wizard
//!
//! # Headless submission
//! prompt-wizard submit --website <id> --collection <id> --prompt "..." --model <id>
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod services;
pub mod session;
pub mod tui;
pub mod wizard;

// Re-export commonly used types
pub use config::Config;
pub use error::{ApiError, ApiResult, ErrorCode};
pub use session::{Navigation, Route, Session};
pub use wizard::PromptWizard;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

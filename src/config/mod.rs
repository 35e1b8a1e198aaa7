//! Configuration Module
//!
//! Endpoint URLs, wizard constants and logging settings, layered from
//! defaults, TOML files and environment variables.

pub mod secrets;
mod types;

pub use secrets::SecretString;
pub use types::*;

//! Prompt Wizard
//!
//! A 3-step wizard: pick a website, pick one of its collections, then
//! compose a prompt (blog template form or chat-assisted form) and submit
//! it to the webhook. The state machine here knows nothing about terminals
//! or HTTP; the TUI and the headless CLI both drive it.

mod chat;
mod input;
mod navigation;
mod presets;
mod selector;
mod state;
mod submit;
mod types;

#[cfg(test)]
mod tests;

pub use chat::{CHAT_FALLBACK, ChatPanel};
pub use presets::{BLOG_PRESET, DEFAULT_PRESET, PRESET_PROMPTS, PresetPrompt, preset_for};
pub use selector::{LoadState, Selector, SelectorItem};
pub use state::PromptWizard;
pub use submit::{SUBMIT_FAILURE_MESSAGE, SUBMIT_SUCCESS_MESSAGE};
pub use types::{
    ComposeFocus, ComposeForm, Field, FormData, FormErrors, Notification, NotificationKind,
    SubmitOutcome, WizardAction, WizardSettings, WizardStep,
};

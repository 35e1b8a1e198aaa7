//! Chat-assist panel used by the assisted compose form.
//!
//! The panel only keeps conversation state. Sending is split in two so the
//! app can run the webhook call on a spawned task: [`ChatPanel::begin_send`]
//! builds the request, [`ChatPanel::apply_reply`] records whatever came back.

use crate::api::{ChatMessage, ChatReply, ChatRequest, Sender};
use crate::error::ApiResult;

/// Bot text shown when the chat webhook could not be reached
pub const CHAT_FALLBACK: &str = "Sorry, I couldn't reach the assistant. Please try again.";

#[derive(Debug, Clone)]
pub struct ChatPanel {
    messages: Vec<ChatMessage>,
    session_id: String,
    /// Text typed but not yet sent
    pub input: String,
    busy: bool,
    minimized: bool,
    final_prompt: Option<String>,
    markers: Vec<String>,
}

impl ChatPanel {
    /// Panel seeded with `initial` as the first bot message
    pub fn new(initial: &str, markers: Vec<String>) -> Self {
        let mut messages = Vec::new();
        if !initial.trim().is_empty() {
            messages.push(ChatMessage::new(Sender::Bot, initial));
        }
        Self {
            messages,
            session_id: uuid::Uuid::new_v4().to_string(),
            input: String::new(),
            busy: false,
            minimized: false,
            final_prompt: None,
            markers: markers
                .into_iter()
                .map(|m| m.trim().to_lowercase())
                .filter(|m| !m.is_empty())
                .collect(),
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    /// Collapse or expand the message list. Messages and input are kept.
    pub fn toggle_minimized(&mut self) {
        self.minimized = !self.minimized;
    }

    /// Final prompt detected in the conversation so far
    pub fn final_prompt(&self) -> Option<&str> {
        self.final_prompt.as_deref()
    }

    /// Record `text` as a user message and build the webhook request.
    ///
    /// Returns `None` for blank text or while a reply is pending.
    pub fn begin_send(&mut self, text: &str) -> Option<ChatRequest> {
        let text = text.trim();
        if text.is_empty() || self.busy {
            return None;
        }
        self.messages.push(ChatMessage::new(Sender::User, text));
        self.busy = true;
        Some(ChatRequest {
            message: text.to_string(),
            chat_history: self.messages.clone(),
            session_id: self.session_id.clone(),
        })
    }

    /// Send whatever is in the input box, clearing it on success
    pub fn send_input(&mut self) -> Option<ChatRequest> {
        let text = std::mem::take(&mut self.input);
        let request = self.begin_send(&text);
        if request.is_none() {
            self.input = text;
        }
        request
    }

    /// Record the webhook result. Failures turn into the fallback bot text.
    pub fn apply_reply(&mut self, result: ApiResult<ChatReply>) {
        self.busy = false;
        match result {
            Ok(reply) => {
                if let Some(prompt) = self.detect_final_prompt(&reply) {
                    tracing::debug!("Chat produced a final prompt ({} chars)", prompt.len());
                    self.final_prompt = Some(prompt);
                }
                self.messages.push(ChatMessage::new(Sender::Bot, reply.response));
            }
            Err(e) => {
                tracing::warn!(code = e.code().as_str(), "Chat webhook failed: {}", e);
                self.messages.push(ChatMessage::new(Sender::Bot, CHAT_FALLBACK));
            }
        }
    }

    /// Explicit `finalPrompt` first, then a marker phrase in the reply text
    fn detect_final_prompt(&self, reply: &ChatReply) -> Option<String> {
        if let Some(explicit) = reply.final_prompt.as_deref()
            && !explicit.trim().is_empty()
        {
            return Some(explicit.to_string());
        }
        let lowered = reply.response.to_lowercase();
        self.markers
            .iter()
            .any(|marker| lowered.contains(marker.as_str()))
            .then(|| reply.response.clone())
    }

    /// Text to use as the prompt: final prompt, else the latest bot message
    pub fn completion(&self) -> String {
        if let Some(prompt) = &self.final_prompt {
            return prompt.clone();
        }
        self.messages
            .iter()
            .rev()
            .find(|m| m.sender == Sender::Bot)
            .map(|m| m.text.clone())
            .unwrap_or_default()
    }
}

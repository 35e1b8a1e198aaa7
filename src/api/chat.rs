//! Chat assistant webhook client.

use super::models::{ChatReply, ChatRequest};
use super::{ChatBackend, ensure_success, with_bearer};
use crate::config::SecretString;
use crate::error::{ApiError, ApiResult};
use async_trait::async_trait;
use reqwest::Client;

pub struct ChatWebhookClient {
    url: String,
    token: Option<SecretString>,
    http: Client,
}

impl ChatWebhookClient {
    pub fn new(url: impl Into<String>, token: Option<SecretString>) -> Self {
        Self {
            url: url.into(),
            token,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl ChatBackend for ChatWebhookClient {
    async fn send(&self, request: &ChatRequest) -> ApiResult<ChatReply> {
        if self.url.is_empty() {
            return Err(ApiError::NotConfigured("chat webhook"));
        }
        tracing::debug!(
            session = %request.session_id,
            history = request.chat_history.len(),
            "Sending chat message"
        );

        let resp = with_bearer(self.http.post(&self.url), self.token.as_ref())
            .json(request)
            .send()
            .await?;
        let resp = ensure_success(resp).await?;
        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

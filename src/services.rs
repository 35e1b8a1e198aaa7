//! Backend services wired from configuration.

use std::sync::Arc;

use crate::api::{
    ChatBackend, ChatWebhookClient, ContentApiClient, ContentSource, SubmissionGateway,
    WebhookGateway,
};
use crate::config::{Config, SecretString};
use crate::session::Session;

/// The three backends the wizard needs, shared with spawned tasks
#[derive(Clone)]
pub struct ServiceContext {
    pub content: Arc<dyn ContentSource>,
    pub gateway: Arc<dyn SubmissionGateway>,
    pub chat: Arc<dyn ChatBackend>,
}

impl ServiceContext {
    pub fn new(
        content: Arc<dyn ContentSource>,
        gateway: Arc<dyn SubmissionGateway>,
        chat: Arc<dyn ChatBackend>,
    ) -> Self {
        Self {
            content,
            gateway,
            chat,
        }
    }

    /// HTTP clients for the configured endpoints
    pub fn from_config(config: &Config, session: &Session) -> Self {
        let token = bearer_token(config, session);
        if token.is_none() {
            tracing::debug!("No bearer token configured; requests go out unauthenticated");
        }
        Self {
            content: Arc::new(ContentApiClient::from_config(&config.api, token.clone())),
            gateway: Arc::new(WebhookGateway::new(
                config.api.webhook_url.clone(),
                token.clone(),
            )),
            chat: Arc::new(ChatWebhookClient::new(config.chat.webhook_url.clone(), token)),
        }
    }
}

/// Configured API token first, then the session token
pub fn bearer_token(config: &Config, session: &Session) -> Option<SecretString> {
    config
        .api
        .api_token
        .clone()
        .filter(|t| !t.is_empty())
        .or_else(|| session.token().cloned())
}

//! External service clients
//!
//! Every backend the wizard talks to sits behind a trait so the wizard and
//! the TUI can be driven by mocks in tests:
//!
//! - [`ContentSource`]: site, collection and model-deployment listings
//! - [`SubmissionGateway`]: the terminal webhook POST
//! - [`ChatBackend`]: the chat-assist webhook

pub mod chat;
pub mod content;
pub mod models;
pub mod submit;

pub use chat::ChatWebhookClient;
pub use content::ContentApiClient;
pub use models::*;
pub use submit::WebhookGateway;

use crate::config::SecretString;
use crate::error::{ApiError, ApiResult};
use crate::wizard::FormData;
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};

/// Listings from the content API
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn list_sites(&self) -> ApiResult<Vec<Website>>;

    async fn list_collections(&self, site_id: &str) -> ApiResult<Vec<Collection>>;

    /// Only deployments with `status == "succeeded"`
    async fn list_models(&self) -> ApiResult<Vec<ModelDeployment>>;
}

/// Terminal submission of a completed form
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    async fn submit(&self, form: &FormData) -> ApiResult<()>;
}

/// Chat assistant used by the assisted compose form
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> ApiResult<ChatReply>;
}

/// Attach `Authorization: Bearer` when a token is configured
pub(crate) fn with_bearer(builder: RequestBuilder, token: Option<&SecretString>) -> RequestBuilder {
    match token {
        Some(token) if !token.is_empty() => builder.bearer_auth(token.expose_secret()),
        _ => builder,
    }
}

/// Map non-2xx responses to errors. 401 is singled out so the caller can
/// send the user to the auth page.
pub(crate) async fn ensure_success(resp: Response) -> ApiResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::Status { status, body })
}

/// Join a base URL and an absolute path without doubling the slash
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

//! Submission gateway: POST the completed form to the configured webhook.
//!
//! No retries, no backoff, no idempotency key. The wizard decides what a
//! failure means for the user.

use super::{SubmissionGateway, ensure_success, with_bearer};
use crate::config::SecretString;
use crate::error::{ApiError, ApiResult};
use crate::wizard::FormData;
use async_trait::async_trait;
use reqwest::Client;

pub struct WebhookGateway {
    url: String,
    token: Option<SecretString>,
    http: Client,
}

impl WebhookGateway {
    pub fn new(url: impl Into<String>, token: Option<SecretString>) -> Self {
        Self {
            url: url.into(),
            token,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl SubmissionGateway for WebhookGateway {
    async fn submit(&self, form: &FormData) -> ApiResult<()> {
        if self.url.is_empty() {
            return Err(ApiError::NotConfigured("submission webhook"));
        }

        tracing::info!(
            website = %form.selected_website,
            collection = %form.selected_collection,
            model = %form.model,
            "Submitting prompt ({} chars)",
            form.prompt.chars().count()
        );

        // `.json()` sets Content-Type: application/json
        let resp = with_bearer(self.http.post(&self.url), self.token.as_ref())
            .json(form)
            .send()
            .await?;
        ensure_success(resp).await?;

        tracing::info!("Submission accepted");
        Ok(())
    }
}

//! Wire and domain models for the external services.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A website on the content API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Website {
    pub id: String,
    pub name: String,
}

/// A content collection belonging to a website
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
}

/// Site/collection entry as returned by the content API.
/// Sites carry `displayName`; some collection endpoints only `name`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ListingEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "displayName")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl ListingEntry {
    /// `(id, name)`, or `None` when the entry has no id
    pub fn into_pair(self) -> Option<(String, String)> {
        let id = self.id.filter(|id| !id.is_empty())?;
        let name = self.display_name.or(self.name).unwrap_or_default();
        Some((id, name))
    }
}

impl From<(String, String)> for Website {
    fn from((id, name): (String, String)) -> Self {
        Self { id, name }
    }
}

impl From<(String, String)> for Collection {
    fn from((id, name): (String, String)) -> Self {
        Self { id, name }
    }
}

/// Deployment status value that makes a model selectable
pub const DEPLOYMENT_SUCCEEDED: &str = "succeeded";

/// One model deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDeployment {
    pub id: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub status: String,
}

impl ModelDeployment {
    pub fn is_available(&self) -> bool {
        self.status == DEPLOYMENT_SUCCEEDED
    }

    /// `"<model> (<id>)"`
    pub fn label(&self) -> String {
        format!("{} ({})", self.model, self.id)
    }
}

/// `GET /azure/model-deployments` response
#[derive(Debug, Clone, Deserialize)]
pub struct ModelDeploymentList {
    #[serde(default)]
    pub data: Vec<ModelDeployment>,
    #[serde(default)]
    pub object: Option<String>,
}

impl ModelDeploymentList {
    /// Only deployments that finished successfully can be offered
    pub fn available(self) -> Vec<ModelDeployment> {
        self.data.into_iter().filter(|m| m.is_available()).collect()
    }
}

/// Who wrote a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.into(),
            sender,
            timestamp: Utc::now(),
        }
    }
}

/// Body posted to the chat webhook
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    pub chat_history: Vec<ChatMessage>,
    pub session_id: String,
}

/// Chat webhook reply
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub final_prompt: Option<String>,
}

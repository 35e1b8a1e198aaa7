use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::api::ChatRequest;
use crate::config::{Config, DEFAULT_BLOG_COLLECTION_ID};

/// Current step in the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    Website,
    Collection,
    Compose,
}

impl WizardStep {
    /// Step number (1-based)
    pub fn number(&self) -> usize {
        match self {
            Self::Website => 1,
            Self::Collection => 2,
            Self::Compose => 3,
        }
    }

    pub fn total() -> usize {
        3
    }

    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Website => Some(Self::Collection),
            Self::Collection => Some(Self::Compose),
            Self::Compose => None,
        }
    }

    pub fn prev(&self) -> Option<Self> {
        match self {
            Self::Website => None,
            Self::Collection => Some(Self::Website),
            Self::Compose => Some(Self::Collection),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Website => "Select Website",
            Self::Collection => "Select Collection",
            Self::Compose => "Compose Prompt",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            Self::Website => "Which site is this content for?",
            Self::Collection => "Pick the collection the content lands in",
            Self::Compose => "Write the prompt, pick a model, send it off",
        }
    }
}

/// Every form field, by identity rather than by string key
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Prompt,
    Keywords,
    Model,
    OtherDetails,
    SelectedWebsite,
    SelectedCollection,
    Category,
}

impl Field {
    /// JSON key used in the submission payload
    pub fn key(&self) -> &'static str {
        match self {
            Self::Prompt => "prompt",
            Self::Keywords => "keywords",
            Self::Model => "model",
            Self::OtherDetails => "otherDetails",
            Self::SelectedWebsite => "selectedWebsite",
            Self::SelectedCollection => "selectedCollection",
            Self::Category => "category",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Prompt => "Prompt",
            Self::Keywords => "Keywords",
            Self::Model => "AI Model",
            Self::OtherDetails => "Other Details",
            Self::SelectedWebsite => "Website",
            Self::SelectedCollection => "Collection",
            Self::Category => "Category",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Prompt => "Enter your prompt here...",
            Self::Keywords => "Enter comma separated keywords...",
            Self::Model => "e.g., GPT-4, Claude, etc.",
            Self::OtherDetails => "Enter any additional details...",
            Self::Category => "Enter blog category...",
            Self::SelectedWebsite => "Choose a website...",
            Self::SelectedCollection => "Search collections...",
        }
    }
}

/// The form being built. Serialized as-is for the submission webhook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    pub prompt: String,
    pub keywords: String,
    pub model: String,
    pub other_details: String,
    pub selected_website: String,
    pub selected_website_name: String,
    pub selected_collection: String,
    pub selected_collection_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl FormData {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Prompt => &self.prompt,
            Field::Keywords => &self.keywords,
            Field::Model => &self.model,
            Field::OtherDetails => &self.other_details,
            Field::SelectedWebsite => &self.selected_website,
            Field::SelectedCollection => &self.selected_collection,
            Field::Category => self.category.as_deref().unwrap_or(""),
        }
    }

    pub(super) fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Prompt => &mut self.prompt,
            Field::Keywords => &mut self.keywords,
            Field::Model => &mut self.model,
            Field::OtherDetails => &mut self.other_details,
            Field::SelectedWebsite => &mut self.selected_website,
            Field::SelectedCollection => &mut self.selected_collection,
            Field::Category => self.category.get_or_insert_with(String::new),
        }
    }

    /// An empty category is the same as no category
    pub(super) fn normalize(&mut self) {
        if self.category.as_deref().is_some_and(str::is_empty) {
            self.category = None;
        }
    }
}

/// Field-level validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<Field, String>);

impl FormErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn clear_field(&mut self, field: Field) {
        self.0.remove(&field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Toast shown after a submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub shown_at: Instant,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            shown_at: Instant::now(),
        }
    }

    pub fn is_expired(&self, now: Instant, timeout: Duration) -> bool {
        now.saturating_duration_since(self.shown_at) >= timeout
    }
}

/// Which step-3 form applies to the selected collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeForm {
    /// Blog collection: freeform prompt (template on demand), category required
    Blog,
    /// Any other collection: chat-assisted prompt, model picked from deployments
    Assisted,
}

/// Focused element on the compose step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeFocus {
    Chat,
    Prompt,
    Category,
    Keywords,
    Model,
    OtherDetails,
    Submit,
}

impl ComposeFocus {
    /// Tab order for a form
    pub fn order(form: ComposeForm) -> &'static [ComposeFocus] {
        match form {
            ComposeForm::Blog => &[
                Self::Prompt,
                Self::Category,
                Self::Keywords,
                Self::Model,
                Self::OtherDetails,
                Self::Submit,
            ],
            ComposeForm::Assisted => &[
                Self::Chat,
                Self::Keywords,
                Self::Model,
                Self::OtherDetails,
                Self::Submit,
            ],
        }
    }

    /// Form field edited while this element has focus
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::Prompt => Some(Field::Prompt),
            Self::Category => Some(Field::Category),
            Self::Keywords => Some(Field::Keywords),
            Self::Model => Some(Field::Model),
            Self::OtherDetails => Some(Field::OtherDetails),
            Self::Chat | Self::Submit => None,
        }
    }
}

/// What the app should do after the wizard handled an event
#[derive(Debug, Clone, PartialEq)]
pub enum WizardAction {
    /// Nothing special
    None,
    /// User left the wizard (Esc on step 1, Ctrl+C)
    Cancel,
    /// Website selector mounted: fetch sites
    LoadSites,
    /// Collection selector mounted: fetch collections for this site id
    LoadCollections(String),
    /// Assisted form mounted: fetch model deployments
    LoadModels,
    /// Post this message to the chat webhook
    SendChat(ChatRequest),
    /// Post this form to the submission webhook
    Submit(FormData),
}

/// Result of a submission attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Step-3 validation failed; nothing was sent
    Invalid,
    /// A submission is already in flight
    Busy,
    /// Accepted; the wizard was reset to step 1
    Submitted,
    /// Rejected or unreachable; form data kept for a retry
    Failed,
    /// HTTP 401; the caller should send the user to the auth page
    Unauthorized,
}

/// Settings the wizard takes from configuration
#[derive(Debug, Clone)]
pub struct WizardSettings {
    pub blog_collection_id: String,
    pub notification_timeout: Duration,
    pub final_prompt_markers: Vec<String>,
}

impl Default for WizardSettings {
    fn default() -> Self {
        Self {
            blog_collection_id: DEFAULT_BLOG_COLLECTION_ID.to_string(),
            notification_timeout: Duration::from_secs(5),
            final_prompt_markers: vec!["final prompt".to_string()],
        }
    }
}

impl From<&Config> for WizardSettings {
    fn from(config: &Config) -> Self {
        Self {
            blog_collection_id: config.wizard.blog_collection_id.clone(),
            notification_timeout: Duration::from_secs(config.wizard.notification_timeout_secs),
            final_prompt_markers: config.chat.final_prompt_markers.clone(),
        }
    }
}

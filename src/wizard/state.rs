use std::time::Instant;

use super::chat::ChatPanel;
use super::presets::{BLOG_PRESET, PresetPrompt, preset_for};
use super::selector::Selector;
use super::types::*;
use crate::api::{ChatReply, Collection, ModelDeployment, Website};
use crate::error::ApiResult;

/// Prompt wizard state
///
/// Pure state machine: every transition is a method call and anything that
/// needs the network comes back to the caller as a [`WizardAction`].
#[derive(Debug)]
pub struct PromptWizard {
    pub step: WizardStep,
    pub form: FormData,
    pub errors: FormErrors,
    pub is_submitting: bool,
    pub notification: Option<Notification>,

    /// Step 1
    pub websites: Selector<Website>,
    /// Step 2
    pub collections: Selector<Collection>,
    /// Step 3, assisted form only
    pub models: Selector<ModelDeployment>,
    /// Step 3, assisted form only. Created on entering the step.
    pub chat: Option<ChatPanel>,
    pub compose_focus: ComposeFocus,

    pub settings: WizardSettings,
}

impl Default for PromptWizard {
    fn default() -> Self {
        Self::new(WizardSettings::default())
    }
}

impl PromptWizard {
    pub fn new(settings: WizardSettings) -> Self {
        Self {
            step: WizardStep::Website,
            form: FormData::default(),
            errors: FormErrors::default(),
            is_submitting: false,
            notification: None,
            websites: Selector::new("websites"),
            collections: Selector::filterable("collections"),
            models: Selector::new("available models"),
            chat: None,
            compose_focus: ComposeFocus::Prompt,
            settings,
        }
    }

    /// Back to a blank form on step 1
    pub fn reset(&mut self) {
        self.step = WizardStep::Website;
        self.form = FormData::default();
        self.errors = FormErrors::default();
        self.is_submitting = false;
        self.websites.reset();
        self.collections.reset();
        self.models.reset();
        self.chat = None;
        self.compose_focus = ComposeFocus::Prompt;
    }

    pub fn is_blog_collection(&self) -> bool {
        !self.form.selected_collection.is_empty()
            && self.form.selected_collection == self.settings.blog_collection_id
    }

    /// Which step-3 form the selected collection uses
    pub fn compose_form(&self) -> ComposeForm {
        if self.is_blog_collection() {
            ComposeForm::Blog
        } else {
            ComposeForm::Assisted
        }
    }

    /// Preset for the selected collection
    pub fn preset(&self) -> &'static PresetPrompt {
        if self.is_blog_collection() {
            return &BLOG_PRESET;
        }
        preset_for(&self.form.selected_collection)
    }

    /// Website picked. A different site invalidates the collection.
    pub fn select_website(&mut self, id: &str, name: &str) {
        if self.form.selected_website != id {
            tracing::debug!("Website changed to {}", id);
            self.form.selected_collection.clear();
            self.form.selected_collection_name.clear();
            self.form.prompt.clear();
            self.collections.reset();
            self.chat = None;
        }
        self.form.selected_website = id.to_string();
        self.form.selected_website_name = name.to_string();
        self.errors.clear_field(Field::SelectedWebsite);
    }

    /// Collection picked. The prompt is always cleared, even on re-select.
    pub fn select_collection(&mut self, id: &str, name: &str) {
        self.form.selected_collection = id.to_string();
        self.form.selected_collection_name = name.to_string();
        self.form.prompt.clear();
        self.chat = None;
        self.errors.clear_field(Field::SelectedCollection);
    }

    /// Replace a field's value
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        *self.form.get_mut(field) = value.into();
        self.errors.clear_field(field);
    }

    /// Edit a field in place (typing, backspace)
    pub fn update_field(&mut self, field: Field, edit: impl FnOnce(&mut String)) {
        edit(self.form.get_mut(field));
        self.errors.clear_field(field);
    }

    /// Check a step's required fields. Replaces `errors` wholesale.
    pub fn validate_step(&mut self, step: WizardStep) -> bool {
        let mut errors = FormErrors::default();
        let blank = |field: Field| self.form.get(field).trim().is_empty();

        match step {
            WizardStep::Website => {
                if blank(Field::SelectedWebsite) {
                    errors.insert(Field::SelectedWebsite, "Please select a website");
                }
            }
            WizardStep::Collection => {
                if blank(Field::SelectedCollection) {
                    errors.insert(Field::SelectedCollection, "Please select a collection");
                }
            }
            WizardStep::Compose => {
                if blank(Field::Prompt) {
                    errors.insert(Field::Prompt, "Prompt is required");
                }
                if blank(Field::Model) {
                    errors.insert(Field::Model, "AI Model is required");
                }
                if self.is_blog_collection() && blank(Field::Category) {
                    errors.insert(Field::Category, "Category is required");
                }
            }
        }

        self.errors = errors;
        self.errors.is_empty()
    }

    /// Mount the current step's components
    pub fn enter_step(&mut self) -> WizardAction {
        match self.step {
            WizardStep::Website => {
                self.websites.start_loading();
                WizardAction::LoadSites
            }
            WizardStep::Collection => {
                self.collections.start_loading();
                WizardAction::LoadCollections(self.form.selected_website.clone())
            }
            WizardStep::Compose => {
                let form = self.compose_form();
                self.compose_focus = ComposeFocus::order(form)[0];
                match form {
                    ComposeForm::Blog => WizardAction::None,
                    ComposeForm::Assisted => {
                        if self.chat.is_none() {
                            self.chat = Some(ChatPanel::new(
                                self.preset().template,
                                self.settings.final_prompt_markers.clone(),
                            ));
                        }
                        self.models.start_loading();
                        WizardAction::LoadModels
                    }
                }
            }
        }
    }

    pub fn apply_sites(&mut self, result: ApiResult<Vec<Website>>) {
        self.websites.finish_loading(result);
        let current = self.form.selected_website.clone();
        self.websites.focus_id(&current);
    }

    /// Listing for `site_id`; dropped when that site is no longer selected
    pub fn apply_collections(&mut self, site_id: &str, result: ApiResult<Vec<Collection>>) {
        if site_id != self.form.selected_website {
            tracing::debug!("Dropping collections for stale site {}", site_id);
            return;
        }
        self.collections.finish_loading(result);
        let current = self.form.selected_collection.clone();
        self.collections.focus_id(&current);
    }

    pub fn apply_models(&mut self, result: ApiResult<Vec<ModelDeployment>>) {
        self.models.finish_loading(result);
        let current = self.form.model.clone();
        self.models.focus_id(&current);
    }

    /// Reply for chat session `session_id`; dropped when that panel is gone
    pub fn apply_chat_reply(&mut self, session_id: &str, result: ApiResult<ChatReply>) {
        match self.chat.as_mut() {
            Some(chat) if chat.session_id() == session_id => chat.apply_reply(result),
            _ => tracing::debug!("Dropping chat reply for closed session {}", session_id),
        }
    }

    /// Copy the chat's final prompt (or latest bot message) into the prompt
    pub fn use_chat_completion(&mut self) {
        let Some(completion) = self.chat.as_ref().map(ChatPanel::completion) else {
            return;
        };
        if !completion.is_empty() {
            self.set_field(Field::Prompt, completion);
        }
    }

    /// Replace the prompt with the collection's preset template
    pub fn insert_template(&mut self) {
        let template = self.preset().template;
        self.set_field(Field::Prompt, template);
    }

    /// Submit control enabled?
    pub fn can_submit(&self) -> bool {
        if self.is_submitting {
            return false;
        }
        match self.compose_form() {
            ComposeForm::Blog => true,
            ComposeForm::Assisted => !self.form.prompt.trim().is_empty(),
        }
    }

    pub fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) {
        self.notification = Some(Notification::new(kind, message));
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    /// Drop the notification once it has been shown long enough
    pub fn expire_notification(&mut self, now: Instant) {
        if self
            .notification
            .as_ref()
            .is_some_and(|n| n.is_expired(now, self.settings.notification_timeout))
        {
            self.notification = None;
        }
    }
}

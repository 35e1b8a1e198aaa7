//! List selector state shared by the website, collection and model pickers.
//!
//! A selector is mounted (state goes to `Loading`), the app fetches the list
//! and hands the result back. Fetch failures are logged and shown as an
//! empty list; the only error a selector displays is the validation message
//! the wizard passes in.

use crate::api::{Collection, ModelDeployment, Website};
use crate::error::ApiResult;

/// Something a selector can list
pub trait SelectorItem {
    fn id(&self) -> &str;
    fn name(&self) -> &str;

    /// Text shown in the list
    fn label(&self) -> String {
        self.name().to_string()
    }
}

impl SelectorItem for Website {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
}

impl SelectorItem for Collection {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
}

impl SelectorItem for ModelDeployment {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.model
    }
    fn label(&self) -> String {
        ModelDeployment::label(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState<T> {
    /// Not mounted yet
    Idle,
    Loading,
    Loaded(Vec<T>),
}

#[derive(Debug, Clone)]
pub struct Selector<T> {
    kind: &'static str,
    state: LoadState<T>,
    /// `None` when this selector has no search box
    filter: Option<String>,
    cursor: usize,
}

impl<T: SelectorItem + Clone> Selector<T> {
    /// Selector without a search box
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            state: LoadState::Idle,
            filter: None,
            cursor: 0,
        }
    }

    /// Selector with a case-insensitive name filter
    pub fn filterable(kind: &'static str) -> Self {
        Self {
            filter: Some(String::new()),
            ..Self::new(kind)
        }
    }

    /// e.g. "websites", used in the empty-list text and logs
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Mount: forget the previous list and start over
    pub fn start_loading(&mut self) {
        self.state = LoadState::Loading;
        self.cursor = 0;
        if let Some(filter) = self.filter.as_mut() {
            filter.clear();
        }
    }

    /// Back to the unmounted state
    pub fn reset(&mut self) {
        self.state = LoadState::Idle;
        self.cursor = 0;
        if let Some(filter) = self.filter.as_mut() {
            filter.clear();
        }
    }

    /// Apply a fetch result. Errors degrade to an empty list.
    pub fn finish_loading(&mut self, result: ApiResult<Vec<T>>) {
        let items = match result {
            Ok(items) => {
                tracing::debug!("Loaded {} {}", items.len(), self.kind);
                items
            }
            Err(e) => {
                tracing::warn!(code = e.code().as_str(), "Failed to load {}: {}", self.kind, e);
                Vec::new()
            }
        };
        self.state = LoadState::Loaded(items);
        self.cursor = 0;
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, LoadState::Loaded(_))
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    /// Everything fetched, ignoring the filter
    pub fn items(&self) -> &[T] {
        match &self.state {
            LoadState::Loaded(items) => items,
            _ => &[],
        }
    }

    pub fn find(&self, id: &str) -> Option<&T> {
        self.items().iter().find(|item| item.id() == id)
    }

    pub fn has_filter(&self) -> bool {
        self.filter.is_some()
    }

    pub fn filter(&self) -> &str {
        self.filter.as_deref().unwrap_or("")
    }

    /// Items matching the filter, in fetch order
    pub fn visible(&self) -> Vec<&T> {
        let needle = self.filter().to_lowercase();
        self.items()
            .iter()
            .filter(|item| needle.is_empty() || item.name().to_lowercase().contains(&needle))
            .collect()
    }

    /// e.g. "No websites found"
    pub fn empty_text(&self) -> String {
        format!("No {} found", self.kind)
    }

    /// Loaded and nothing to pick: show the "no results" indicator
    pub fn shows_no_results(&self) -> bool {
        self.is_loaded() && self.visible().is_empty()
    }

    pub fn set_filter(&mut self, text: &str) {
        if let Some(filter) = self.filter.as_mut() {
            filter.clear();
            filter.push_str(text);
            self.cursor = 0;
        }
    }

    pub fn push_filter_char(&mut self, c: char) {
        if let Some(filter) = self.filter.as_mut() {
            filter.push(c);
            self.cursor = 0;
        }
    }

    pub fn pop_filter_char(&mut self) {
        if let Some(filter) = self.filter.as_mut() {
            filter.pop();
            self.cursor = 0;
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let len = self.visible().len();
        if len > 0 && self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    /// Put the cursor on `id` if it is visible
    pub fn focus_id(&mut self, id: &str) {
        let pos = self.visible().iter().position(|item| item.id() == id);
        if let Some(pos) = pos {
            self.cursor = pos;
        }
    }

    /// Item under the cursor
    pub fn highlighted(&self) -> Option<&T> {
        self.visible().get(self.cursor).copied()
    }

    /// `(id, name)` of the highlighted item, for reporting upward
    pub fn highlighted_pair(&self) -> Option<(String, String)> {
        self.highlighted()
            .map(|item| (item.id().to_string(), item.name().to_string()))
    }
}

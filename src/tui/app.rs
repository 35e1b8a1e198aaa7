//! TUI Application State
//!
//! Owns the wizard, runs its requested actions on background tasks and
//! feeds the results back in as events.

use super::events::{EventHandler, TuiEvent};
use crate::services::ServiceContext;
use crate::session::{Navigation, Route};
use crate::wizard::{PromptWizard, SubmitOutcome, WizardAction, WizardSettings};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// No session: offer to connect
    Auth,
    Wizard,
}

impl From<Route> for Screen {
    fn from(route: Route) -> Self {
        match route {
            Route::Auth => Self::Auth,
            Route::Dashboard => Self::Wizard,
        }
    }
}

pub struct App {
    pub screen: Screen,
    pub wizard: PromptWizard,
    pub should_quit: bool,
    /// Set when the app wants the caller to send the user somewhere
    pub navigation: Option<Navigation>,
    /// Last plumbing error, shown in the footer
    pub error_message: Option<String>,
    pub auth_url: String,
    pub started_at: Instant,
    services: ServiceContext,
    event_handler: EventHandler,
}

impl App {
    pub fn new(
        route: Route,
        settings: WizardSettings,
        services: ServiceContext,
        auth_url: impl Into<String>,
    ) -> Self {
        Self {
            screen: route.into(),
            wizard: PromptWizard::new(settings),
            should_quit: false,
            navigation: None,
            error_message: None,
            auth_url: auth_url.into(),
            started_at: Instant::now(),
            services,
            event_handler: EventHandler::new(),
        }
    }

    /// Mount the first wizard step (kicks off the site listing)
    pub async fn initialize(&mut self) -> Result<()> {
        if self.screen == Screen::Wizard {
            let action = self.wizard.enter_step();
            self.dispatch(action);
        }
        Ok(())
    }

    pub fn event_sender(&self) -> tokio::sync::mpsc::UnboundedSender<TuiEvent> {
        self.event_handler.sender()
    }

    pub async fn next_event(&mut self) -> Option<TuiEvent> {
        self.event_handler.next().await
    }

    /// Try to receive next event without blocking (returns None if queue is empty)
    pub fn try_next_event(&mut self) -> Option<TuiEvent> {
        self.event_handler.try_next()
    }

    /// Handle an event
    pub async fn handle_event(&mut self, event: TuiEvent) -> Result<()> {
        match event {
            TuiEvent::Key(key) => self.handle_key_event(key),
            TuiEvent::Paste(text) => {
                if self.screen == Screen::Wizard {
                    self.wizard.handle_paste(&text);
                }
            }
            TuiEvent::Resize => {}
            TuiEvent::Tick => self.wizard.expire_notification(Instant::now()),
            TuiEvent::SitesLoaded(result) => self.wizard.apply_sites(result),
            TuiEvent::CollectionsLoaded { site_id, result } => {
                self.wizard.apply_collections(&site_id, result)
            }
            TuiEvent::ModelsLoaded(result) => self.wizard.apply_models(result),
            TuiEvent::ChatReplied { session_id, result } => {
                self.wizard.apply_chat_reply(&session_id, result)
            }
            TuiEvent::SubmitFinished(result) => match self.wizard.finish_submit(result) {
                SubmitOutcome::Submitted => {
                    let action = self.wizard.enter_step();
                    self.dispatch(action);
                }
                SubmitOutcome::Unauthorized => self.redirect_to_auth(),
                _ => {}
            },
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        match self.screen {
            Screen::Auth => self.handle_auth_key(key),
            Screen::Wizard => {
                let action = self.wizard.handle_key(key);
                self.dispatch(action);
            }
        }
    }

    fn handle_auth_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.redirect_to_auth(),
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            _ => {}
        }
    }

    fn redirect_to_auth(&mut self) {
        tracing::info!("Redirecting to auth page");
        self.navigation = Some(Navigation::Redirect(self.auth_url.clone()));
        self.should_quit = true;
    }

    /// Run what the wizard asked for
    fn dispatch(&mut self, action: WizardAction) {
        let sender = self.event_sender();
        match action {
            WizardAction::None => {}
            WizardAction::Cancel => {
                tracing::debug!("Wizard cancelled");
                self.should_quit = true;
            }
            WizardAction::LoadSites => {
                let content = self.services.content.clone();
                tokio::spawn(async move {
                    let result = content.list_sites().await;
                    let _ = sender.send(TuiEvent::SitesLoaded(result));
                });
            }
            WizardAction::LoadCollections(site_id) => {
                let content = self.services.content.clone();
                tokio::spawn(async move {
                    let result = content.list_collections(&site_id).await;
                    let _ = sender.send(TuiEvent::CollectionsLoaded { site_id, result });
                });
            }
            WizardAction::LoadModels => {
                let content = self.services.content.clone();
                tokio::spawn(async move {
                    let result = content.list_models().await;
                    let _ = sender.send(TuiEvent::ModelsLoaded(result));
                });
            }
            WizardAction::SendChat(request) => {
                let chat = self.services.chat.clone();
                tokio::spawn(async move {
                    let result = chat.send(&request).await;
                    let _ = sender.send(TuiEvent::ChatReplied {
                        session_id: request.session_id,
                        result,
                    });
                });
            }
            WizardAction::Submit(payload) => {
                let gateway = self.services.gateway.clone();
                tokio::spawn(async move {
                    let result = gateway.submit(&payload).await;
                    let _ = sender.send(TuiEvent::SubmitFinished(result));
                });
            }
        }
    }

    /// Where the caller should send the user, if anywhere
    pub fn into_navigation(self) -> Option<Navigation> {
        self.navigation
    }
}

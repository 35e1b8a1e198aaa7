use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::PromptWizard;
use super::types::*;

fn ctrl(event: &KeyEvent) -> bool {
    event.modifiers.contains(KeyModifiers::CONTROL)
}

impl PromptWizard {
    /// Handle key events for the current step
    /// Returns `WizardAction` indicating what the app should do
    pub fn handle_key(&mut self, event: KeyEvent) -> WizardAction {
        if ctrl(&event) {
            match event.code {
                KeyCode::Char('c') => return WizardAction::Cancel,
                KeyCode::Char('x') => {
                    self.dismiss_notification();
                    return WizardAction::None;
                }
                _ => {}
            }
        }

        // Form and step are frozen until the gateway answers
        if self.is_submitting {
            return WizardAction::None;
        }

        // Global: Escape goes back (but if the collection filter is active, clear it first)
        if event.code == KeyCode::Esc {
            if self.step == WizardStep::Collection && !self.collections.filter().is_empty() {
                self.collections.set_filter("");
                return WizardAction::None;
            }
            if self.retreat() {
                return WizardAction::Cancel;
            }
            return self.enter_step();
        }

        match self.step {
            WizardStep::Website => self.handle_website_key(event),
            WizardStep::Collection => self.handle_collection_key(event),
            WizardStep::Compose => self.handle_compose_key(event),
        }
    }

    fn advance_and_enter(&mut self) -> WizardAction {
        if self.advance() {
            self.enter_step()
        } else {
            WizardAction::None
        }
    }

    fn handle_website_key(&mut self, event: KeyEvent) -> WizardAction {
        match event.code {
            KeyCode::Up => self.websites.move_up(),
            KeyCode::Down => self.websites.move_down(),
            KeyCode::Enter => {
                if let Some((id, name)) = self.websites.highlighted_pair() {
                    self.select_website(&id, &name);
                }
                return self.advance_and_enter();
            }
            _ => {}
        }
        WizardAction::None
    }

    fn handle_collection_key(&mut self, event: KeyEvent) -> WizardAction {
        match event.code {
            KeyCode::Up => self.collections.move_up(),
            KeyCode::Down => self.collections.move_down(),
            KeyCode::Enter => {
                if let Some((id, name)) = self.collections.highlighted_pair() {
                    self.select_collection(&id, &name);
                }
                return self.advance_and_enter();
            }
            KeyCode::Backspace => self.collections.pop_filter_char(),
            KeyCode::Char(c) if !ctrl(&event) => self.collections.push_filter_char(c),
            _ => {}
        }
        WizardAction::None
    }

    fn handle_compose_key(&mut self, event: KeyEvent) -> WizardAction {
        match event.code {
            KeyCode::Tab => {
                self.cycle_focus(true);
                return WizardAction::None;
            }
            KeyCode::BackTab => {
                self.cycle_focus(false);
                return WizardAction::None;
            }
            KeyCode::Char('s') if ctrl(&event) => return self.submit_action(),
            _ => {}
        }

        let focus = self.compose_focus;
        match focus {
            ComposeFocus::Chat => self.handle_chat_key(event),
            ComposeFocus::Submit => {
                if event.code == KeyCode::Enter {
                    return self.submit_action();
                }
                WizardAction::None
            }
            ComposeFocus::Model if self.compose_form() == ComposeForm::Assisted => {
                match event.code {
                    KeyCode::Up => self.models.move_up(),
                    KeyCode::Down => self.models.move_down(),
                    KeyCode::Enter => {
                        if let Some((id, _)) = self.models.highlighted_pair() {
                            self.set_field(Field::Model, id);
                        }
                    }
                    _ => {}
                }
                WizardAction::None
            }
            other => {
                if let Some(field) = other.field() {
                    self.handle_text_key(field, event);
                }
                WizardAction::None
            }
        }
    }

    fn handle_text_key(&mut self, field: Field, event: KeyEvent) {
        match event.code {
            KeyCode::Char('t') if ctrl(&event) && field == Field::Prompt => {
                self.insert_template();
            }
            KeyCode::Char(c) if !ctrl(&event) => self.update_field(field, |s| s.push(c)),
            KeyCode::Backspace => self.update_field(field, |s| {
                s.pop();
            }),
            KeyCode::Enter if field == Field::Prompt => self.update_field(field, |s| s.push('\n')),
            KeyCode::Enter => self.cycle_focus(true),
            _ => {}
        }
    }

    fn handle_chat_key(&mut self, event: KeyEvent) -> WizardAction {
        if ctrl(&event) {
            match event.code {
                KeyCode::Char('u') => self.use_chat_completion(),
                KeyCode::Char('n') => {
                    if let Some(chat) = self.chat.as_mut() {
                        chat.toggle_minimized();
                    }
                }
                _ => {}
            }
            return WizardAction::None;
        }

        let Some(chat) = self.chat.as_mut() else {
            return WizardAction::None;
        };
        match event.code {
            KeyCode::Enter => {
                if let Some(request) = chat.send_input() {
                    return WizardAction::SendChat(request);
                }
            }
            KeyCode::Backspace => {
                chat.input.pop();
            }
            KeyCode::Char(c) => chat.input.push(c),
            _ => {}
        }
        WizardAction::None
    }

    fn cycle_focus(&mut self, forward: bool) {
        let order = ComposeFocus::order(self.compose_form());
        let current = order
            .iter()
            .position(|f| *f == self.compose_focus)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % order.len()
        } else {
            (current + order.len() - 1) % order.len()
        };
        self.compose_focus = order[next];
    }

    /// Submit if the control is enabled and the form validates
    pub fn submit_action(&mut self) -> WizardAction {
        if !self.can_submit() {
            return WizardAction::None;
        }
        match self.begin_submit() {
            Ok(payload) => WizardAction::Submit(payload),
            Err(_) => WizardAction::None,
        }
    }

    /// Handle paste event - inserts text into the focused input
    pub fn handle_paste(&mut self, text: &str) {
        if self.is_submitting {
            return;
        }
        let first_line = text.split(['\r', '\n']).next().unwrap_or("").trim();

        match self.step {
            WizardStep::Website => {}
            WizardStep::Collection => {
                if !first_line.is_empty() {
                    let filter = format!("{}{}", self.collections.filter(), first_line);
                    self.collections.set_filter(&filter);
                }
            }
            WizardStep::Compose => {
                let focus = self.compose_focus;
                self.paste_into_compose(focus, text, first_line);
            }
        }
    }

    fn paste_into_compose(&mut self, focus: ComposeFocus, text: &str, first_line: &str) {
        match focus {
            ComposeFocus::Chat => {
                if let Some(chat) = self.chat.as_mut() {
                    chat.input.push_str(first_line);
                }
            }
            ComposeFocus::Prompt => {
                let clean = text.replace("\r\n", "\n").replace('\r', "\n");
                self.update_field(Field::Prompt, |s| s.push_str(&clean));
            }
            ComposeFocus::Model if self.compose_form() == ComposeForm::Assisted => {}
            other => {
                if let Some(field) = other.field()
                    && !first_line.is_empty()
                {
                    self.update_field(field, |s| s.push_str(first_line));
                }
            }
        }
    }
}

//! TUI events
//!
//! Terminal input and the results of background requests all arrive on one
//! unbounded channel, so the main loop only ever waits in one place.

use crate::api::{ChatReply, Collection, ModelDeployment, Website};
use crate::error::ApiResult;
use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;

/// Everything the app reacts to
#[derive(Debug)]
pub enum TuiEvent {
    Key(KeyEvent),
    Paste(String),
    Resize,
    /// Periodic wake-up for notification expiry and the spinner
    Tick,
    SitesLoaded(ApiResult<Vec<Website>>),
    CollectionsLoaded {
        site_id: String,
        result: ApiResult<Vec<Collection>>,
    },
    ModelsLoaded(ApiResult<Vec<ModelDeployment>>),
    ChatReplied {
        session_id: String,
        result: ApiResult<ChatReply>,
    },
    SubmitFinished(ApiResult<()>),
}

/// Event queue shared by the terminal listener and background tasks
pub struct EventHandler {
    tx: mpsc::UnboundedSender<TuiEvent>,
    rx: mpsc::UnboundedReceiver<TuiEvent>,
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    pub fn sender(&self) -> mpsc::UnboundedSender<TuiEvent> {
        self.tx.clone()
    }

    pub async fn next(&mut self) -> Option<TuiEvent> {
        self.rx.recv().await
    }

    /// Next queued event without waiting
    pub fn try_next(&mut self) -> Option<TuiEvent> {
        self.rx.try_recv().ok()
    }

    /// Forward crossterm input to `sender` until the app goes away
    pub fn start_terminal_listener(sender: mpsc::UnboundedSender<TuiEvent>) {
        tokio::spawn(async move {
            let mut stream = EventStream::new();
            while let Some(event) = stream.next().await {
                let event = match event {
                    Ok(event) => event,
                    Err(e) => {
                        tracing::error!("Terminal event stream failed: {}", e);
                        break;
                    }
                };
                let Some(tui_event) = Self::translate(event) else {
                    continue;
                };
                if sender.send(tui_event).is_err() {
                    break;
                }
            }
        });
    }

    /// Periodic ticks so the UI refreshes without input
    pub fn start_ticker(sender: mpsc::UnboundedSender<TuiEvent>, every: std::time::Duration) {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                if sender.send(TuiEvent::Tick).is_err() {
                    break;
                }
            }
        });
    }

    fn translate(event: Event) -> Option<TuiEvent> {
        match event {
            // Windows reports releases too
            Event::Key(key) if key.kind != KeyEventKind::Release => Some(TuiEvent::Key(key)),
            Event::Paste(text) => Some(TuiEvent::Paste(text)),
            Event::Resize(_, _) => Some(TuiEvent::Resize),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    #[test]
    fn test_key_release_ignored() {
        let press = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::empty());
        assert!(matches!(
            EventHandler::translate(Event::Key(press)),
            Some(TuiEvent::Key(_))
        ));

        let release = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::empty(),
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert!(EventHandler::translate(Event::Key(release)).is_none());
    }

    #[test]
    fn test_paste_passes_through() {
        match EventHandler::translate(Event::Paste("hello".to_string())) {
            Some(TuiEvent::Paste(text)) => assert_eq!(text, "hello"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_queue_order() {
        let mut handler = EventHandler::new();
        let tx = handler.sender();
        tx.send(TuiEvent::Tick).unwrap();
        tx.send(TuiEvent::Resize).unwrap();
        assert!(matches!(handler.next().await, Some(TuiEvent::Tick)));
        assert!(matches!(handler.try_next(), Some(TuiEvent::Resize)));
        assert!(handler.try_next().is_none());
    }
}

use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use tokio::sync::mpsc;

use crate::app::Action;

pub async fn run_event_loop(tx: mpsc::UnboundedSender<Action>) {
    let mut reader = EventStream::new();
    let mut tick = tokio::time::interval(Duration::from_secs(1));

    loop {
        tokio::select! {
            _ = tick.tick() => {
                if tx.send(Action::Tick).is_err() {
                    break;
                }
            }
            maybe_event = reader.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => {
                        if let Some(action) = key_to_action(key) {
                            if tx.send(action).is_err() {
                                break;
                            }
                        }
                    }
                    Some(Ok(Event::Resize(_, _))) => {
                        // Redraw on the next action
                        if tx.send(Action::Tick).is_err() {
                            break;
                        }
                    }
                    Some(Err(_)) | None => break,
                    _ => {}
                }
            }
        }
    }
}

fn key_to_action(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Printable keys go to the search field, so actions live on Ctrl.
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('y') => Some(Action::Key(KeyAction::CopyId)),
            KeyCode::Char('t') => Some(Action::Key(KeyAction::CopySummary)),
            KeyCode::Char('r') => Some(Action::Key(KeyAction::Refresh)),
            KeyCode::Char('u') => Some(Action::Key(KeyAction::ClearSearch)),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Up => Some(Action::Key(KeyAction::Up)),
        KeyCode::Down => Some(Action::Key(KeyAction::Down)),
        KeyCode::Enter => Some(Action::Key(KeyAction::PasteId)),
        KeyCode::Esc => Some(Action::Key(KeyAction::Escape)),
        KeyCode::Backspace => Some(Action::Key(KeyAction::Backspace)),
        KeyCode::Char(c) => Some(Action::Key(KeyAction::Char(c))),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Up,
    Down,
    PasteId,
    CopyId,
    CopySummary,
    Refresh,
    Escape,
    ClearSearch,
    Char(char),
    Backspace,
}

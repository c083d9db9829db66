//! Key event handlers for different UI modes

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AppState, UiMode};

/// Convert key events to messages based on current UI mode
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    if key.is_interrupt() {
        return Some(Message::Quit);
    }

    match state.ui_mode() {
        UiMode::Splash => None,
        UiMode::FatalAlert => handle_key_fatal_alert(key),
        UiMode::Alert => handle_key_alert(key),
        UiMode::GalleryPicker => handle_key_gallery_picker(key),
        UiMode::ClassList => handle_key_class_list(key),
        UiMode::Normal => handle_key_normal(key),
    }
}

/// Only the "Close App" action is available
fn handle_key_fatal_alert(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Enter => Some(Message::CloseApp),
        _ => None,
    }
}

fn handle_key_alert(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Enter | InputKey::Esc | InputKey::Char(' ') => Some(Message::DismissAlert),
        _ => None,
    }
}

fn handle_key_gallery_picker(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Up | InputKey::Char('k') => Some(Message::PickerUp),
        InputKey::Down | InputKey::Char('j') => Some(Message::PickerDown),
        InputKey::Home => Some(Message::PickerFirst),
        InputKey::End => Some(Message::PickerLast),
        InputKey::Enter => Some(Message::PickerAccept),
        InputKey::Esc => Some(Message::PickerBack),
        _ => None,
    }
}

fn handle_key_class_list(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc | InputKey::Char('l') => Some(Message::ToggleClassList),
        InputKey::Char('q') => Some(Message::Quit),
        _ => None,
    }
}

fn handle_key_normal(key: InputKey) -> Option<Message> {
    match key {
        // Shutter
        InputKey::Char('c') | InputKey::Char(' ') => Some(Message::CaptureRequested),
        InputKey::Char('g') => Some(Message::PickRequested),
        InputKey::Char('l') => Some(Message::ToggleClassList),
        InputKey::Char('q') | InputKey::Esc => Some(Message::Quit),
        _ => None,
    }
}

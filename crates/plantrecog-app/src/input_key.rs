//! Abstract input key event, independent of terminal library.
//!
//! Keeps plantrecog-app free of crossterm so the headless runner can drive
//! the engine without a terminal.

/// Abstract input key event.
/// Converted from crossterm::event::KeyEvent at the TUI boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    /// Regular character key
    Char(char),
    /// Character with Ctrl modifier (Ctrl+c, ...)
    CharCtrl(char),
    Up,
    Down,
    Home,
    End,
    Enter,
    Esc,
}

impl InputKey {
    /// Ctrl+C always terminates, whatever is on screen
    pub fn is_interrupt(&self) -> bool {
        matches!(self, InputKey::CharCtrl('c'))
    }
}

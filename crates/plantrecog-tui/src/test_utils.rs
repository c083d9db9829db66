//! Test utilities for widget and render tests
//!
//! Wraps ratatui's `TestBackend` with buffer inspection helpers, plus a few
//! state builders shared by the widget tests.

use plantrecog_app::handler::update;
use plantrecog_app::{AppState, BootstrapReport, Message};
use plantrecog_core::PermissionState;
use ratatui::{
    backend::TestBackend,
    buffer::{Buffer, Cell},
    layout::Rect,
    widgets::Widget,
    Frame, Terminal,
};

/// Standard test terminal width
pub const TEST_WIDTH: u16 = 80;
/// Standard test terminal height
pub const TEST_HEIGHT: u16 = 24;

/// Compact size for narrow-terminal tests
pub const COMPACT_WIDTH: u16 = 40;
pub const COMPACT_HEIGHT: u16 = 12;

/// Test terminal over an in-memory backend
pub struct TestTerminal {
    pub terminal: Terminal<TestBackend>,
}

impl TestTerminal {
    pub fn new() -> Self {
        Self::with_size(TEST_WIDTH, TEST_HEIGHT)
    }

    pub fn compact() -> Self {
        Self::with_size(COMPACT_WIDTH, COMPACT_HEIGHT)
    }

    pub fn with_size(width: u16, height: u16) -> Self {
        let backend = TestBackend::new(width, height);
        let terminal = Terminal::new(backend).expect("Failed to create test terminal");
        Self { terminal }
    }

    /// Full terminal area
    pub fn area(&self) -> Rect {
        let buffer = self.terminal.backend().buffer();
        Rect::new(0, 0, buffer.area.width, buffer.area.height)
    }

    /// Render a widget into `area`
    pub fn render_widget<W: Widget>(&mut self, widget: W, area: Rect) {
        self.terminal
            .draw(|frame| frame.render_widget(widget, area))
            .expect("Failed to draw");
    }

    /// Draw with an arbitrary closure (e.g. the full view function)
    pub fn draw_with<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(f).expect("Failed to draw");
    }

    pub fn buffer(&self) -> &Buffer {
        self.terminal.backend().buffer()
    }

    /// Whether `text` appears anywhere in the buffer
    pub fn buffer_contains(&self, text: &str) -> bool {
        self.content().contains(text)
    }

    /// Whether row `y` contains `text`
    pub fn line_contains(&self, y: u16, text: &str) -> bool {
        self.content()
            .lines()
            .nth(y as usize)
            .map(|line| line.contains(text))
            .unwrap_or(false)
    }

    pub fn cell_at(&self, x: u16, y: u16) -> Option<&Cell> {
        self.buffer().cell((x, y))
    }

    /// Buffer as text, one line per row
    pub fn content(&self) -> String {
        buffer_to_string(self.buffer())
    }

    pub fn clear(&mut self) {
        self.terminal.clear().expect("Failed to clear");
    }
}

impl Default for TestTerminal {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a buffer to a string, rows separated by newlines
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

/// Service up, three recognized classes, both permissions set to `permission`
pub fn ready_report(permission: PermissionState) -> BootstrapReport {
    BootstrapReport {
        service_up: true,
        camera: permission,
        media_library: permission,
        recognized: vec!["daisy".to_string(), "rose".to_string(), "tulip".to_string()],
        rejected: Vec::new(),
    }
}

/// State after a bootstrap settled with [`ready_report`], splash released
pub fn ready_state(permission: PermissionState) -> AppState {
    let mut state = AppState::new();
    update(&mut state, Message::BootstrapSettled(ready_report(permission)));
    state.splash.release_if_ready(state.readiness);
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    #[test]
    fn test_terminal_sizes() {
        assert_eq!(TestTerminal::new().area(), Rect::new(0, 0, 80, 24));
        assert_eq!(TestTerminal::compact().area(), Rect::new(0, 0, 40, 12));
    }

    #[test]
    fn test_buffer_contains_and_line_contains() {
        let mut term = TestTerminal::with_size(20, 3);
        term.render_widget(Paragraph::new("\nhello"), term.area());

        assert!(term.buffer_contains("hello"));
        assert!(term.line_contains(1, "hello"));
        assert!(!term.line_contains(0, "hello"));
        assert_eq!(term.cell_at(0, 1).map(|c| c.symbol()), Some("h"));
    }

    #[test]
    fn test_ready_state_is_drawable() {
        let state = ready_state(PermissionState::Granted);
        assert!(state.readiness.is_ready());
        assert!(!state.splash.is_held());
        assert_eq!(state.recognized.len(), 3);
    }
}

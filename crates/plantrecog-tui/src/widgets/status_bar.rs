//! Bottom status bar: submission lifecycle, permission slots and key hints

use plantrecog_app::AppState;
use plantrecog_core::PermissionResource;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::theme::styles;

pub struct StatusBar<'a> {
    state: &'a AppState,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn status_spans(&self) -> Vec<Span<'static>> {
        let (icon, label, style) = styles::lifecycle_indicator(self.state.prediction.lifecycle());
        let mut spans = vec![
            Span::raw(" "),
            Span::styled(format!("{} {}", icon, label), style),
        ];

        if let Some(id) = self.state.prediction.current() {
            spans.push(Span::styled(format!(" {}", id), styles::text_muted()));
        }

        for (resource, name) in [
            (PermissionResource::Camera, "cam"),
            (PermissionResource::MediaLibrary, "gallery"),
        ] {
            let (icon, _, style) = styles::permission_indicator(self.state.permission(resource));
            spans.push(Span::styled("  │  ", styles::text_muted()));
            spans.push(Span::styled(format!("{} {}", icon, name), style));
        }

        if self.state.settings.ui.show_class_count {
            spans.push(Span::styled("  │  ", styles::text_muted()));
            spans.push(Span::styled(
                format!("{} classes", self.state.recognized.len()),
                styles::text_secondary(),
            ));
        }

        spans
    }

    fn hint_spans() -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        for (key, label) in [("c", "shutter"), ("g", "gallery"), ("l", "classes"), ("q", "quit")] {
            spans.push(Span::styled(key, styles::keybinding()));
            spans.push(Span::styled(format!(" {}  ", label), styles::text_muted()));
        }
        spans
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(styles::border_inactive());
        let inner = block.inner(area);
        block.render(area, buf);

        let [left, right] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(42)]).areas(inner);
        Paragraph::new(Line::from(self.status_spans())).render(left, buf);
        Paragraph::new(Line::from(Self::hint_spans())).render(right, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ready_state, TestTerminal};
    use plantrecog_core::PermissionState;

    #[test]
    fn test_idle_status_with_permissions() {
        let state = ready_state(PermissionState::Granted);
        let mut term = TestTerminal::with_size(120, 2);
        term.render_widget(StatusBar::new(&state), term.area());

        assert!(term.buffer_contains("Idle"));
        assert!(term.buffer_contains("● cam"));
        assert!(term.buffer_contains("● gallery"));
        assert!(term.buffer_contains("3 classes"));
        assert!(term.buffer_contains("q quit"));
    }

    #[test]
    fn test_processing_shows_submission_id() {
        let mut state = ready_state(PermissionState::Denied);
        state.prediction.begin();
        let mut term = TestTerminal::with_size(120, 2);
        term.render_widget(StatusBar::new(&state), term.area());

        assert!(term.buffer_contains("Processing #1"));
        assert!(term.buffer_contains("✗ cam"));
    }

    #[test]
    fn test_class_count_can_be_hidden() {
        let mut state = ready_state(PermissionState::Granted);
        state.settings.ui.show_class_count = false;
        let mut term = TestTerminal::with_size(120, 2);
        term.render_widget(StatusBar::new(&state), term.area());

        assert!(!term.buffer_contains("3 classes"));
    }
}

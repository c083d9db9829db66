//! Camera panel: viewfinder frame with shutter and gallery controls

use plantrecog_app::{AcquisitionSource, AppState};
use plantrecog_core::PermissionResource;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::theme::styles;

pub struct CameraPanel<'a> {
    state: &'a AppState,
}

impl<'a> CameraPanel<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Center text of the viewfinder
    fn viewfinder_text(&self) -> (&'static str, ratatui::style::Style) {
        match self.state.pending {
            Some(AcquisitionSource::Camera) => ("Capturing...", styles::accent_bold()),
            Some(AcquisitionSource::Gallery) => ("Opening gallery...", styles::accent()),
            Some(AcquisitionSource::File) => ("Preparing image...", styles::accent()),
            None if self.state.prediction.is_in_flight() => {
                ("Uploading...", styles::accent_bold())
            }
            None if !self.state.settings.camera.enabled => {
                ("Camera disabled in config", styles::text_muted())
            }
            None if !self.state.permission(PermissionResource::Camera).is_granted() => {
                ("No camera access yet", styles::text_muted())
            }
            None => ("Point the camera at a plant", styles::text_secondary()),
        }
    }

    fn control(key: &'static str, label: &'static str, enabled: bool) -> Vec<Span<'static>> {
        let (key_style, label_style) = if enabled {
            (styles::keybinding(), styles::text_primary())
        } else {
            (styles::text_muted(), styles::text_muted())
        };
        vec![
            Span::styled("[", styles::text_muted()),
            Span::styled(key, key_style),
            Span::styled("] ", styles::text_muted()),
            Span::styled(label, label_style),
        ]
    }
}

impl Widget for CameraPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let busy = self.state.is_busy();
        let block = styles::glass_block(!busy).title(" Camera ");
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::vertical([
            Constraint::Min(1),    // Viewfinder
            Constraint::Length(1), // Controls
        ])
        .split(inner);

        let (text, style) = self.viewfinder_text();
        let viewfinder = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .split(chunks[0]);
        Paragraph::new(Line::styled(text, style))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(viewfinder[1], buf);

        let mut controls = Self::control("c", "Shutter", !busy);
        controls.push(Span::raw("  "));
        controls.extend(Self::control("g", "Gallery", !busy));
        Paragraph::new(Line::from(controls))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ready_state, TestTerminal};
    use plantrecog_core::PermissionState;

    #[test]
    fn test_idle_with_camera_access() {
        let state = ready_state(PermissionState::Granted);
        let mut term = TestTerminal::new();
        term.render_widget(CameraPanel::new(&state), term.area());

        assert!(term.buffer_contains("Point the camera at a plant"));
        assert!(term.buffer_contains("[c] Shutter"));
        assert!(term.buffer_contains("[g] Gallery"));
    }

    #[test]
    fn test_without_camera_access() {
        let state = ready_state(PermissionState::Denied);
        let mut term = TestTerminal::new();
        term.render_widget(CameraPanel::new(&state), term.area());

        assert!(term.buffer_contains("No camera access yet"));
    }

    #[test]
    fn test_controls_muted_while_uploading() {
        let mut state = ready_state(PermissionState::Granted);
        state.prediction.begin();
        let mut term = TestTerminal::new();
        term.render_widget(CameraPanel::new(&state), term.area());

        assert!(term.buffer_contains("Uploading..."));
        let content = term.content();
        let row = content
            .lines()
            .position(|line| line.contains("[c] Shutter"))
            .unwrap() as u16;
        let line: Vec<char> = content.lines().nth(row as usize).unwrap().chars().collect();
        let col = (0..line.len())
            .find(|&i| line[i..].starts_with(&['c', ']']))
            .unwrap() as u16;
        assert_eq!(
            term.buffer()[(col, row)].style().fg,
            Some(crate::theme::palette::TEXT_MUTED)
        );
    }
}

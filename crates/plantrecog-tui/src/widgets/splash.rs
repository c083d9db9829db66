//! Splash surface drawn while the bootstrap batch runs

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::Line,
    widgets::{Paragraph, Widget},
};

use crate::theme::styles;

#[derive(Debug, Default)]
pub struct Splash;

impl Splash {
    pub fn new() -> Self {
        Self
    }
}

impl Widget for Splash {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .split(area);

        Paragraph::new(Line::styled("PlantRecog", styles::accent_bold()))
            .alignment(Alignment::Center)
            .render(rows[1], buf);
        Paragraph::new(Line::styled("Connecting to the plant service...", styles::text_muted()))
            .alignment(Alignment::Center)
            .render(rows[3], buf);
    }
}

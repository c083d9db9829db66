//! Recognized class list overlay

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::Line,
    widgets::{Paragraph, Widget, Wrap},
};

use super::modal_overlay;
use crate::theme::styles;

const MODAL_WIDTH: u16 = 50;
const MODAL_HEIGHT: u16 = 16;

pub struct ClassList<'a> {
    classes: &'a [String],
}

impl<'a> ClassList<'a> {
    pub fn new(classes: &'a [String]) -> Self {
        Self { classes }
    }
}

impl Widget for ClassList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal_area = modal_overlay::centered_rect(MODAL_WIDTH, MODAL_HEIGHT, area);
        modal_overlay::prepare_modal(buf, area, modal_area);

        let title = format!(" Recognized Plants ({}) ", self.classes.len());
        let block = styles::modal_block(&title);
        let inner = block.inner(modal_area);
        block.render(modal_area, buf);

        let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

        if self.classes.is_empty() {
            Paragraph::new(Line::styled(
                "The service did not report any classes",
                styles::text_muted(),
            ))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[0], buf);
        } else {
            let lines: Vec<Line> = self
                .classes
                .iter()
                .map(|name| Line::styled(format!(" • {}", name), styles::text_primary()))
                .collect();
            Paragraph::new(lines).render(chunks[0], buf);
        }

        Paragraph::new(Line::styled("Esc to close", styles::text_muted()))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);
    }
}

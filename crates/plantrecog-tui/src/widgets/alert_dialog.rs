//! Alert dialog: title, message and a single action button

use plantrecog_app::AlertState;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::modal_overlay;
use crate::theme::{palette, styles};

const MODAL_WIDTH: u16 = 56;
const MODAL_HEIGHT: u16 = 9;

pub struct AlertDialog<'a> {
    alert: &'a AlertState,
}

impl<'a> AlertDialog<'a> {
    pub fn new(alert: &'a AlertState) -> Self {
        Self { alert }
    }

    fn button(&self) -> Line<'static> {
        let color = if self.alert.is_fatal() {
            palette::STATUS_RED
        } else {
            palette::STATUS_GREEN
        };
        Line::from(vec![
            Span::styled("[", styles::text_muted()),
            Span::styled(
                "Enter",
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled("] ", styles::text_muted()),
            Span::styled(self.alert.action_label.clone(), styles::text_primary()),
        ])
    }
}

impl Widget for AlertDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal_area = modal_overlay::centered_rect(MODAL_WIDTH, MODAL_HEIGHT, area);
        modal_overlay::prepare_modal(buf, area, modal_area);

        let title = format!(" {} ", self.alert.title);
        let block = styles::modal_block(&title).title_alignment(Alignment::Center);
        let inner = block.inner(modal_area);
        block.render(modal_area, buf);

        let chunks = Layout::vertical([
            Constraint::Length(1), // Spacer
            Constraint::Length(3), // Message
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Button
            Constraint::Min(0),
        ])
        .split(inner);

        let message_style = if self.alert.is_fatal() {
            Style::default().fg(palette::STATUS_RED)
        } else {
            Style::default().fg(palette::STATUS_YELLOW)
        };
        Paragraph::new(self.alert.message.as_str())
            .alignment(Alignment::Center)
            .style(message_style)
            .wrap(Wrap { trim: true })
            .render(chunks[1], buf);

        Paragraph::new(self.button())
            .alignment(Alignment::Center)
            .render(chunks[3], buf);
    }
}

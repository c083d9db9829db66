//! Main header: app title and service endpoint

use plantrecog_app::AppState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::styles;

pub struct MainHeader<'a> {
    state: &'a AppState,
}

impl<'a> MainHeader<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false);
        let inner = block.inner(area);
        block.render(area, buf);

        let service = if self.state.service_up {
            Span::styled("● service up", styles::accent())
        } else {
            Span::styled("○ service down", styles::text_muted())
        };

        let line = Line::from(vec![
            Span::raw(" "),
            Span::styled("PlantRecog", styles::accent_bold()),
            Span::styled("  │  ", styles::text_muted()),
            Span::styled(self.state.settings.service.base_url.clone(), styles::text_secondary()),
            Span::raw("  "),
            service,
        ]);
        Paragraph::new(line).render(inner, buf);
    }
}

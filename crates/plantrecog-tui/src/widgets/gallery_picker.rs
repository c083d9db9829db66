//! Gallery picker modal
//!
//! Two views over [`GalleryPickerState`]: the image list, and the square-crop
//! confirmation shown when the picker requires an edit step.

use plantrecog_app::GalleryPickerState;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, StatefulWidget, Widget, Wrap},
};

use super::modal_overlay;
use crate::theme::styles;

const MODAL_WIDTH: u16 = 60;
const MODAL_HEIGHT: u16 = 18;

pub struct GalleryPicker<'a> {
    picker: &'a GalleryPickerState,
}

impl<'a> GalleryPicker<'a> {
    pub fn new(picker: &'a GalleryPickerState) -> Self {
        Self { picker }
    }

    fn format_size(bytes: u64) -> String {
        match bytes {
            b if b >= 1024 * 1024 => format!("{:.1} MB", b as f64 / (1024.0 * 1024.0)),
            b if b >= 1024 => format!("{:.1} KB", b as f64 / 1024.0),
            b => format!("{} B", b),
        }
    }

    fn render_list(&self, area: Rect, buf: &mut Buffer) {
        if self.picker.is_empty() {
            Paragraph::new(Line::styled("No images found", styles::text_muted()))
                .alignment(Alignment::Center)
                .render(area, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .picker
            .entries
            .iter()
            .map(|entry| {
                ListItem::new(Line::from(vec![
                    Span::raw(" "),
                    Span::raw(entry.name.clone()),
                    Span::raw("  "),
                    Span::styled(Self::format_size(entry.size_bytes), styles::text_muted()),
                ]))
            })
            .collect();

        let list = List::new(items)
            .style(styles::text_primary())
            .highlight_style(styles::focused_selected());
        let mut list_state = ListState::default().with_selected(Some(self.picker.selected));
        StatefulWidget::render(list, area, buf, &mut list_state);
    }

    fn render_confirmation(&self, area: Rect, buf: &mut Buffer) {
        let name = self
            .picker
            .selected_entry()
            .map(|entry| entry.name.as_str())
            .unwrap_or_default();
        let (w, h) = self.picker.options.aspect;

        let lines = vec![
            Line::styled(name.to_string(), styles::heading()),
            Line::raw(""),
            Line::styled(
                format!("The image will be cropped to {}:{} around its center.", w, h),
                styles::text_secondary(),
            ),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }

    fn footer(&self) -> Line<'static> {
        let hints: &[(&str, &str)] = if self.picker.confirming {
            &[("Enter", "Choose"), ("Esc", "Back")]
        } else if self.picker.is_empty() {
            &[("Esc", "Cancel")]
        } else {
            &[("↑↓", "Navigate"), ("Enter", "Select"), ("Esc", "Cancel")]
        };

        let mut spans = Vec::new();
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", styles::text_muted()));
            }
            spans.push(Span::styled(key.to_string(), styles::keybinding()));
            spans.push(Span::styled(format!(" {}", label), styles::text_muted()));
        }
        Line::from(spans)
    }
}

impl Widget for GalleryPicker<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal_area = modal_overlay::centered_rect(MODAL_WIDTH, MODAL_HEIGHT, area);
        modal_overlay::prepare_modal(buf, area, modal_area);

        let title = if self.picker.confirming {
            " Crop Image "
        } else {
            " Choose Image "
        };
        let block = styles::modal_block(title);
        let inner = block.inner(modal_area);
        block.render(modal_area, buf);

        let chunks = Layout::vertical([
            Constraint::Min(1),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(inner);

        if self.picker.confirming {
            let centered = Layout::vertical([
                Constraint::Fill(1),
                Constraint::Length(4),
                Constraint::Fill(1),
            ])
            .split(chunks[0]);
            self.render_confirmation(centered[1], buf);
        } else {
            self.render_list(chunks[0], buf);
        }

        Paragraph::new(self.footer())
            .alignment(Alignment::Center)
            .render(chunks[1], buf);
    }
}

//! Main render/view function (View in TEA pattern)

#[cfg(test)]
mod tests;

use super::{layout, widgets};
use plantrecog_app::{AppState, UiMode};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::theme::palette;

/// Render the complete UI (View function in TEA)
///
/// Pure: reads state only. The splash covers everything until released, and
/// the fatal alert is drawn over an empty background, never over the camera.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    let bg_block = Block::default().style(Style::default().bg(palette::DEEPEST_BG));
    frame.render_widget(bg_block, area);

    if state.splash.is_held() {
        frame.render_widget(widgets::Splash::new(), area);
        return;
    }

    let mode = state.ui_mode();
    if mode == UiMode::FatalAlert {
        if let Some(alert) = state.current_alert() {
            frame.render_widget(widgets::AlertDialog::new(alert), area);
        }
        return;
    }

    let areas = layout::create(area);
    frame.render_widget(widgets::MainHeader::new(state), areas.header);
    frame.render_widget(widgets::CameraPanel::new(state), areas.camera);
    frame.render_widget(widgets::ResultView::new(state.prediction.result()), areas.result);
    frame.render_widget(widgets::StatusBar::new(state), areas.status);

    match mode {
        UiMode::Alert => {
            if let Some(alert) = state.current_alert() {
                frame.render_widget(widgets::AlertDialog::new(alert), area);
            }
        }
        UiMode::GalleryPicker => {
            if let Some(picker) = &state.picker {
                frame.render_widget(widgets::GalleryPicker::new(picker), area);
            }
        }
        UiMode::ClassList => {
            frame.render_widget(widgets::ClassList::new(&state.recognized), area);
        }
        UiMode::Splash | UiMode::FatalAlert | UiMode::Normal => {}
    }
}

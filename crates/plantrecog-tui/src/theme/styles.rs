//! Semantic style builders

use plantrecog_core::{PermissionState, RequestLifecycle};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use super::palette;

// --- Text styles ---
pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

pub fn heading() -> Style {
    Style::default()
        .fg(palette::TEXT_BRIGHT)
        .add_modifier(Modifier::BOLD)
}

// --- Border styles ---
pub fn border_inactive() -> Style {
    Style::default().fg(palette::BORDER_DIM)
}

pub fn border_active() -> Style {
    Style::default().fg(palette::BORDER_ACTIVE)
}

// --- Accent styles ---
pub fn accent() -> Style {
    Style::default().fg(palette::ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default()
        .fg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn keybinding() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

/// "Black on green" - used for the selected picker row
pub fn focused_selected() -> Style {
    Style::default()
        .fg(palette::CONTRAST_FG)
        .bg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

// --- Block builders ---
pub fn glass_block(focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            border_active()
        } else {
            border_inactive()
        })
}

pub fn modal_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_inactive())
        .style(Style::default().bg(palette::POPUP_BG))
}

// --- Indicator mapping ---

/// `(icon, label, style)` for a permission slot
pub fn permission_indicator(state: PermissionState) -> (&'static str, &'static str, Style) {
    match state {
        PermissionState::Granted => ("●", "granted", Style::default().fg(palette::STATUS_GREEN)),
        PermissionState::Denied => ("✗", "denied", Style::default().fg(palette::STATUS_RED)),
        PermissionState::Unknown => ("○", "unknown", Style::default().fg(palette::TEXT_MUTED)),
    }
}

/// `(icon, label, style)` for the submission lifecycle
pub fn lifecycle_indicator(lifecycle: RequestLifecycle) -> (&'static str, &'static str, Style) {
    match lifecycle {
        RequestLifecycle::Idle => ("○", "Idle", Style::default().fg(palette::TEXT_MUTED)),
        RequestLifecycle::Submitting => (
            "↻",
            "Processing",
            Style::default()
                .fg(palette::STATUS_YELLOW)
                .add_modifier(Modifier::BOLD),
        ),
        RequestLifecycle::Succeeded => (
            "●",
            "Identified",
            Style::default()
                .fg(palette::STATUS_GREEN)
                .add_modifier(Modifier::BOLD),
        ),
        RequestLifecycle::Failed => ("✗", "Failed", Style::default().fg(palette::STATUS_RED)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_styles_have_correct_colors() {
        assert_eq!(text_primary().fg, Some(palette::TEXT_PRIMARY));
        assert_eq!(text_secondary().fg, Some(palette::TEXT_SECONDARY));
        assert_eq!(text_muted().fg, Some(palette::TEXT_MUTED));
    }

    #[test]
    fn test_focused_selected_is_bold_on_accent() {
        let style = focused_selected();
        assert_eq!(style.bg, Some(palette::ACCENT));
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_permission_indicator_labels() {
        assert_eq!(permission_indicator(PermissionState::Granted).1, "granted");
        assert_eq!(permission_indicator(PermissionState::Denied).1, "denied");
        assert_eq!(permission_indicator(PermissionState::Unknown).1, "unknown");
    }

    #[test]
    fn test_lifecycle_indicator_processing() {
        let (icon, label, style) = lifecycle_indicator(RequestLifecycle::Submitting);
        assert_eq!(icon, "↻");
        assert_eq!(label, "Processing");
        assert_eq!(style.fg, Some(palette::STATUS_YELLOW));
    }
}

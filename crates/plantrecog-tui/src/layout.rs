//! Screen layout definitions for the TUI
//!
//! The camera panel and the result view sit side by side on wide terminals
//! and stack vertically on narrow ones.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Below this width the body stacks vertically
pub const NARROW_WIDTH: u16 = 70;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Title and service state
    pub header: Rect,
    /// Viewfinder with shutter and gallery controls
    pub camera: Rect,
    /// Prediction heading and ranked list
    pub result: Rect,
    pub status: Rect,
}

pub fn create(area: Rect) -> ScreenAreas {
    let rows = Layout::vertical([
        Constraint::Length(3), // Header (bordered)
        Constraint::Min(6),    // Body
        Constraint::Length(2), // Status bar (top border + line)
    ])
    .split(area);

    let direction = if area.width < NARROW_WIDTH {
        Direction::Vertical
    } else {
        Direction::Horizontal
    };
    let body = Layout::default()
        .direction(direction)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    ScreenAreas {
        header: rows[0],
        camera: body[0],
        result: body[1],
        status: rows[2],
    }
}

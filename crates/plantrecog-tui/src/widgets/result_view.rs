//! Prediction result view
//!
//! A pure function of [`PredictionResult`]: the primary label upper-cased as
//! a heading, then either the idle caption or the ranked "name: score" list.

use plantrecog_core::PredictionResult;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Paragraph, Widget, Wrap},
};

use crate::theme::styles;

/// Shown under the heading until a real prediction arrives
pub const IDLE_CAPTION: &str = "Know plants with just a click. How we do it? We run an image \
classification model as an API service and show you what it sees.";

/// Text body under the heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultBody {
    Caption(&'static str),
    Ranked(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultContent {
    pub heading: String,
    pub body: ResultBody,
}

/// Derive what the view shows from a result
pub fn result_content(result: &PredictionResult) -> ResultContent {
    let heading = result.primary.name.to_uppercase();
    let body = if result.is_placeholder() {
        ResultBody::Caption(IDLE_CAPTION)
    } else {
        ResultBody::Ranked(result.ranked.iter().map(|item| item.display_line()).collect())
    };
    ResultContent { heading, body }
}

pub struct ResultView<'a> {
    result: &'a PredictionResult,
}

impl<'a> ResultView<'a> {
    pub fn new(result: &'a PredictionResult) -> Self {
        Self { result }
    }
}

impl Widget for ResultView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).title(" Result ");
        let inner = block.inner(area);
        block.render(area, buf);

        let content = result_content(self.result);
        let chunks = Layout::vertical([
            Constraint::Length(1), // Heading
            Constraint::Length(1), // Spacer
            Constraint::Min(0),    // Body
        ])
        .split(inner);

        Paragraph::new(Line::styled(content.heading, styles::heading())).render(chunks[0], buf);

        match content.body {
            ResultBody::Caption(caption) => {
                Paragraph::new(caption)
                    .style(styles::text_secondary())
                    .wrap(Wrap { trim: true })
                    .render(chunks[2], buf);
            }
            ResultBody::Ranked(lines) => {
                let lines: Vec<Line> = lines
                    .into_iter()
                    .enumerate()
                    .map(|(i, text)| {
                        let style = if i == 0 {
                            styles::accent_bold()
                        } else {
                            styles::text_primary()
                        };
                        Line::styled(text, style)
                    })
                    .collect();
                Paragraph::new(lines).render(chunks[2], buf);
            }
        }
    }
}

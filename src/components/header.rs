use crate::styles::theme;
use crate::ui::ViewId;
use anyhow::Result;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Navigation bar shown above every view
pub struct Header;

impl Header {
    pub const HEIGHT: u16 = 3;

    /// Render the app title and one tab per view, highlighting `current`.
    ///
    /// Returns the height used.
    pub fn render(frame: &mut Frame, area: Rect, current: ViewId) -> Result<u16> {
        let t = theme();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_focused_style())
            .title(" MCQ Generator ")
            .title_style(t.title_style())
            .title_alignment(Alignment::Left);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut spans = Vec::new();
        for (i, view) in ViewId::ALL.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" │ ", t.muted_style()));
            }
            let key = format!("F{} ", view.function_key());
            if *view == current {
                spans.push(Span::styled(key, t.highlight_style()));
                spans.push(Span::styled(view.label(), t.highlight_style()));
            } else {
                spans.push(Span::styled(key, t.emphasis_style()));
                spans.push(Span::styled(view.label(), t.text_style()));
            }
        }

        frame.render_widget(
            Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
            inner,
        );

        Ok(Self::HEIGHT)
    }
}

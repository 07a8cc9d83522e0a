use crate::styles::theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Selector and button rendering shared by the forms
pub struct FormFields;

impl FormFields {
    /// A bordered `◀ value ▶` selector cycled with Left/Right.
    pub fn render_choice(frame: &mut Frame, area: Rect, title: &str, value: &str, focused: bool) {
        let t = theme();
        let border = if focused {
            t.border_focused_style()
        } else {
            t.border_style()
        };
        let arrows = if focused {
            t.emphasis_style()
        } else {
            t.muted_style()
        };
        let line = Line::from(vec![
            Span::styled("◀ ", arrows),
            Span::styled(value.to_string(), t.text_style().add_modifier(Modifier::BOLD)),
            Span::styled(" ▶", arrows),
        ]);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border)
            .title(format!(" {} ", title));
        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    /// A one-line button; disabled buttons are dimmed and ignore focus.
    pub fn render_button(frame: &mut Frame, area: Rect, label: &str, focused: bool, disabled: bool) {
        let t = theme();
        let style = if disabled {
            t.disabled_style()
        } else if focused {
            t.highlight_style()
        } else {
            t.title_style()
        };
        let text = if focused && !disabled {
            format!("▶ {} ◀", label)
        } else {
            format!("[ {} ]", label)
        };
        frame.render_widget(
            Paragraph::new(Line::styled(text, style)).alignment(Alignment::Center),
            area,
        );
    }
}

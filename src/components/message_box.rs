use crate::styles::theme;
use anyhow::Result;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

/// Inline alert banner for request outcomes and validation messages
pub struct MessageBox;

/// Banner kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alert {
    Error,
    Success,
    Info,
}

impl Alert {
    fn title(&self) -> &'static str {
        match self {
            Alert::Error => " Error! ",
            Alert::Success => " Success! ",
            Alert::Info => " Note ",
        }
    }
}

impl MessageBox {
    /// Rows needed to show `message` wrapped at `width` (borders included).
    pub fn height(message: &str, width: u16) -> u16 {
        let text_width = width.saturating_sub(4).max(1) as usize;
        let lines: usize = message
            .lines()
            .map(|l| l.chars().count().max(1).div_ceil(text_width))
            .sum();
        lines.max(1) as u16 + 2
    }

    pub fn render(frame: &mut Frame, area: Rect, message: &str, alert: Alert) -> Result<()> {
        let t = theme();
        let style = match alert {
            Alert::Error => t.error_style(),
            Alert::Success => t.success_style(),
            Alert::Info => t.title_style(),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(style)
            .title(alert.title())
            .title_style(style.add_modifier(Modifier::BOLD))
            .padding(ratatui::widgets::Padding::horizontal(1));

        let paragraph = Paragraph::new(message.to_string())
            .style(t.text_style())
            .wrap(Wrap { trim: true })
            .block(block);

        frame.render_widget(paragraph, area);
        Ok(())
    }

    pub fn render_error(frame: &mut Frame, area: Rect, message: &str) -> Result<()> {
        Self::render(frame, area, message, Alert::Error)
    }

    pub fn render_success(frame: &mut Frame, area: Rect, message: &str) -> Result<()> {
        Self::render(frame, area, message, Alert::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_wraps_long_messages() {
        assert_eq!(MessageBox::height("short", 40), 3);
        assert_eq!(MessageBox::height(&"x".repeat(72), 40), 4);
        assert_eq!(MessageBox::height("", 40), 3);
    }
}

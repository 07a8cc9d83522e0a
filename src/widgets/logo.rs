//! The [`McqLogo`] widget renders the application wordmark.

use crate::styles::theme;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Text};
use ratatui::widgets::Widget;

const WORDMARK: [&str; 3] = [
    "┏┳┓┏━╸┏━┓   ╺┳┓┏━╸┏━┓╻┏ ",
    "┃┃┃┃  ┃┓┃    ┃┃┣╸ ┗━┓┣┻┓",
    "╹ ╹┗━╸┗┻┛   ╺┻┛┗━╸┗━┛╹ ╹",
];

/// Three-line wordmark shown on the landing page.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct McqLogo;

impl McqLogo {
    /// Width of the logo in terminal cells
    pub fn width() -> u16 {
        WORDMARK
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0) as u16
    }

    pub const fn height() -> u16 {
        WORDMARK.len() as u16
    }
}

impl Widget for McqLogo {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = theme().title_style();
        let text = Text::from(
            WORDMARK
                .iter()
                .map(|line| Line::styled(*line, style))
                .collect::<Vec<_>>(),
        );
        text.centered().render(area, buf);
    }
}

//! Dialog widget for confirmations, notices and errors
//!
//! Centers itself in the given area over a dimmed background, with title,
//! wrapped content and an optional key-hint footer.

use crate::styles::theme;
use crate::utils::layout::center_rect;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Widget, Wrap};

/// Dialog variant for different visual styles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DialogVariant {
    #[default]
    Default,
    Warning,
}

impl DialogVariant {
    fn prefix(&self) -> &'static str {
        match self {
            DialogVariant::Default => "",
            DialogVariant::Warning => "Warning",
        }
    }
}

const MIN_WIDTH: u16 = 40;
const MAX_WIDTH: u16 = 70;

pub struct Dialog<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub variant: DialogVariant,
    pub footer: Option<&'a str>,
}

impl<'a> Dialog<'a> {
    /// Width is derived from the content, clamped to 40-70 columns.
    pub fn new(title: &'a str, content: &'a str) -> Self {
        Self {
            title,
            content,
            variant: DialogVariant::Default,
            footer: None,
        }
    }

    pub fn variant(mut self, variant: DialogVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn footer(mut self, footer: &'a str) -> Self {
        self.footer = Some(footer);
        self
    }

    fn title_text(&self) -> String {
        let prefix = self.variant.prefix();
        if prefix.is_empty() {
            format!(" {} ", self.title)
        } else {
            format!(" {}: {} ", prefix, self.title)
        }
    }

    /// Outer size of the dialog for the given available area.
    fn size(&self, area: Rect) -> (u16, u16) {
        let longest = self
            .content
            .lines()
            .map(|l| l.chars().count())
            .chain(std::iter::once(self.title_text().chars().count()))
            .chain(self.footer.map(|f| f.chars().count()))
            .max()
            .unwrap_or(0) as u16;
        let width = (longest + 6)
            .clamp(MIN_WIDTH, MAX_WIDTH)
            .min(area.width);

        // 2 borders, 2 padding columns per side
        let text_width = width.saturating_sub(6).max(1) as usize;
        let content_lines: usize = self
            .content
            .lines()
            .map(|l| l.chars().count().max(1).div_ceil(text_width))
            .sum();
        let footer_lines = if self.footer.is_some() { 2 } else { 0 };
        let height = (content_lines as u16 + footer_lines + 4).min(area.height);
        (width, height)
    }

    fn render_impl(&self, area: Rect, buf: &mut Buffer) {
        let t = theme();
        let (width, height) = self.size(area);
        let popup_area = center_rect(area, width, height);

        Block::default().style(t.muted_style()).render(area, buf);
        Clear.render(popup_area, buf);

        let border_style = match self.variant {
            DialogVariant::Default => t.border_focused_style(),
            DialogVariant::Warning => t.warning_style(),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(self.title_text())
            .title_style(t.text_style().add_modifier(Modifier::BOLD))
            .title_alignment(Alignment::Center)
            .padding(Padding::new(2, 2, 1, 0))
            .style(t.background_style());
        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        let footer_height = if self.footer.is_some() { 2 } else { 0 };
        let [content_area, footer_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(footer_height)]).areas(inner);

        Paragraph::new(self.content)
            .wrap(Wrap { trim: true })
            .style(t.text_style())
            .render(content_area, buf);

        if let Some(footer) = self.footer {
            Paragraph::new(footer)
                .alignment(Alignment::Center)
                .style(t.emphasis_style().add_modifier(Modifier::BOLD))
                .render(footer_area, buf);
        }
    }
}

impl Widget for Dialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.render_impl(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_dialog_renders_title_content_and_footer() {
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        Dialog::new("Confirm Deletion", "Delete this question?")
            .variant(DialogVariant::Warning)
            .footer("Yes: y/Enter | No: n/Esc")
            .render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Warning: Confirm Deletion"));
        assert!(text.contains("Delete this question?"));
        assert!(text.contains("Yes: y/Enter"));
    }

    #[test]
    fn test_dialog_size_fits_small_area() {
        let dialog = Dialog::new("Notice", "PDF export is not yet implemented.");
        let (w, h) = dialog.size(Rect::new(0, 0, 30, 5));
        assert!(w <= 30);
        assert!(h <= 5);
    }
}

//! Card-style menu widget.
//!
//! Each item is a 3-line card: icon and title on the first content line, a
//! muted description underneath. Used for the landing page entry points.

use crate::styles::theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{StatefulWidget, Widget},
};

/// Lines per card.
pub const CARD_HEIGHT: u16 = 3;

#[derive(Debug, Clone)]
pub struct MenuItem {
    pub icon: String,
    pub text: String,
    pub color: Color,
    /// One-line description under the title
    pub info: Option<String>,
}

impl MenuItem {
    pub fn new(icon: impl Into<String>, text: impl Into<String>, color: Color) -> Self {
        Self {
            icon: icon.into(),
            text: text.into(),
            color,
            info: None,
        }
    }

    pub fn info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }
}

#[derive(Debug, Default, Clone)]
pub struct MenuState {
    selected: Option<usize>,
    offset: usize,
}

impl MenuState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index;
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }
}

#[derive(Debug, Clone)]
pub struct Menu {
    items: Vec<MenuItem>,
}

impl Menu {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    fn visible_cards(area: Rect) -> usize {
        (area.height / CARD_HEIGHT).max(1) as usize
    }
}

impl StatefulWidget for Menu {
    type State = MenuState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let t = theme();
        let visible = Self::visible_cards(area);

        // Scroll so the selected card stays on screen
        if let Some(selected) = state.selected {
            if selected < state.offset {
                state.offset = selected;
            } else if selected >= state.offset + visible {
                state.offset = selected + 1 - visible;
            }
        }

        for (slot, (i, item)) in self
            .items
            .iter()
            .enumerate()
            .skip(state.offset)
            .take(visible)
            .enumerate()
        {
            let y = area.y + slot as u16 * CARD_HEIGHT;
            if y + CARD_HEIGHT > area.y + area.height {
                break;
            }

            let is_selected = state.selected == Some(i);
            let bg = if is_selected { t.highlight_bg } else { t.background };
            let base = if t.theme_type == crate::styles::ThemeType::NoColor {
                Style::default()
            } else {
                Style::default().bg(bg)
            };
            let marker = if is_selected { "▌ " } else { "  " };
            let marker_style = base.patch(t.border_focused_style());

            let title_style = if t.theme_type == crate::styles::ThemeType::NoColor {
                base.add_modifier(Modifier::BOLD)
            } else {
                base.fg(item.color).add_modifier(Modifier::BOLD)
            };
            let title_style = if is_selected && t.theme_type == crate::styles::ThemeType::NoColor {
                title_style.add_modifier(Modifier::REVERSED)
            } else {
                title_style
            };

            let lines = [
                Line::from(vec![
                    Span::styled(marker, marker_style),
                    Span::styled(format!("{} ", item.icon), title_style),
                    Span::styled(item.text.clone(), title_style),
                ]),
                Line::from(vec![
                    Span::styled(marker, marker_style),
                    Span::styled(
                        format!("   {}", item.info.clone().unwrap_or_default()),
                        base.patch(t.muted_style()),
                    ),
                ]),
                Line::from(Span::styled("", base)),
            ];

            for (row, line) in lines.into_iter().enumerate() {
                let row_area = Rect::new(area.x, y + row as u16, area.width, 1);
                buf.set_style(row_area, base);
                line.render(row_area, buf);
            }
        }
    }
}

//! Landing screen.
//!
//! Shows the wordmark, a short introduction and one card per feature.
//! Selecting a card sets the view selector.

use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::styles::theme;
use crate::ui::ViewId;
use crate::widgets::{McqLogo, Menu, MenuItem, MenuState};
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, StatefulWidget, Wrap};

/// Entry points in display order, with icon and one-line description.
const ENTRIES: [(ViewId, &str, &str); 6] = [
    (
        ViewId::Generate,
        "✨",
        "Generate questions on any topic with AI",
    ),
    (
        ViewId::AllQuestions,
        "📚",
        "Browse, edit and delete stored questions",
    ),
    (
        ViewId::CreateQuestion,
        "✏️",
        "Write a question of your own",
    ),
    (
        ViewId::TakeQuiz,
        "🎯",
        "Test yourself on a random set of questions",
    ),
    (
        ViewId::UploadDocument,
        "📄",
        "Generate questions from a PDF, TXT or DOCX file",
    ),
    (
        ViewId::ExportOptions,
        "💾",
        "Save your question bank as JSON",
    ),
];

pub struct HomeScreen {
    menu_state: MenuState,
}

impl Default for HomeScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeScreen {
    pub fn new() -> Self {
        let mut menu_state = MenuState::new();
        menu_state.select(Some(0));
        Self { menu_state }
    }

    pub fn selected_view(&self) -> ViewId {
        let index = self.menu_state.selected().unwrap_or(0);
        ENTRIES[index.min(ENTRIES.len() - 1)].0
    }

    fn move_selection(&mut self, down: bool) {
        let current = self.menu_state.selected().unwrap_or(0);
        let next = if down {
            (current + 1).min(ENTRIES.len() - 1)
        } else {
            current.saturating_sub(1)
        };
        self.menu_state.select(Some(next));
    }

    fn menu_items() -> Vec<MenuItem> {
        let t = theme();
        let colors = [t.primary, t.accent, t.success, t.warning, t.text_emphasis, t.text];
        ENTRIES
            .iter()
            .zip(colors)
            .map(|((view, icon, info), color)| {
                MenuItem::new(*icon, format!("{} (F{})", view.label(), view.function_key()), color)
                    .info(*info)
            })
            .collect()
    }
}

impl Screen for HomeScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, _ctx: &RenderContext) -> Result<()> {
        let t = theme();
        let [logo_area, intro_area, menu_area] = Layout::vertical([
            Constraint::Length(McqLogo::height() + 1),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .areas(area);

        let logo_row = Rect::new(logo_area.x, logo_area.y + 1, logo_area.width, McqLogo::height())
            .intersection(logo_area);
        frame.render_widget(McqLogo, logo_row);

        let intro = vec![
            Line::styled(
                "Create, generate and master multiple-choice questions.",
                t.emphasis_style(),
            ),
            Line::styled(
                "Pick an entry point below, or jump anywhere with F1-F7.",
                t.muted_style(),
            ),
        ];
        frame.render_widget(
            Paragraph::new(intro)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            intro_area,
        );

        let menu_width = menu_area.width.min(64);
        let menu_rect = Rect::new(
            menu_area.x + (menu_area.width - menu_width) / 2,
            menu_area.y,
            menu_width,
            menu_area.height,
        );
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_focused_style())
            .title(" Get Started ")
            .title_style(t.title_style())
            .title_alignment(Alignment::Center);
        let inner = block.inner(menu_rect);
        frame.render_widget(block, menu_rect);
        Menu::new(Self::menu_items()).render(inner, frame.buffer_mut(), &mut self.menu_state);

        Ok(())
    }

    fn handle_event(&mut self, event: Event, _ctx: &ScreenContext) -> Result<ScreenAction> {
        let Event::Key(key) = event else {
            return Ok(ScreenAction::None);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(ScreenAction::None);
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
            KeyCode::Enter => return Ok(ScreenAction::Navigate(self.selected_view())),
            _ => {}
        }
        Ok(ScreenAction::None)
    }

    fn footer_hints(&self) -> &'static str {
        "Select: ↑↓ | Open: Enter | Switch: F1-F7 | Quit: q"
    }
}

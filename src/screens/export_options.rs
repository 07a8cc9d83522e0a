//! Export screen: save the question bank as JSON.

use crate::api::{Difficulty, ExportFilter};
use crate::components::form_fields::FormFields;
use crate::components::loading_spinner::LoadingSpinner;
use crate::components::message_box::{Alert, MessageBox};
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::services::{ApiRequest, ApiResponse};
use crate::styles::theme;
use crate::utils::form::cycle_index;
use crate::utils::path::format_path_for_display;
use crate::utils::text_input::TextInput;
use crate::widgets::{TextInputWidget, TextInputWidgetExt};
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use std::path::Path;
use tracing::warn;

pub const PDF_NOTICE: &str = "PDF export is not yet implemented. Please use JSON export for now.";

pub fn export_success_message(path: &Path) -> String {
    format!(
        "Questions exported successfully as JSON! Saved to {}",
        format_path_for_display(path)
    )
}

/// Any -> Easy -> Medium -> Hard -> Any
fn cycle_difficulty_filter(current: Option<Difficulty>, forward: bool) -> Option<Difficulty> {
    let mut choices = vec![None];
    choices.extend(Difficulty::ALL.into_iter().map(Some));
    let index = choices.iter().position(|c| *c == current).unwrap_or(0);
    choices[cycle_index(index, choices.len(), forward)]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Difficulty,
    Category,
    ExportJson,
    ExportPdf,
}

const FIELDS: [Field; 4] = [
    Field::Difficulty,
    Field::Category,
    Field::ExportJson,
    Field::ExportPdf,
];

pub struct ExportOptionsScreen {
    difficulty: Option<Difficulty>,
    category: TextInput,
    focus: usize,
    loading: bool,
    error: Option<String>,
    success: Option<String>,
}

impl Default for ExportOptionsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportOptionsScreen {
    pub fn new() -> Self {
        Self {
            difficulty: None,
            category: TextInput::new(),
            // Start on the JSON button
            focus: 2,
            loading: false,
            error: None,
            success: None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    fn focused(&self) -> Field {
        FIELDS[self.focus]
    }

    pub fn filter(&self) -> ExportFilter {
        ExportFilter {
            question_ids: Vec::new(),
            difficulty: self.difficulty,
            category: self.category.non_empty(),
        }
    }

    pub fn export_json(&mut self, ctx: &ScreenContext) -> ScreenAction {
        if self.loading {
            return ScreenAction::None;
        }
        self.loading = true;
        self.error = None;
        self.success = None;
        ScreenAction::Request(ApiRequest::ExportJson {
            filter: self.filter(),
            dir: ctx.config.export_dir.clone(),
        })
    }

    pub fn export_pdf(&mut self) -> ScreenAction {
        if self.loading {
            return ScreenAction::None;
        }
        self.error = None;
        self.success = None;
        ScreenAction::ShowMessage {
            title: "PDF Export".to_string(),
            content: PDF_NOTICE.to_string(),
        }
    }
}

impl Screen for ExportOptionsScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let t = theme();
        let width = area.width.min(72);
        let area = Rect::new(area.x + (area.width - width) / 2, area.y, width, area.height);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_style())
            .title(" Export Questions ")
            .title_style(t.title_style())
            .title_alignment(Alignment::Center);
        let inner = block.inner(area).inner(Margin::new(1, 0));
        frame.render_widget(block, area);

        let banner = self
            .error
            .as_deref()
            .or(self.success.as_deref())
            .map_or(0, |m| MessageBox::height(m, inner.width));
        let rows = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(banner),
            Constraint::Min(0),
        ])
        .split(inner);
        let focused = self.focused();

        frame.render_widget(
            Paragraph::new(format!(
                "Download your question bank. JSON files are saved to {}.",
                format_path_for_display(&ctx.config.export_dir)
            ))
            .style(t.muted_style())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
            rows[0],
        );

        let difficulty = self.difficulty.map_or("Any", |d| d.label());
        FormFields::render_choice(
            frame,
            rows[1],
            "Difficulty filter",
            difficulty,
            focused == Field::Difficulty,
        );
        frame.render_text_input_widget(
            TextInputWidget::new(&self.category)
                .title("Category filter")
                .placeholder("All categories")
                .focused(focused == Field::Category),
            rows[2],
        );

        if self.loading {
            LoadingSpinner::render(frame, rows[4], ctx.tick, Some("Exporting JSON..."));
        } else {
            FormFields::render_button(
                frame,
                rows[4],
                "Export as JSON",
                focused == Field::ExportJson,
                false,
            );
        }
        FormFields::render_button(
            frame,
            rows[6],
            "Export as PDF (Coming Soon)",
            focused == Field::ExportPdf,
            self.loading,
        );

        if let Some(error) = &self.error {
            MessageBox::render(frame, rows[7], error, Alert::Error)?;
        } else if let Some(success) = &self.success {
            MessageBox::render(frame, rows[7], success, Alert::Success)?;
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction> {
        let Event::Key(key) = event else {
            return Ok(ScreenAction::None);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(ScreenAction::None);
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus = cycle_index(self.focus, FIELDS.len(), true);
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = cycle_index(self.focus, FIELDS.len(), false);
            }
            KeyCode::Enter => {
                return Ok(match self.focused() {
                    Field::ExportPdf => self.export_pdf(),
                    _ => self.export_json(ctx),
                });
            }
            code => match self.focused() {
                Field::Difficulty => match code {
                    KeyCode::Left => {
                        self.difficulty = cycle_difficulty_filter(self.difficulty, false);
                    }
                    KeyCode::Right | KeyCode::Char(' ') => {
                        self.difficulty = cycle_difficulty_filter(self.difficulty, true);
                    }
                    _ => {}
                },
                Field::Category => {
                    self.category.handle_key(code);
                }
                Field::ExportJson | Field::ExportPdf => {}
            },
        }
        Ok(ScreenAction::None)
    }

    fn on_response(&mut self, response: ApiResponse, _ctx: &ScreenContext) -> Result<ScreenAction> {
        if let ApiResponse::Exported(result) = response {
            self.loading = false;
            match result {
                Ok(path) => self.success = Some(export_success_message(&path)),
                Err(err) => {
                    warn!("Export failed: {}", err);
                    self.error = Some(err.message().to_string());
                }
            }
        }
        Ok(ScreenAction::None)
    }

    fn is_input_focused(&self) -> bool {
        self.focused() == Field::Category
    }

    fn footer_hints(&self) -> &'static str {
        "Field: Tab/↑↓ | Change: ←→ | Export: Enter | Home: Esc"
    }
}

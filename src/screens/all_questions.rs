//! Stored question browser with edit and delete.

use crate::api::{ApiResult, Question, QuestionFilter};
use crate::components::confirm_dialog::{ConfirmDialog, Confirmation};
use crate::components::edit_question_modal::{EditQuestionModal, ModalOutcome};
use crate::components::loading_spinner::LoadingSpinner;
use crate::components::message_box::MessageBox;
use crate::components::question_card::render_cards;
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::services::{ApiRequest, ApiResponse};
use crate::styles::theme;
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tracing::{info, warn};

pub const DELETE_CONFIRM_MESSAGE: &str =
    "Are you sure you want to delete this question? This action cannot be undone.";
pub const DELETE_SUCCESS_MESSAGE: &str = "Question deleted successfully!";

pub struct AllQuestionsScreen {
    questions: Vec<Question>,
    selected: usize,
    scroll: usize,
    loading: bool,
    error: Option<String>,
    delete_success: Option<String>,
    delete_error: Option<String>,
    /// Id awaiting delete confirmation
    confirm_delete: Option<String>,
    edit_modal: Option<EditQuestionModal>,
}

impl Default for AllQuestionsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl AllQuestionsScreen {
    pub fn new() -> Self {
        Self {
            questions: Vec::new(),
            selected: 0,
            scroll: 0,
            loading: false,
            error: None,
            delete_success: None,
            delete_error: None,
            confirm_delete: None,
            edit_modal: None,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn selected_question(&self) -> Option<&Question> {
        self.questions.get(self.selected)
    }

    pub fn edit_modal(&self) -> Option<&EditQuestionModal> {
        self.edit_modal.as_ref()
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.confirm_delete.as_deref()
    }

    pub fn delete_success(&self) -> Option<&str> {
        self.delete_success.as_deref()
    }

    pub fn delete_error(&self) -> Option<&str> {
        self.delete_error.as_deref()
    }

    fn fetch(&mut self) -> ScreenAction {
        self.loading = true;
        self.error = None;
        ScreenAction::Request(ApiRequest::ListQuestions(QuestionFilter::default()))
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.questions.len().saturating_sub(1));
    }

    fn apply_update(&mut self, id: &str, result: ApiResult<Question>) {
        let updated = match self.edit_modal.as_mut() {
            Some(modal) if modal.question_id() == id => {
                let updated = modal.on_update_result(result);
                if updated.is_some() {
                    self.edit_modal = None;
                }
                updated
            }
            _ => result.ok(),
        };

        if let Some(question) = updated {
            info!("Question {} updated", question.id);
            if let Some(slot) = self.questions.iter_mut().find(|q| q.id == question.id) {
                *slot = question;
            }
        }
    }

    fn apply_delete(&mut self, id: &str, result: ApiResult<()>) {
        self.loading = false;
        match result {
            Ok(()) => {
                info!("Question {} deleted", id);
                self.questions.retain(|q| q.id != id);
                self.clamp_selection();
                self.delete_success = Some(DELETE_SUCCESS_MESSAGE.to_string());
            }
            Err(err) => {
                warn!("Failed to delete question {}: {}", id, err);
                self.delete_error = Some(err.message().to_string());
            }
        }
    }

    fn handle_list_key(&mut self, code: KeyCode) -> ScreenAction {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.questions.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.questions.len().saturating_sub(1),
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(question) = self.selected_question() {
                    self.edit_modal = Some(EditQuestionModal::new(question));
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(question) = self.selected_question() {
                    self.confirm_delete = Some(question.id.clone());
                }
            }
            KeyCode::Char('r') if !self.loading => {
                self.delete_success = None;
                self.delete_error = None;
                return self.fetch();
            }
            _ => {}
        }
        ScreenAction::None
    }

    fn render_banners(&self, frame: &mut Frame, area: Rect) -> Result<Rect> {
        let banners: Vec<(&str, bool)> = [
            self.error.as_deref().map(|m| (m, true)),
            self.delete_error.as_deref().map(|m| (m, true)),
            self.delete_success.as_deref().map(|m| (m, false)),
        ]
        .into_iter()
        .flatten()
        .collect();

        let mut rest = area;
        for (message, is_error) in banners {
            let height = MessageBox::height(message, rest.width).min(rest.height);
            let [banner, remaining] =
                Layout::vertical([Constraint::Length(height), Constraint::Min(0)]).areas(rest);
            if is_error {
                MessageBox::render_error(frame, banner, message)?;
            } else {
                MessageBox::render_success(frame, banner, message)?;
            }
            rest = remaining;
        }
        Ok(rest)
    }
}

impl Screen for AllQuestionsScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let t = theme();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_style())
            .title(format!(" All Stored Questions ({}) ", self.questions.len()))
            .title_style(t.title_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let list_area = self.render_banners(frame, inner)?;

        if self.loading && self.questions.is_empty() {
            LoadingSpinner::render(frame, list_area, ctx.tick, Some("Loading questions..."));
        } else if self.questions.is_empty() {
            if self.error.is_none() {
                frame.render_widget(
                    Paragraph::new(
                        "No questions found. Generate some using AI or create them manually!",
                    )
                    .style(t.muted_style())
                    .alignment(Alignment::Center),
                    list_area,
                );
            }
        } else {
            let [status_area, cards_area] =
                Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(list_area);
            if self.loading {
                LoadingSpinner::render(frame, status_area, ctx.tick, None);
            }
            render_cards(
                frame,
                cards_area,
                &self.questions,
                Some(self.selected),
                &mut self.scroll,
            );
        }

        if let Some(modal) = &self.edit_modal {
            modal.render(frame, area, ctx.tick)?;
        } else if self.confirm_delete.is_some() {
            ConfirmDialog::render(frame, area, "Confirm Deletion", DELETE_CONFIRM_MESSAGE);
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event, _ctx: &ScreenContext) -> Result<ScreenAction> {
        let Event::Key(key) = event else {
            return Ok(ScreenAction::None);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(ScreenAction::None);
        }

        if let Some(modal) = self.edit_modal.as_mut() {
            return Ok(match modal.handle_key(key) {
                ModalOutcome::None => ScreenAction::None,
                ModalOutcome::Close => {
                    self.edit_modal = None;
                    ScreenAction::None
                }
                ModalOutcome::Submit(request) => ScreenAction::Request(request),
            });
        }

        if let Some(id) = self.confirm_delete.clone() {
            return Ok(match ConfirmDialog::handle_key(key) {
                Confirmation::Yes => {
                    self.confirm_delete = None;
                    self.delete_success = None;
                    self.delete_error = None;
                    self.loading = true;
                    ScreenAction::Request(ApiRequest::DeleteQuestion { id })
                }
                Confirmation::No => {
                    self.confirm_delete = None;
                    ScreenAction::None
                }
                Confirmation::Pending => ScreenAction::None,
            });
        }

        Ok(self.handle_list_key(key.code))
    }

    fn on_response(&mut self, response: ApiResponse, _ctx: &ScreenContext) -> Result<ScreenAction> {
        match response {
            ApiResponse::Questions(result) => {
                self.loading = false;
                match result {
                    Ok(questions) => {
                        self.questions = questions;
                        self.clamp_selection();
                    }
                    Err(err) => {
                        warn!("Failed to load questions: {}", err);
                        self.error = Some(err.message().to_string());
                    }
                }
            }
            ApiResponse::QuestionUpdated { id, result } => self.apply_update(&id, result),
            ApiResponse::QuestionDeleted { id, result } => self.apply_delete(&id, result),
            _ => {}
        }
        Ok(ScreenAction::None)
    }

    fn is_input_focused(&self) -> bool {
        self.edit_modal
            .as_ref()
            .is_some_and(EditQuestionModal::is_text_focused)
    }

    fn has_modal(&self) -> bool {
        self.edit_modal.is_some() || self.confirm_delete.is_some()
    }

    fn on_enter(&mut self, _ctx: &ScreenContext) -> Result<ScreenAction> {
        Ok(self.fetch())
    }

    fn footer_hints(&self) -> &'static str {
        if self.edit_modal.is_some() {
            "Field: Tab/Shift+Tab | Save: Ctrl+S | Close: Esc"
        } else if self.confirm_delete.is_some() {
            ConfirmDialog::FOOTER
        } else {
            "Select: ↑↓ | Edit: e | Delete: d | Reload: r | Home: Esc"
        }
    }
}

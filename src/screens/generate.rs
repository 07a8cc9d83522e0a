//! AI generation screen.
//!
//! A topic form on the left, generated questions on the right. Generated
//! questions are only displayed; they are stored by the service itself.

use crate::api::{Difficulty, GenerateRequest, Question};
use crate::components::form_fields::FormFields;
use crate::components::loading_spinner::LoadingSpinner;
use crate::components::message_box::MessageBox;
use crate::components::question_card::render_cards;
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::services::{ApiRequest, ApiResponse};
use crate::styles::theme;
use crate::utils::form::{cycle_index, NumberField};
use crate::utils::text_input::TextInput;
use crate::widgets::{TextInputWidget, TextInputWidgetExt};
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use tracing::warn;

pub const DEFAULT_COUNT: u32 = 3;
pub const MIN_COUNT: u32 = 1;
pub const MAX_COUNT: u32 = 50;

const OVERLOADED_MESSAGE: &str =
    "AI generation failed: The model is overloaded. Please try again later.";

/// Replace the raw service error for an overloaded model with a friendlier one.
pub fn generation_error_message(raw: &str) -> String {
    if raw.contains("503") && raw.contains("model is overloaded") {
        OVERLOADED_MESSAGE.to_string()
    } else if raw.trim().is_empty() {
        "An unknown error occurred during MCQ generation.".to_string()
    } else {
        raw.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Topic,
    Difficulty,
    Count,
    Category,
    Submit,
}

const FIELDS: [Field; 5] = [
    Field::Topic,
    Field::Difficulty,
    Field::Count,
    Field::Category,
    Field::Submit,
];

pub struct GenerateScreen {
    topic: TextInput,
    difficulty: Difficulty,
    count: NumberField,
    category: TextInput,
    focus: usize,
    loading: bool,
    error: Option<String>,
    questions: Vec<Question>,
    scroll: usize,
}

impl Default for GenerateScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerateScreen {
    pub fn new() -> Self {
        Self {
            topic: TextInput::new(),
            difficulty: Difficulty::default(),
            count: NumberField::new(DEFAULT_COUNT, MIN_COUNT, MAX_COUNT),
            category: TextInput::new(),
            focus: 0,
            loading: false,
            error: None,
            questions: Vec::new(),
            scroll: 0,
        }
    }

    fn focused(&self) -> Field {
        FIELDS[self.focus]
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Build the request, or set an error when the topic is missing.
    pub fn submit(&mut self) -> ScreenAction {
        if self.loading {
            return ScreenAction::None;
        }
        let Some(topic) = self.topic.non_empty() else {
            self.error = Some("Please enter a topic.".to_string());
            return ScreenAction::None;
        };

        self.count.normalize();
        self.loading = true;
        self.error = None;
        self.questions.clear();
        self.scroll = 0;

        ScreenAction::Request(ApiRequest::GenerateMcqs(GenerateRequest {
            topic,
            difficulty: self.difficulty,
            num_questions: self.count.value(),
            category: self.category.non_empty(),
        }))
    }

    fn render_form(&self, frame: &mut Frame, area: Rect, tick: u64) {
        let t = theme();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_style())
            .title(" Generate MCQs with AI ")
            .title_style(t.title_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);
        let focused = self.focused();

        frame.render_text_input_widget(
            TextInputWidget::new(&self.topic)
                .title("Topic")
                .placeholder("e.g., Artificial Intelligence, Climate Change")
                .required(true)
                .focused(focused == Field::Topic),
            rows[0],
        );
        FormFields::render_choice(
            frame,
            rows[1],
            "Difficulty",
            self.difficulty.label(),
            focused == Field::Difficulty,
        );
        frame.render_text_input_widget(
            TextInputWidget::number(&self.count)
                .title("Number of Questions (1-50)")
                .required(true)
                .focused(focused == Field::Count),
            rows[2],
        );
        frame.render_text_input_widget(
            TextInputWidget::new(&self.category)
                .title("Category (optional)")
                .placeholder("e.g., Science, History")
                .focused(focused == Field::Category),
            rows[3],
        );

        if self.loading {
            LoadingSpinner::render(frame, rows[5], tick, Some("Generating..."));
        } else {
            FormFields::render_button(
                frame,
                rows[5],
                "Generate MCQs",
                focused == Field::Submit,
                false,
            );
        }

        frame.render_widget(
            Paragraph::new(
                "Tip: be specific with your topic for more relevant questions. \
                 Try 'Quantum Physics Basics' rather than just 'Physics'.",
            )
            .style(t.muted_style())
            .wrap(Wrap { trim: true }),
            rows[6].inner(Margin::new(1, 1)),
        );
    }

    fn render_results(&mut self, frame: &mut Frame, area: Rect, tick: u64) -> Result<()> {
        let t = theme();
        let title = if self.questions.is_empty() {
            " Generated Questions ".to_string()
        } else {
            format!(" Generated Questions ({}) ", self.questions.len())
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_style())
            .title(title)
            .title_style(t.title_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let error_height = self
            .error
            .as_deref()
            .map_or(0, |e| MessageBox::height(e, inner.width));
        let [error_area, list_area] =
            Layout::vertical([Constraint::Length(error_height), Constraint::Min(0)]).areas(inner);

        if let Some(error) = &self.error {
            MessageBox::render_error(frame, error_area, error)?;
        }

        if self.loading {
            LoadingSpinner::render(frame, list_area, tick, Some("Generating questions..."));
        } else if self.questions.is_empty() {
            if self.error.is_none() {
                frame.render_widget(
                    Paragraph::new("Fill in a topic and press Enter to generate questions.")
                        .style(t.muted_style())
                        .alignment(Alignment::Center)
                        .wrap(Wrap { trim: true }),
                    list_area,
                );
            }
        } else {
            render_cards(frame, list_area, &self.questions, None, &mut self.scroll);
        }
        Ok(())
    }
}

impl Screen for GenerateScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let [form_area, results_area] =
            Layout::horizontal([Constraint::Length(44), Constraint::Min(20)]).areas(area);
        self.render_form(frame, form_area, ctx.tick);
        self.render_results(frame, results_area, ctx.tick)
    }

    fn handle_event(&mut self, event: Event, _ctx: &ScreenContext) -> Result<ScreenAction> {
        let Event::Key(key) = event else {
            return Ok(ScreenAction::None);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(ScreenAction::None);
        }

        match key.code {
            KeyCode::Tab => {
                self.focus = cycle_index(self.focus, FIELDS.len(), true);
                return Ok(ScreenAction::None);
            }
            KeyCode::BackTab => {
                self.focus = cycle_index(self.focus, FIELDS.len(), false);
                return Ok(ScreenAction::None);
            }
            KeyCode::Enter => return Ok(self.submit()),
            KeyCode::PageDown => {
                self.scroll = self.scroll.saturating_add(5);
                return Ok(ScreenAction::None);
            }
            KeyCode::PageUp => {
                self.scroll = self.scroll.saturating_sub(5);
                return Ok(ScreenAction::None);
            }
            _ => {}
        }

        match self.focused() {
            Field::Topic => {
                self.topic.handle_key(key.code);
            }
            Field::Category => {
                self.category.handle_key(key.code);
            }
            Field::Count => {
                self.count.handle_key(key.code);
            }
            Field::Difficulty => match key.code {
                KeyCode::Left => self.difficulty = self.difficulty.prev(),
                KeyCode::Right | KeyCode::Char(' ') => self.difficulty = self.difficulty.next(),
                _ => {}
            },
            Field::Submit => {}
        }
        Ok(ScreenAction::None)
    }

    fn on_response(&mut self, response: ApiResponse, _ctx: &ScreenContext) -> Result<ScreenAction> {
        if let ApiResponse::McqsGenerated(result) = response {
            self.loading = false;
            match result {
                Ok(questions) => self.questions = questions,
                Err(err) => {
                    warn!("MCQ generation failed: {}", err);
                    self.error = Some(generation_error_message(err.message()));
                }
            }
        }
        Ok(ScreenAction::None)
    }

    fn is_input_focused(&self) -> bool {
        matches!(self.focused(), Field::Topic | Field::Category | Field::Count)
    }

    fn footer_hints(&self) -> &'static str {
        "Field: Tab/Shift+Tab | Change: ←→/↑↓ | Generate: Enter | Scroll: PgUp/PgDn | Home: Esc"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::config::Config;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn press(screen: &mut GenerateScreen, code: KeyCode) -> ScreenAction {
        let config = Config::default();
        let ctx = ScreenContext::new(&config);
        screen
            .handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)), &ctx)
            .unwrap()
    }

    fn type_text(screen: &mut GenerateScreen, text: &str) {
        for c in text.chars() {
            press(screen, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_submit_requires_topic() {
        let mut screen = GenerateScreen::new();
        assert_eq!(press(&mut screen, KeyCode::Enter), ScreenAction::None);
        assert_eq!(screen.error(), Some("Please enter a topic."));
        assert!(!screen.is_loading());
    }

    #[test]
    fn test_submit_builds_request_with_defaults() {
        let mut screen = GenerateScreen::new();
        type_text(&mut screen, "Photosynthesis");

        let action = press(&mut screen, KeyCode::Enter);
        assert_eq!(
            action,
            ScreenAction::Request(ApiRequest::GenerateMcqs(GenerateRequest {
                topic: "Photosynthesis".to_string(),
                difficulty: Difficulty::Medium,
                num_questions: 3,
                category: None,
            }))
        );
        assert!(screen.is_loading());
        // A second Enter while pending is ignored
        assert_eq!(press(&mut screen, KeyCode::Enter), ScreenAction::None);
    }

    #[test]
    fn test_count_is_clamped() {
        let mut screen = GenerateScreen::new();
        type_text(&mut screen, "Rust");
        press(&mut screen, KeyCode::Tab);
        press(&mut screen, KeyCode::Tab);
        press(&mut screen, KeyCode::Backspace);
        type_text(&mut screen, "99");

        match press(&mut screen, KeyCode::Enter) {
            ScreenAction::Request(ApiRequest::GenerateMcqs(req)) => {
                assert_eq!(req.num_questions, MAX_COUNT);
            }
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn test_overloaded_error_is_mapped() {
        let mut screen = GenerateScreen::new();
        type_text(&mut screen, "Rust");
        press(&mut screen, KeyCode::Enter);

        let config = Config::default();
        let ctx = ScreenContext::new(&config);
        let raw = "Failed to generate MCQs: 503 UNAVAILABLE. The model is overloaded.";
        screen
            .on_response(ApiResponse::McqsGenerated(Err(ApiError::new(raw))), &ctx)
            .unwrap();

        assert_eq!(screen.error(), Some(OVERLOADED_MESSAGE));
        assert!(!screen.is_loading());
    }

    #[test]
    fn test_other_errors_are_shown_verbatim() {
        assert_eq!(generation_error_message("Topic too vague"), "Topic too vague");
        assert_eq!(
            generation_error_message("500 internal"),
            "500 internal".to_string()
        );
    }
}

//! Manual question authoring with a fixed set of four options.

use crate::api::{Difficulty, Question, QuestionDraft};
use crate::components::form_fields::FormFields;
use crate::components::loading_spinner::LoadingSpinner;
use crate::components::message_box::MessageBox;
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::services::{ApiRequest, ApiResponse};
use crate::styles::theme;
use crate::utils::form::{cycle_index, parse_categories};
use crate::utils::text::option_letter;
use crate::utils::text_input::TextInput;
use crate::widgets::{TextInputWidget, TextInputWidgetExt};
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders};
use tracing::{info, warn};

pub const OPTION_COUNT: usize = 4;
pub const MISSING_FIELDS_MESSAGE: &str =
    "Please fill in all required fields (Question, all Options, and Correct Answer).";
pub const CREATED_MESSAGE: &str = "Question created successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    QuestionText,
    Option(usize),
    CorrectAnswer,
    Explanation,
    Difficulty,
    Categories,
    Submit,
}

const FIELDS: [Field; 10] = [
    Field::QuestionText,
    Field::Option(0),
    Field::Option(1),
    Field::Option(2),
    Field::Option(3),
    Field::CorrectAnswer,
    Field::Explanation,
    Field::Difficulty,
    Field::Categories,
    Field::Submit,
];

pub struct CreateQuestionScreen {
    question_text: TextInput,
    options: [TextInput; OPTION_COUNT],
    /// Unset until the user picks one
    correct_answer: Option<usize>,
    explanation: TextInput,
    difficulty: Difficulty,
    categories: TextInput,
    focus: usize,
    loading: bool,
    success: Option<String>,
    error: Option<String>,
}

impl Default for CreateQuestionScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl CreateQuestionScreen {
    pub fn new() -> Self {
        Self {
            question_text: TextInput::new(),
            options: Default::default(),
            correct_answer: None,
            explanation: TextInput::new(),
            difficulty: Difficulty::default(),
            categories: TextInput::new(),
            focus: 0,
            loading: false,
            success: None,
            error: None,
        }
    }

    fn focused(&self) -> Field {
        FIELDS[self.focus]
    }

    pub fn correct_answer(&self) -> Option<usize> {
        self.correct_answer
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    /// Step the correct answer through the options that have text.
    pub fn cycle_correct_answer(&mut self, forward: bool) {
        let mut candidate = match (self.correct_answer, forward) {
            (Some(index), _) => index,
            (None, true) => OPTION_COUNT - 1,
            (None, false) => 0,
        };
        for _ in 0..OPTION_COUNT {
            candidate = cycle_index(candidate, OPTION_COUNT, forward);
            if !self.options[candidate].is_empty() {
                self.correct_answer = Some(candidate);
                return;
            }
        }
    }

    /// Validate the form into a create payload.
    pub fn validate(&self) -> Result<QuestionDraft, String> {
        let question_text = self.question_text.text_trimmed();
        let options: Vec<String> = self
            .options
            .iter()
            .map(|o| o.text_trimmed().to_string())
            .collect();

        let correct = self.correct_answer.filter(|i| *i < OPTION_COUNT);
        match correct {
            Some(index) if !question_text.is_empty() && options.iter().all(|o| !o.is_empty()) => {
                Ok(QuestionDraft {
                    question_text: question_text.to_string(),
                    options,
                    correct_answer_index: index,
                    explanation: self.explanation.non_empty(),
                    difficulty: self.difficulty,
                    categories: parse_categories(self.categories.text()),
                })
            }
            _ => Err(MISSING_FIELDS_MESSAGE.to_string()),
        }
    }

    pub fn submit(&mut self) -> ScreenAction {
        if self.loading {
            return ScreenAction::None;
        }
        self.success = None;
        self.error = None;
        match self.validate() {
            Ok(draft) => {
                self.loading = true;
                ScreenAction::Request(ApiRequest::CreateQuestion(draft))
            }
            Err(message) => {
                self.error = Some(message);
                ScreenAction::None
            }
        }
    }

    fn reset_fields(&mut self) {
        self.question_text.clear();
        for option in &mut self.options {
            option.clear();
        }
        self.correct_answer = None;
        self.explanation.clear();
        self.difficulty = Difficulty::default();
        self.categories.clear();
        self.focus = 0;
    }

    fn on_created(&mut self, question: Question) {
        info!("Created question {}", question.id);
        self.success = Some(CREATED_MESSAGE.to_string());
        self.reset_fields();
    }

    fn correct_answer_label(&self) -> String {
        match self.correct_answer {
            Some(index) => {
                let text = self.options[index].text_trimmed();
                if text.is_empty() {
                    format!("{}) (Option {})", option_letter(index), option_letter(index))
                } else {
                    format!("{}) {}", option_letter(index), text)
                }
            }
            None => "Select correct option".to_string(),
        }
    }
}

impl Screen for CreateQuestionScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let t = theme();
        let width = area.width.min(90);
        let area = Rect::new(area.x + (area.width - width) / 2, area.y, width, area.height);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_style())
            .title(" Create New Question Manually ")
            .title_style(t.title_style())
            .title_alignment(Alignment::Center);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let banner = self
            .error
            .as_deref()
            .or(self.success.as_deref())
            .map(|m| MessageBox::height(m, inner.width))
            .unwrap_or(0);

        let rows = Layout::vertical([
            Constraint::Length(banner),
            Constraint::Length(3), // question
            Constraint::Length(3), // options A, B
            Constraint::Length(3), // options C, D
            Constraint::Length(3), // correct answer
            Constraint::Length(3), // explanation
            Constraint::Length(3), // difficulty + categories
            Constraint::Length(1),
            Constraint::Length(1), // submit
            Constraint::Min(0),
        ])
        .split(inner);
        let focused = self.focused();

        if let Some(error) = &self.error {
            MessageBox::render_error(frame, rows[0], error)?;
        } else if let Some(success) = &self.success {
            MessageBox::render_success(frame, rows[0], success)?;
        }

        frame.render_text_input_widget(
            TextInputWidget::new(&self.question_text)
                .title("Question Text")
                .placeholder("Enter the question text here...")
                .required(true)
                .focused(focused == Field::QuestionText),
            rows[1],
        );

        let titles: Vec<String> = (0..OPTION_COUNT)
            .map(|i| format!("Option {}", option_letter(i)))
            .collect();
        for pair in 0..2 {
            let [left, right] =
                Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .areas(rows[2 + pair]);
            for (slot, cell) in [left, right].into_iter().enumerate() {
                let i = pair * 2 + slot;
                frame.render_text_input_widget(
                    TextInputWidget::new(&self.options[i])
                        .title(&titles[i])
                        .placeholder(&titles[i])
                        .required(true)
                        .focused(focused == Field::Option(i)),
                    cell,
                );
            }
        }

        FormFields::render_choice(
            frame,
            rows[4],
            "Correct Answer *",
            &self.correct_answer_label(),
            focused == Field::CorrectAnswer,
        );
        frame.render_text_input_widget(
            TextInputWidget::new(&self.explanation)
                .title("Explanation (optional)")
                .placeholder("Provide an explanation for the correct answer...")
                .focused(focused == Field::Explanation),
            rows[5],
        );

        let [difficulty_area, categories_area] =
            Layout::horizontal([Constraint::Length(22), Constraint::Min(10)]).areas(rows[6]);
        FormFields::render_choice(
            frame,
            difficulty_area,
            "Difficulty",
            self.difficulty.label(),
            focused == Field::Difficulty,
        );
        frame.render_text_input_widget(
            TextInputWidget::new(&self.categories)
                .title("Categories (comma-separated)")
                .placeholder("e.g., Science, Biology, Fundamentals")
                .focused(focused == Field::Categories),
            categories_area,
        );

        if self.loading {
            LoadingSpinner::render(frame, rows[8], ctx.tick, Some("Creating..."));
        } else {
            FormFields::render_button(
                frame,
                rows[8],
                "Create Question",
                focused == Field::Submit,
                false,
            );
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

        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus = cycle_index(self.focus, FIELDS.len(), true);
                return Ok(ScreenAction::None);
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = cycle_index(self.focus, FIELDS.len(), false);
                return Ok(ScreenAction::None);
            }
            KeyCode::Enter => return Ok(self.submit()),
            _ => {}
        }

        match self.focused() {
            Field::QuestionText => {
                self.question_text.handle_key(key.code);
            }
            Field::Option(i) => {
                self.options[i].handle_key(key.code);
            }
            Field::Explanation => {
                self.explanation.handle_key(key.code);
            }
            Field::Categories => {
                self.categories.handle_key(key.code);
            }
            Field::CorrectAnswer => match key.code {
                KeyCode::Left => self.cycle_correct_answer(false),
                KeyCode::Right | KeyCode::Char(' ') => self.cycle_correct_answer(true),
                _ => {}
            },
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
        if let ApiResponse::QuestionCreated(result) = response {
            self.loading = false;
            match result {
                Ok(question) => self.on_created(question),
                Err(err) => {
                    warn!("Failed to create question: {}", err);
                    self.error = Some(err.message().to_string());
                }
            }
        }
        Ok(ScreenAction::None)
    }

    fn is_input_focused(&self) -> bool {
        matches!(
            self.focused(),
            Field::QuestionText | Field::Option(_) | Field::Explanation | Field::Categories
        )
    }
}

//! Quiz flow: configure, answer, see the score.

use crate::api::{
    AnswerRecord, Difficulty, QuizQuestion, QuizRequest, QuizResult, QuizSubmission, UNANSWERED,
};
use crate::components::form_fields::FormFields;
use crate::components::loading_spinner::LoadingSpinner;
use crate::components::message_box::MessageBox;
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::services::{ApiRequest, ApiResponse};
use crate::styles::theme;
use crate::utils::form::{cycle_index, NumberField};
use crate::utils::text::{option_letter, wrap_text};
use crate::utils::text_input::TextInput;
use crate::widgets::{TextInputWidget, TextInputWidgetExt};
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use std::collections::HashMap;
use tracing::{info, warn};

pub const DEFAULT_QUIZ_SIZE: u32 = 5;
pub const MIN_QUIZ_SIZE: u32 = 1;
pub const MAX_QUIZ_SIZE: u32 = 20;
pub const NO_QUESTIONS_MESSAGE: &str =
    "No questions found matching your criteria. Try different filters or generate/create more questions.";

/// One answer record per question, in quiz order; unanswered questions get -1.
pub fn build_answer_records(
    questions: &[QuizQuestion],
    answers: &HashMap<String, usize>,
) -> Vec<AnswerRecord> {
    questions
        .iter()
        .map(|q| AnswerRecord {
            question_id: q.id.clone(),
            user_answer_index: answers
                .get(&q.id)
                .and_then(|i| i64::try_from(*i).ok())
                .unwrap_or(UNANSWERED),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub enum QuizPhase {
    Configure,
    Answering,
    Finished(QuizResult),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Count,
    Difficulty,
    Category,
    Submit,
}

const FIELDS: [Field; 4] = [Field::Count, Field::Difficulty, Field::Category, Field::Submit];

pub struct QuizTakerScreen {
    phase: QuizPhase,
    count: NumberField,
    difficulty: Difficulty,
    category: TextInput,
    focus: usize,
    questions: Vec<QuizQuestion>,
    answers: HashMap<String, usize>,
    current: usize,
    highlighted: usize,
    scroll: usize,
    loading: bool,
    error: Option<String>,
}

impl Default for QuizTakerScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizTakerScreen {
    pub fn new() -> Self {
        Self {
            phase: QuizPhase::Configure,
            count: NumberField::new(DEFAULT_QUIZ_SIZE, MIN_QUIZ_SIZE, MAX_QUIZ_SIZE),
            difficulty: Difficulty::default(),
            category: TextInput::new(),
            focus: 0,
            questions: Vec::new(),
            answers: HashMap::new(),
            current: 0,
            highlighted: 0,
            scroll: 0,
            loading: false,
            error: None,
        }
    }

    pub fn phase(&self) -> &QuizPhase {
        &self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn answers(&self) -> &HashMap<String, usize> {
        &self.answers
    }

    /// Back to an empty configuration form with default inputs.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn generate(&mut self) -> ScreenAction {
        if self.loading {
            return ScreenAction::None;
        }
        self.count.normalize();
        self.loading = true;
        self.error = None;
        self.questions.clear();
        self.answers.clear();

        ScreenAction::Request(ApiRequest::GenerateQuiz(QuizRequest {
            num_questions: self.count.value(),
            difficulty: Some(self.difficulty),
            category: self.category.non_empty(),
        }))
    }

    /// Record `option` for the current question, replacing any earlier choice.
    pub fn choose(&mut self, option: usize) {
        if let Some(question) = self.questions.get(self.current) {
            if option < question.options.len() {
                self.answers.insert(question.id.clone(), option);
                self.highlighted = option;
            }
        }
    }

    pub fn submit(&mut self, user_id: Option<String>) -> ScreenAction {
        if self.loading || self.phase != QuizPhase::Answering {
            return ScreenAction::None;
        }
        self.loading = true;
        self.error = None;
        ScreenAction::Request(ApiRequest::SubmitQuiz(QuizSubmission {
            answers: build_answer_records(&self.questions, &self.answers),
            user_id,
        }))
    }

    fn go_to_question(&mut self, index: usize) {
        self.current = index.min(self.questions.len().saturating_sub(1));
        let current_id = self.questions.get(self.current).map(|q| q.id.as_str());
        self.highlighted = current_id
            .and_then(|id| self.answers.get(id).copied())
            .unwrap_or(0);
    }

    fn handle_configure_key(&mut self, code: KeyCode) -> ScreenAction {
        match code {
            KeyCode::Tab => self.focus = cycle_index(self.focus, FIELDS.len(), true),
            KeyCode::BackTab => self.focus = cycle_index(self.focus, FIELDS.len(), false),
            KeyCode::Enter => return self.generate(),
            _ => match FIELDS[self.focus] {
                Field::Count => {
                    self.count.handle_key(code);
                }
                Field::Category => {
                    self.category.handle_key(code);
                }
                Field::Difficulty => match code {
                    KeyCode::Left => self.difficulty = self.difficulty.prev(),
                    KeyCode::Right | KeyCode::Char(' ') => {
                        self.difficulty = self.difficulty.next();
                    }
                    _ => {}
                },
                Field::Submit => {}
            },
        }
        ScreenAction::None
    }

    fn handle_answering_key(&mut self, code: KeyCode, ctx: &ScreenContext) -> ScreenAction {
        let option_count = self
            .questions
            .get(self.current)
            .map_or(0, |q| q.options.len());
        match code {
            KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => {
                self.go_to_question(self.current.saturating_sub(1));
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                self.go_to_question(self.current + 1);
            }
            KeyCode::Left => self.highlighted = cycle_index(self.highlighted, option_count, false),
            KeyCode::Right => self.highlighted = cycle_index(self.highlighted, option_count, true),
            KeyCode::Enter | KeyCode::Char(' ') => self.choose(self.highlighted),
            KeyCode::Char(c @ 'a'..='f') => self.choose(c as usize - 'a' as usize),
            KeyCode::Char('s') => return self.submit(ctx.config.user_id.clone()),
            _ => {}
        }
        ScreenAction::None
    }

    fn render_configure(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);
        let focused = FIELDS[self.focus];

        frame.render_text_input_widget(
            TextInputWidget::number(&self.count)
                .title("Number of Questions (1-20)")
                .required(true)
                .focused(focused == Field::Count),
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
            TextInputWidget::new(&self.category)
                .title("Category (optional)")
                .placeholder("e.g., Science, History")
                .focused(focused == Field::Category),
            rows[2],
        );
        FormFields::render_button(
            frame,
            rows[4],
            "Generate Quiz",
            focused == Field::Submit,
            false,
        );
    }

    fn render_answering(&mut self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let [status_area, list_area, submit_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(format!(
                "Answered {} of {}",
                self.answers.len(),
                self.questions.len()
            ))
            .style(t.muted_style())
            .alignment(Alignment::Right),
            status_area,
        );

        let width = list_area.width.saturating_sub(8).max(10) as usize;
        let mut lines: Vec<Line> = Vec::new();
        let mut current_rows = (0, 0);
        for (q_index, question) in self.questions.iter().enumerate() {
            let start = lines.len();
            let is_current = q_index == self.current;
            let marker = if is_current { "▌ " } else { "  " };
            let marker_style = t.border_focused_style();

            let label = format!("{}. ", q_index + 1);
            for (i, chunk) in wrap_text(&question.question_text, width)
                .into_iter()
                .enumerate()
            {
                let prefix = if i == 0 { label.clone() } else { " ".repeat(label.len()) };
                lines.push(Line::from(vec![
                    Span::styled(marker, marker_style),
                    Span::styled(prefix, t.title_style()),
                    Span::styled(chunk, t.text_style().add_modifier(Modifier::BOLD)),
                ]));
            }

            let chosen = self.answers.get(&question.id).copied();
            for (o_index, option) in question.options.iter().enumerate() {
                let radio = if chosen == Some(o_index) { "(•)" } else { "( )" };
                let mut style = if chosen == Some(o_index) {
                    t.success_style()
                } else {
                    t.text_style()
                };
                if is_current && o_index == self.highlighted {
                    style = style.patch(t.highlight_style());
                }
                lines.push(Line::from(vec![
                    Span::styled(marker, marker_style),
                    Span::styled(
                        format!("   {} {}) {}", radio, option_letter(o_index), option),
                        style,
                    ),
                ]));
            }
            lines.push(Line::default());
            if is_current {
                current_rows = (start, lines.len());
            }
        }

        let height = list_area.height as usize;
        let (start, end) = current_rows;
        if start < self.scroll {
            self.scroll = start;
        } else if end > self.scroll + height {
            self.scroll = end.saturating_sub(height).min(start);
        }
        frame.render_widget(
            Paragraph::new(lines).scroll((self.scroll as u16, 0)),
            list_area,
        );

        FormFields::render_button(frame, submit_area, "Submit Quiz (s)", false, self.loading);
    }

    fn render_result(&self, frame: &mut Frame, area: Rect, result: &QuizResult) {
        let t = theme();
        let lines = vec![
            Line::styled("Quiz Results", t.title_style()),
            Line::default(),
            Line::from(vec![
                Span::styled("Total Questions: ", t.text_style()),
                Span::styled(
                    result.total_questions.to_string(),
                    t.text_style().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Correct Answers: ", t.text_style()),
                Span::styled(
                    result.correct_answers.to_string(),
                    t.success_style().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::default(),
            Line::styled(
                format!("Score: {:.2}%", result.score),
                t.success_style().add_modifier(Modifier::BOLD),
            ),
            Line::default(),
        ];
        let [text_area, button_area] =
            Layout::vertical([Constraint::Length(lines.len() as u16), Constraint::Length(1)])
                .areas(area);
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            text_area,
        );
        FormFields::render_button(frame, button_area, "Take Another Quiz", true, false);
    }

    fn render_error(&self, frame: &mut Frame, area: Rect, error: &str) -> Result<()> {
        let height = MessageBox::height(error, area.width);
        let [message_area, _, button_area] = Layout::vertical([
            Constraint::Length(height),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);
        MessageBox::render_error(frame, message_area, error)?;
        FormFields::render_button(frame, button_area, "Try Again", true, false);
        Ok(())
    }
}

impl Screen for QuizTakerScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let t = theme();
        let width = area.width.min(90);
        let area = Rect::new(area.x + (area.width - width) / 2, area.y, width, area.height);
        let title = match self.phase {
            QuizPhase::Configure => " Start a New Quiz ",
            QuizPhase::Answering => " Answer the Questions ",
            QuizPhase::Finished(_) => " Quiz Results ",
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_style())
            .title(title)
            .title_style(t.title_style())
            .title_alignment(Alignment::Center);
        let inner = block.inner(area).inner(Margin::new(1, 0));
        frame.render_widget(block, area);

        if self.loading {
            LoadingSpinner::render(frame, inner, ctx.tick, None);
            return Ok(());
        }
        if let Some(error) = self.error.clone() {
            return self.render_error(frame, inner, &error);
        }

        match self.phase.clone() {
            QuizPhase::Configure => self.render_configure(frame, inner),
            QuizPhase::Answering => self.render_answering(frame, inner),
            QuizPhase::Finished(result) => self.render_result(frame, inner, &result),
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction> {
        let Event::Key(key) = event else {
            return Ok(ScreenAction::None);
        };
        if key.kind != KeyEventKind::Press || self.loading {
            return Ok(ScreenAction::None);
        }

        if self.error.is_some() {
            if key.code == KeyCode::Enter {
                self.reset();
            }
            return Ok(ScreenAction::None);
        }

        Ok(match self.phase {
            QuizPhase::Configure => self.handle_configure_key(key.code),
            QuizPhase::Answering => self.handle_answering_key(key.code, ctx),
            QuizPhase::Finished(_) => {
                if key.code == KeyCode::Enter {
                    self.reset();
                }
                ScreenAction::None
            }
        })
    }

    fn on_response(&mut self, response: ApiResponse, _ctx: &ScreenContext) -> Result<ScreenAction> {
        match response {
            ApiResponse::QuizGenerated(result) => {
                self.loading = false;
                match result {
                    Ok(questions) if questions.is_empty() => {
                        self.error = Some(NO_QUESTIONS_MESSAGE.to_string());
                    }
                    Ok(questions) => {
                        info!("Quiz started with {} question(s)", questions.len());
                        self.questions = questions;
                        self.phase = QuizPhase::Answering;
                        self.scroll = 0;
                        self.go_to_question(0);
                    }
                    Err(err) => {
                        warn!("Failed to generate quiz: {}", err);
                        self.error = Some(err.message().to_string());
                    }
                }
            }
            ApiResponse::QuizSubmitted(result) => {
                self.loading = false;
                match result {
                    Ok(result) => {
                        info!(
                            "Quiz scored {}/{} ({:.2}%)",
                            result.correct_answers, result.total_questions, result.score
                        );
                        self.phase = QuizPhase::Finished(result);
                    }
                    Err(err) => {
                        warn!("Failed to submit quiz: {}", err);
                        self.error = Some(err.message().to_string());
                    }
                }
            }
            _ => {}
        }
        Ok(ScreenAction::None)
    }

    fn is_input_focused(&self) -> bool {
        self.phase == QuizPhase::Configure
            && self.error.is_none()
            && matches!(FIELDS[self.focus], Field::Count | Field::Category)
    }

    fn footer_hints(&self) -> &'static str {
        if self.error.is_some() {
            return "Try Again: Enter | Home: Esc";
        }
        match self.phase {
            QuizPhase::Configure => {
                "Field: Tab/Shift+Tab | Change: ←→/↑↓ | Generate: Enter | Home: Esc"
            }
            QuizPhase::Answering => {
                "Question: ↑↓ | Option: ←→ | Choose: Enter/a-f | Submit: s | Home: Esc"
            }
            QuizPhase::Finished(_) => "Take Another: Enter | Home: Esc",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::config::Config;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn quiz_question(id: &str) -> QuizQuestion {
        QuizQuestion {
            id: id.to_string(),
            question_text: format!("Question {}", id),
            options: vec!["w".into(), "x".into(), "y".into(), "z".into()],
        }
    }

    fn config() -> Config {
        Config {
            user_id: Some("student-1".to_string()),
            ..Config::default()
        }
    }

    fn press(screen: &mut QuizTakerScreen, code: KeyCode) -> ScreenAction {
        let config = config();
        let ctx = ScreenContext::new(&config);
        screen
            .handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)), &ctx)
            .unwrap()
    }

    fn respond(screen: &mut QuizTakerScreen, response: ApiResponse) {
        let config = config();
        let ctx = ScreenContext::new(&config);
        screen.on_response(response, &ctx).unwrap();
    }

    fn started(ids: &[&str]) -> QuizTakerScreen {
        let mut screen = QuizTakerScreen::new();
        press(&mut screen, KeyCode::Enter);
        let questions = ids.iter().map(|id| quiz_question(id)).collect();
        respond(&mut screen, ApiResponse::QuizGenerated(Ok(questions)));
        screen
    }

    #[test]
    fn test_build_answer_records_marks_unanswered() {
        let questions = vec![quiz_question("q1"), quiz_question("q2"), quiz_question("q3")];
        let answers = HashMap::from([("q1".to_string(), 2), ("q3".to_string(), 0)]);

        let records = build_answer_records(&questions, &answers);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].user_answer_index, 2);
        assert_eq!(records[1].question_id, "q2");
        assert_eq!(records[1].user_answer_index, -1);
        assert_eq!(records[2].user_answer_index, 0);
    }

    #[test]
    fn test_generate_uses_defaults() {
        let mut screen = QuizTakerScreen::new();
        assert_eq!(
            press(&mut screen, KeyCode::Enter),
            ScreenAction::Request(ApiRequest::GenerateQuiz(QuizRequest {
                num_questions: 5,
                difficulty: Some(Difficulty::Medium),
                category: None,
            }))
        );
    }

    #[test]
    fn test_empty_quiz_shows_message_without_answering() {
        let mut screen = QuizTakerScreen::new();
        press(&mut screen, KeyCode::Enter);
        respond(&mut screen, ApiResponse::QuizGenerated(Ok(vec![])));

        assert_eq!(screen.error(), Some(NO_QUESTIONS_MESSAGE));
        assert_eq!(screen.phase(), &QuizPhase::Configure);

        press(&mut screen, KeyCode::Enter);
        assert_eq!(screen.error(), None);
    }

    #[test]
    fn test_reselecting_overwrites_answer() {
        let mut screen = started(&["q1", "q2"]);
        press(&mut screen, KeyCode::Char('a'));
        press(&mut screen, KeyCode::Char('c'));
        assert_eq!(screen.answers().get("q1"), Some(&2));
        assert_eq!(screen.answers().len(), 1);
    }

    #[test]
    fn test_submit_sends_record_for_every_question() {
        let mut screen = started(&["q1", "q2", "q3"]);
        press(&mut screen, KeyCode::Char('b'));
        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::Right);
        press(&mut screen, KeyCode::Enter);

        match press(&mut screen, KeyCode::Char('s')) {
            ScreenAction::Request(ApiRequest::SubmitQuiz(submission)) => {
                let indexes: Vec<i64> = submission
                    .answers
                    .iter()
                    .map(|a| a.user_answer_index)
                    .collect();
                assert_eq!(indexes, vec![1, -1, 1]);
                assert_eq!(submission.user_id.as_deref(), Some("student-1"));
            }
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn test_result_and_take_another_resets_everything() {
        let mut screen = started(&["q1"]);
        press(&mut screen, KeyCode::Char('a'));
        press(&mut screen, KeyCode::Char('s'));
        respond(
            &mut screen,
            ApiResponse::QuizSubmitted(Ok(QuizResult {
                id: None,
                user_id: None,
                quiz_date: None,
                total_questions: 1,
                correct_answers: 1,
                score: 100.0,
            })),
        );
        assert!(matches!(screen.phase(), QuizPhase::Finished(_)));

        press(&mut screen, KeyCode::Enter);
        assert_eq!(screen.phase(), &QuizPhase::Configure);
        assert!(screen.answers().is_empty());
        assert_eq!(screen.count.value(), DEFAULT_QUIZ_SIZE);
    }

    #[test]
    fn test_submit_error_offers_try_again() {
        let mut screen = started(&["q1"]);
        press(&mut screen, KeyCode::Char('s'));
        respond(
            &mut screen,
            ApiResponse::QuizSubmitted(Err(ApiError::new("Failed to submit quiz."))),
        );
        assert_eq!(screen.error(), Some("Failed to submit quiz."));
        press(&mut screen, KeyCode::Enter);
        assert_eq!(screen.phase(), &QuizPhase::Configure);
    }
}

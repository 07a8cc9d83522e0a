//! Modal form for editing a stored question.
//!
//! Options can be added (up to six) and removed (down to two). The correct
//! answer index is kept pointing at the same option across removals, and is
//! reset to the first option whenever it would fall out of range.

use crate::api::{ApiResult, Difficulty, Question, QuestionDraft, MAX_OPTIONS, MIN_OPTIONS};
use crate::components::form_fields::FormFields;
use crate::components::loading_spinner::LoadingSpinner;
use crate::components::message_box::MessageBox;
use crate::services::ApiRequest;
use crate::styles::theme;
use crate::utils::form::{cycle_index, parse_categories};
use crate::utils::layout::center_popup;
use crate::utils::text::option_letter;
use crate::utils::text_input::TextInput;
use crate::widgets::{TextInputWidget, TextInputWidgetExt};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use tracing::debug;

pub const MISSING_FIELDS_MESSAGE: &str =
    "Please provide a question and at least two non-empty options.";
pub const INVALID_ANSWER_MESSAGE: &str =
    "Please select a valid correct answer from the available options.";

/// Focusable parts of the modal, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    QuestionText,
    Option(usize),
    CorrectAnswer,
    Explanation,
    Difficulty,
    Categories,
    Save,
    Cancel,
}

/// Result of a key press inside the modal.
#[derive(Debug, Clone, PartialEq)]
pub enum ModalOutcome {
    None,
    Close,
    Submit(ApiRequest),
}

/// Where the correct answer index moves when option `removed` is deleted.
pub fn correct_index_after_removal(correct: usize, removed: usize) -> usize {
    if correct == removed {
        0
    } else if correct > removed {
        correct - 1
    } else {
        correct
    }
}

#[derive(Debug, Clone)]
pub struct EditQuestionModal {
    question_id: String,
    question_text: TextInput,
    options: Vec<TextInput>,
    correct_answer_index: usize,
    explanation: TextInput,
    difficulty: Difficulty,
    categories: TextInput,
    focus: usize,
    pending: bool,
    error: Option<String>,
}

impl EditQuestionModal {
    /// Pre-fill the form from `question`.
    pub fn new(question: &Question) -> Self {
        let mut modal = Self {
            question_id: question.id.clone(),
            question_text: TextInput::with_text(question.question_text.clone()),
            options: question
                .options
                .iter()
                .map(|o| TextInput::with_text(o.clone()))
                .collect(),
            correct_answer_index: question.correct_answer_index,
            explanation: TextInput::with_text(question.explanation.clone().unwrap_or_default()),
            difficulty: question.difficulty,
            categories: TextInput::with_text(question.categories.join(", ")),
            focus: 0,
            pending: false,
            error: None,
        };
        modal.normalize_correct_index();
        modal
    }

    pub fn question_id(&self) -> &str {
        &self.question_id
    }

    pub fn options(&self) -> Vec<&str> {
        self.options.iter().map(TextInput::text).collect()
    }

    pub fn correct_answer_index(&self) -> usize {
        self.correct_answer_index
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    fn fields(&self) -> Vec<EditField> {
        let mut fields = vec![EditField::QuestionText];
        fields.extend((0..self.options.len()).map(EditField::Option));
        fields.extend([
            EditField::CorrectAnswer,
            EditField::Explanation,
            EditField::Difficulty,
            EditField::Categories,
            EditField::Save,
            EditField::Cancel,
        ]);
        fields
    }

    pub fn focused_field(&self) -> EditField {
        let fields = self.fields();
        fields[self.focus.min(fields.len() - 1)]
    }

    fn focus_field(&mut self, field: EditField) {
        if let Some(pos) = self.fields().iter().position(|f| *f == field) {
            self.focus = pos;
        }
    }

    /// Whether the focused field takes typed characters.
    pub fn is_text_focused(&self) -> bool {
        matches!(
            self.focused_field(),
            EditField::QuestionText
                | EditField::Option(_)
                | EditField::Explanation
                | EditField::Categories
        )
    }

    pub fn set_option_text(&mut self, index: usize, text: &str) {
        if let Some(option) = self.options.get_mut(index) {
            option.set_text(text);
        }
    }

    /// Append an empty option if below the maximum.
    pub fn add_option(&mut self) -> bool {
        if self.options.len() >= MAX_OPTIONS {
            return false;
        }
        self.options.push(TextInput::new());
        self.focus_field(EditField::Option(self.options.len() - 1));
        true
    }

    /// Remove option `index` if above the minimum, keeping the answer index valid.
    pub fn remove_option(&mut self, index: usize) -> bool {
        if self.options.len() <= MIN_OPTIONS || index >= self.options.len() {
            return false;
        }
        self.options.remove(index);
        self.correct_answer_index = correct_index_after_removal(self.correct_answer_index, index);
        self.normalize_correct_index();
        self.focus_field(EditField::Option(index.min(self.options.len() - 1)));
        debug!(
            "Removed option {}, correct answer now {}",
            index, self.correct_answer_index
        );
        true
    }

    fn normalize_correct_index(&mut self) {
        if self.correct_answer_index >= self.options.len() {
            self.correct_answer_index = 0;
        }
    }

    /// Step the correct answer to the next non-empty option.
    pub fn cycle_correct_answer(&mut self, forward: bool) {
        let len = self.options.len();
        let mut candidate = self.correct_answer_index;
        for _ in 0..len {
            candidate = cycle_index(candidate, len, forward);
            if !self.options[candidate].is_empty() {
                self.correct_answer_index = candidate;
                return;
            }
        }
    }

    /// Validate and build the update payload.
    pub fn validate(&self) -> Result<QuestionDraft, String> {
        let question_text = self.question_text.text_trimmed().to_string();
        let options: Vec<String> = self
            .options
            .iter()
            .map(|o| o.text_trimmed().to_string())
            .collect();
        let non_empty = options.iter().filter(|o| !o.is_empty()).count();

        if question_text.is_empty() || non_empty < MIN_OPTIONS {
            return Err(MISSING_FIELDS_MESSAGE.to_string());
        }
        if options
            .get(self.correct_answer_index)
            .is_none_or(String::is_empty)
        {
            return Err(INVALID_ANSWER_MESSAGE.to_string());
        }

        Ok(QuestionDraft {
            question_text,
            options,
            correct_answer_index: self.correct_answer_index,
            explanation: self.explanation.non_empty(),
            difficulty: self.difficulty,
            categories: parse_categories(self.categories.text()),
        })
    }

    /// Validate and, if valid, emit the update request.
    pub fn submit(&mut self) -> ModalOutcome {
        if self.pending {
            return ModalOutcome::None;
        }
        match self.validate() {
            Ok(draft) => {
                self.pending = true;
                self.error = None;
                ModalOutcome::Submit(ApiRequest::UpdateQuestion {
                    id: self.question_id.clone(),
                    draft,
                })
            }
            Err(message) => {
                self.error = Some(message);
                ModalOutcome::None
            }
        }
    }

    /// Apply the update outcome. Returns the updated question on success.
    pub fn on_update_result(&mut self, result: ApiResult<Question>) -> Option<Question> {
        self.pending = false;
        match result {
            Ok(question) => Some(question),
            Err(err) => {
                self.error = Some(err.message().to_string());
                None
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ModalOutcome {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return ModalOutcome::Close,
            KeyCode::Char('s') if ctrl => return self.submit(),
            KeyCode::Char('n') if ctrl => {
                self.add_option();
                return ModalOutcome::None;
            }
            KeyCode::Char('d') if ctrl => {
                if let EditField::Option(index) = self.focused_field() {
                    self.remove_option(index);
                }
                return ModalOutcome::None;
            }
            KeyCode::Tab | KeyCode::Down => {
                self.focus = cycle_index(self.focus, self.fields().len(), true);
                return ModalOutcome::None;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = cycle_index(self.focus, self.fields().len(), false);
                return ModalOutcome::None;
            }
            _ => {}
        }

        match self.focused_field() {
            EditField::Cancel if key.code == KeyCode::Enter => ModalOutcome::Close,
            _ if key.code == KeyCode::Enter => self.submit(),
            EditField::CorrectAnswer => {
                match key.code {
                    KeyCode::Left => self.cycle_correct_answer(false),
                    KeyCode::Right | KeyCode::Char(' ') => self.cycle_correct_answer(true),
                    _ => {}
                }
                ModalOutcome::None
            }
            EditField::Difficulty => {
                match key.code {
                    KeyCode::Left => self.difficulty = self.difficulty.prev(),
                    KeyCode::Right | KeyCode::Char(' ') => self.difficulty = self.difficulty.next(),
                    _ => {}
                }
                ModalOutcome::None
            }
            EditField::QuestionText => {
                self.question_text.handle_key(key.code);
                ModalOutcome::None
            }
            EditField::Option(index) => {
                if let Some(option) = self.options.get_mut(index) {
                    option.handle_key(key.code);
                }
                ModalOutcome::None
            }
            EditField::Explanation => {
                self.explanation.handle_key(key.code);
                ModalOutcome::None
            }
            EditField::Categories => {
                self.categories.handle_key(key.code);
                ModalOutcome::None
            }
            EditField::Save | EditField::Cancel => ModalOutcome::None,
        }
    }

    fn correct_answer_label(&self) -> String {
        let index = self.correct_answer_index;
        let letter = option_letter(index);
        match self.options.get(index).map(TextInput::text_trimmed) {
            Some(text) if !text.is_empty() => format!("{}) {}", letter, text),
            _ => format!("{}) (Option {})", letter, letter),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, tick: u64) -> anyhow::Result<()> {
        let t = theme();
        let popup = center_popup(area, 80, 94);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_focused_style())
            .title(" Edit Question ")
            .title_style(t.title_style())
            .title_alignment(Alignment::Center)
            .style(t.background_style());
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let error_height = self
            .error
            .as_deref()
            .map_or(0, |e| MessageBox::height(e, inner.width));

        let mut constraints = vec![Constraint::Length(3)];
        constraints.extend(self.options.iter().map(|_| Constraint::Length(3)));
        constraints.extend([
            Constraint::Length(3), // correct answer
            Constraint::Length(3), // explanation
            Constraint::Length(3), // difficulty + categories
            Constraint::Length(error_height),
            Constraint::Length(1), // buttons
            Constraint::Min(0),
            Constraint::Length(1), // hints
        ]);
        let rows = Layout::vertical(constraints).split(inner);
        let focused = self.focused_field();

        frame.render_text_input_widget(
            TextInputWidget::new(&self.question_text)
                .title("Question Text")
                .placeholder("Enter your question here...")
                .required(true)
                .focused(focused == EditField::QuestionText),
            rows[0],
        );

        let titles: Vec<String> = (0..self.options.len())
            .map(|i| format!("Option {}", option_letter(i)))
            .collect();
        for (i, option) in self.options.iter().enumerate() {
            frame.render_text_input_widget(
                TextInputWidget::new(option)
                    .title(&titles[i])
                    .placeholder(&titles[i])
                    .required(true)
                    .focused(focused == EditField::Option(i)),
                rows[1 + i],
            );
        }

        let base = 1 + self.options.len();
        FormFields::render_choice(
            frame,
            rows[base],
            "Correct Answer *",
            &self.correct_answer_label(),
            focused == EditField::CorrectAnswer,
        );
        frame.render_text_input_widget(
            TextInputWidget::new(&self.explanation)
                .title("Explanation")
                .placeholder("Provide an optional explanation for the correct answer.")
                .focused(focused == EditField::Explanation),
            rows[base + 1],
        );

        let [difficulty_area, categories_area] =
            Layout::horizontal([Constraint::Length(22), Constraint::Min(10)]).areas(rows[base + 2]);
        FormFields::render_choice(
            frame,
            difficulty_area,
            "Difficulty",
            self.difficulty.label(),
            focused == EditField::Difficulty,
        );
        frame.render_text_input_widget(
            TextInputWidget::new(&self.categories)
                .title("Categories (comma-separated)")
                .placeholder("e.g., Science, History")
                .focused(focused == EditField::Categories),
            categories_area,
        );

        if let Some(error) = &self.error {
            MessageBox::render_error(frame, rows[base + 3], error)?;
        }

        let [save_area, cancel_area] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(rows[base + 4]);
        if self.pending {
            LoadingSpinner::render(frame, save_area, tick, Some("Saving..."));
        } else {
            FormFields::render_button(frame, save_area, "Save Changes", focused == EditField::Save, false);
        }
        FormFields::render_button(frame, cancel_area, "Cancel", focused == EditField::Cancel, false);

        let mut hints = vec!["Save: Ctrl+S", "Close: Esc"];
        if self.options.len() < MAX_OPTIONS {
            hints.push("Add option: Ctrl+N");
        }
        if self.options.len() > MIN_OPTIONS {
            hints.push("Remove option: Ctrl+D");
        }
        frame.render_widget(
            Paragraph::new(hints.join(" | "))
                .style(t.muted_style())
                .alignment(Alignment::Center),
            rows[base + 6],
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;

    fn question(options: &[&str], correct: usize) -> Question {
        Question {
            id: "q-1".to_string(),
            question_text: "  Which planet is largest?  ".to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_answer_index: correct,
            explanation: None,
            difficulty: Difficulty::Medium,
            categories: vec!["Astronomy".to_string(), "Science".to_string()],
            created_at: None,
            source: None,
            generated_from_doc_id: None,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_removal_rule() {
        assert_eq!(correct_index_after_removal(2, 2), 0);
        assert_eq!(correct_index_after_removal(3, 1), 2);
        assert_eq!(correct_index_after_removal(1, 3), 1);
    }

    #[test]
    fn test_removing_earlier_option_keeps_same_answer() {
        let mut modal = EditQuestionModal::new(&question(&["Mars", "Venus", "Jupiter", "Earth"], 2));
        assert!(modal.remove_option(0));
        assert_eq!(modal.options(), vec!["Venus", "Jupiter", "Earth"]);
        assert_eq!(modal.correct_answer_index(), 1);
    }

    #[test]
    fn test_removing_correct_option_resets_to_first() {
        let mut modal = EditQuestionModal::new(&question(&["Mars", "Venus", "Jupiter"], 2));
        assert!(modal.remove_option(2));
        assert_eq!(modal.correct_answer_index(), 0);
    }

    #[test]
    fn test_invariant_holds_across_removal_sequences() {
        let options = ["a", "b", "c", "d", "e", "f"];
        for correct in 0..6 {
            for first in 0..6 {
                for second in 0..5 {
                    let mut modal = EditQuestionModal::new(&question(&options, correct));
                    modal.remove_option(first);
                    assert!(modal.correct_answer_index() < modal.options().len());
                    modal.remove_option(second);
                    assert!(modal.correct_answer_index() < modal.options().len());
                }
            }
        }
    }

    #[test]
    fn test_option_count_limits() {
        let mut modal = EditQuestionModal::new(&question(&["a", "b"], 1));
        assert!(!modal.remove_option(0));
        for _ in 0..4 {
            assert!(modal.add_option());
        }
        assert!(!modal.add_option());
        assert_eq!(modal.options().len(), 6);
    }

    #[test]
    fn test_out_of_range_index_is_clamped_on_open() {
        let modal = EditQuestionModal::new(&question(&["a", "b"], 5));
        assert_eq!(modal.correct_answer_index(), 0);
    }

    #[test]
    fn test_validate_trims_and_nulls_empty_explanation() {
        let mut modal = EditQuestionModal::new(&question(&[" Mars ", "Jupiter "], 1));
        modal.explanation.set_text("   ");
        let draft = modal.validate().unwrap();
        assert_eq!(draft.question_text, "Which planet is largest?");
        assert_eq!(draft.options, vec!["Mars", "Jupiter"]);
        assert_eq!(draft.explanation, None);
        assert_eq!(draft.categories, vec!["Astronomy", "Science"]);
        assert!(draft.check().is_ok());
    }

    #[test]
    fn test_validate_requires_two_non_empty_options() {
        let mut modal = EditQuestionModal::new(&question(&["Mars", "Jupiter", "Venus"], 0));
        modal.set_option_text(1, "  ");
        modal.set_option_text(2, "");
        assert_eq!(modal.validate(), Err(MISSING_FIELDS_MESSAGE.to_string()));
    }

    #[test]
    fn test_validate_rejects_blank_correct_option() {
        let mut modal = EditQuestionModal::new(&question(&["Mars", "Jupiter", "Venus"], 2));
        modal.set_option_text(2, " ");
        assert_eq!(modal.validate(), Err(INVALID_ANSWER_MESSAGE.to_string()));
    }

    #[test]
    fn test_cycle_correct_answer_skips_empty_options() {
        let mut modal = EditQuestionModal::new(&question(&["Mars", "", "Venus"], 0));
        modal.cycle_correct_answer(true);
        assert_eq!(modal.correct_answer_index(), 2);
        modal.cycle_correct_answer(true);
        assert_eq!(modal.correct_answer_index(), 0);
    }

    #[test]
    fn test_submit_emits_update_request_once() {
        let mut modal = EditQuestionModal::new(&question(&["Mars", "Jupiter"], 1));
        let outcome = modal.handle_key(ctrl('s'));
        match outcome {
            ModalOutcome::Submit(ApiRequest::UpdateQuestion { id, draft }) => {
                assert_eq!(id, "q-1");
                assert_eq!(draft.correct_answer_index, 1);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(modal.is_pending());
        assert_eq!(modal.handle_key(ctrl('s')), ModalOutcome::None);
    }

    #[test]
    fn test_failed_update_shows_error_and_unlocks() {
        let mut modal = EditQuestionModal::new(&question(&["Mars", "Jupiter"], 1));
        modal.submit();
        let updated = modal.on_update_result(Err(ApiError::new("Question not found")));
        assert!(updated.is_none());
        assert_eq!(modal.error(), Some("Question not found"));
        assert!(!modal.is_pending());
    }

    #[test]
    fn test_render_shows_update_error() {
        use ratatui::backend::TestBackend;

        let mut modal = EditQuestionModal::new(&question(&["Mars", "Jupiter"], 1));
        modal.submit();
        modal.on_update_result(Err(ApiError::new("Question not found")));

        let mut terminal = Terminal::new(TestBackend::new(120, 48)).unwrap();
        let mut result = Ok(());
        terminal
            .draw(|frame| result = modal.render(frame, frame.area(), 0))
            .unwrap();
        result.unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Question not found"));
    }

    #[test]
    fn test_keyboard_remove_focused_option() {
        let mut modal = EditQuestionModal::new(&question(&["a", "b", "c"], 2));
        modal.handle_key(key(KeyCode::Tab));
        modal.handle_key(key(KeyCode::Tab));
        assert_eq!(modal.focused_field(), EditField::Option(1));
        modal.handle_key(ctrl('d'));
        assert_eq!(modal.options(), vec!["a", "c"]);
        assert_eq!(modal.correct_answer_index(), 1);
    }

    #[test]
    fn test_escape_closes() {
        let mut modal = EditQuestionModal::new(&question(&["a", "b"], 0));
        assert_eq!(modal.handle_key(key(KeyCode::Esc)), ModalOutcome::Close);
    }
}

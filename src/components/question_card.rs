use crate::api::Question;
use crate::styles::theme;
use crate::utils::text::{option_letter, wrap_text};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Renders a stored question as a block of pre-wrapped lines.
///
/// Lines are wrapped up front so list views know each card's exact height
/// when scrolling.
pub struct QuestionCard<'a> {
    question: &'a Question,
    number: Option<usize>,
    selected: bool,
}

impl<'a> QuestionCard<'a> {
    pub fn new(question: &'a Question) -> Self {
        Self {
            question,
            number: None,
            selected: false,
        }
    }

    /// Show `Q{n}:` instead of `Q:`.
    pub fn number(mut self, number: usize) -> Self {
        self.number = Some(number);
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Card lines for a column `width` cells wide, including a trailing blank line.
    pub fn lines(&self, width: u16) -> Vec<Line<'static>> {
        let t = theme();
        let q = self.question;
        let gutter = if self.selected { "▌ " } else { "  " };
        let gutter_style = t.border_focused_style();
        let text_width = (width as usize).saturating_sub(gutter.len() + 4).max(10);

        let mut lines = Vec::new();
        let mut push = |spans: Vec<Span<'static>>| {
            let mut row = vec![Span::styled(gutter, gutter_style)];
            row.extend(spans);
            lines.push(Line::from(row));
        };

        let label = match self.number {
            Some(n) => format!("Q{}: ", n),
            None => "Q: ".to_string(),
        };
        let indent = " ".repeat(label.chars().count());
        for (i, chunk) in wrap_text(&q.question_text, text_width.saturating_sub(label.len()))
            .into_iter()
            .enumerate()
        {
            let prefix = if i == 0 { label.clone() } else { indent.clone() };
            push(vec![
                Span::styled(prefix, t.success_style().add_modifier(Modifier::BOLD)),
                Span::styled(chunk, t.text_style().add_modifier(Modifier::BOLD)),
            ]);
        }

        for (idx, option) in q.options.iter().enumerate() {
            let correct = idx == q.correct_answer_index;
            let (mark, style) = if correct {
                ("✓ ", t.success_style().add_modifier(Modifier::BOLD))
            } else {
                ("  ", t.text_style())
            };
            let head = format!("  {}{}) ", mark, option_letter(idx));
            let pad = " ".repeat(head.chars().count());
            for (i, chunk) in wrap_text(option, text_width.saturating_sub(head.chars().count()))
                .into_iter()
                .enumerate()
            {
                let prefix = if i == 0 { head.clone() } else { pad.clone() };
                push(vec![Span::styled(prefix, style), Span::styled(chunk, style)]);
            }
        }

        if let Some(explanation) = q.explanation.as_deref().filter(|e| !e.trim().is_empty()) {
            push(vec![Span::styled(
                "  Explanation:",
                t.success_style().add_modifier(Modifier::BOLD),
            )]);
            for chunk in wrap_text(explanation, text_width.saturating_sub(4)) {
                push(vec![Span::styled(format!("    {}", chunk), t.muted_style())]);
            }
        }

        let categories = if q.categories.is_empty() {
            "N/A".to_string()
        } else {
            q.categories.join(", ")
        };
        let mut meta = vec![
            Span::styled("  Difficulty: ", t.muted_style()),
            Span::styled(q.difficulty.label(), t.difficulty_style(q.difficulty)),
            Span::styled("   Categories: ", t.muted_style()),
            Span::styled(categories, t.accent_style()),
        ];
        if let Some(source) = q.source {
            meta.push(Span::styled("   Source: ", t.muted_style()));
            meta.push(Span::styled(source.to_string(), t.muted_style()));
        }
        push(meta);

        lines.push(Line::default());
        lines
    }
}

/// Render `questions` as a vertically scrolling stack of numbered cards.
///
/// `scroll` is the first visible line; it is adjusted so the selected card
/// stays in view and never scrolls past the end.
pub fn render_cards(
    frame: &mut Frame,
    area: Rect,
    questions: &[Question],
    selected: Option<usize>,
    scroll: &mut usize,
) {
    let mut lines = Vec::new();
    let mut selected_rows = None;
    for (i, question) in questions.iter().enumerate() {
        let start = lines.len();
        lines.extend(
            QuestionCard::new(question)
                .number(i + 1)
                .selected(selected == Some(i))
                .lines(area.width),
        );
        if selected == Some(i) {
            selected_rows = Some((start, lines.len()));
        }
    }

    let height = area.height as usize;
    let mut offset = (*scroll).min(lines.len().saturating_sub(height));
    if let Some((start, end)) = selected_rows {
        if start < offset {
            offset = start;
        } else if end > offset + height {
            offset = end.saturating_sub(height).min(start);
        }
    }
    *scroll = offset;

    frame.render_widget(Paragraph::new(lines).scroll((offset as u16, 0)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Difficulty;

    fn question() -> Question {
        Question {
            id: "q1".to_string(),
            question_text: "What is the capital of France?".to_string(),
            options: vec!["London".into(), "Berlin".into(), "Paris".into(), "Rome".into()],
            correct_answer_index: 2,
            explanation: Some("Paris has been the capital since 987.".to_string()),
            difficulty: Difficulty::Easy,
            categories: vec![],
            created_at: None,
            source: None,
            generated_from_doc_id: None,
        }
    }

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_card_marks_correct_option() {
        let q = question();
        let lines = QuestionCard::new(&q).number(3).lines(80);
        let text: Vec<String> = lines.iter().map(plain).collect();

        assert!(text[0].contains("Q3: What is the capital of France?"));
        assert!(text.iter().any(|l| l.contains("✓ C) Paris")));
        assert!(text.iter().any(|l| l.contains("   A) London")));
        assert!(text.iter().any(|l| l.contains("Categories: N/A")));
        assert!(text.iter().any(|l| l.contains("Explanation:")));
        assert_eq!(text.last().map(String::as_str), Some(""));
    }

    #[test]
    fn test_selected_card_has_gutter() {
        let q = question();
        let lines = QuestionCard::new(&q).selected(true).lines(80);
        assert!(plain(&lines[0]).starts_with("▌ "));
    }

    #[test]
    fn test_narrow_width_wraps_question() {
        let q = question();
        let wide = QuestionCard::new(&q).lines(120).len();
        let narrow = QuestionCard::new(&q).lines(24).len();
        assert!(narrow > wide);
    }

    #[test]
    fn test_render_cards_keeps_selection_visible() {
        use ratatui::backend::TestBackend;
        use ratatui::Terminal;

        let questions: Vec<Question> = (0..5).map(|_| question()).collect();
        let mut terminal = Terminal::new(TestBackend::new(60, 8)).unwrap();
        let mut scroll = 0;
        terminal
            .draw(|frame| render_cards(frame, frame.area(), &questions, Some(4), &mut scroll))
            .unwrap();
        assert!(scroll > 0);

        terminal
            .draw(|frame| render_cards(frame, frame.area(), &questions, Some(0), &mut scroll))
            .unwrap();
        assert_eq!(scroll, 0);
    }
}

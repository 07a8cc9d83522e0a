//! Text input widget for rendering [`TextInput`] and [`NumberField`] values.
//!
//! Handles focus styling, placeholder text, the required-field marker and
//! cursor placement.

use crate::styles::theme;
use crate::utils::form::NumberField;
use crate::utils::text_input::TextInput;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// A bordered single-line input.
///
/// # Example
/// ```
/// use mcqdesk::utils::text_input::TextInput;
/// use mcqdesk::widgets::TextInputWidget;
///
/// let input = TextInput::with_text("Photosynthesis");
/// let widget = TextInputWidget::new(&input)
///     .title("Topic")
///     .required(true)
///     .focused(true);
/// // frame.render_text_input_widget(widget, area);
/// ```
pub struct TextInputWidget<'a> {
    text: &'a str,
    cursor: usize,
    title: Option<&'a str>,
    placeholder: Option<&'a str>,
    focused: bool,
    disabled: bool,
    required: bool,
}

impl<'a> TextInputWidget<'a> {
    pub fn new(input: &'a TextInput) -> Self {
        Self::from_parts(input.text(), input.cursor())
    }

    /// A numeric field renders like a text input with the cursor at the end.
    pub fn number(field: &'a NumberField) -> Self {
        Self::from_parts(field.text(), field.text().chars().count())
    }

    fn from_parts(text: &'a str, cursor: usize) -> Self {
        Self {
            text,
            cursor,
            title: None,
            placeholder: None,
            focused: false,
            disabled: false,
            required: false,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Mark the field as required (adds `*` to the title).
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    fn display_text(&self) -> &str {
        if self.text.is_empty() {
            self.placeholder.unwrap_or("")
        } else {
            self.text
        }
    }

    fn text_style(&self) -> Style {
        let t = theme();
        if self.disabled || self.text.is_empty() {
            t.disabled_style()
        } else {
            t.text_style()
        }
    }

    fn border_style(&self) -> Style {
        let t = theme();
        if self.disabled {
            t.disabled_style()
        } else if self.focused {
            t.border_focused_style()
        } else {
            t.border_style()
        }
    }

    fn create_block(&self) -> Block<'a> {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.border_style());

        if let Some(title) = self.title {
            let marker = if self.required { " *" } else { "" };
            block = block.title(format!(" {}{} ", title, marker));
        }
        block
    }

    /// Horizontal scroll so the cursor stays visible in a narrow field.
    fn scroll_offset(&self, inner_width: u16) -> u16 {
        let width = inner_width.saturating_sub(1) as usize;
        self.cursor.saturating_sub(width) as u16
    }
}

impl Widget for TextInputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = self.create_block();
        let inner = block.inner(area);
        let offset = if self.text.is_empty() {
            0
        } else {
            self.scroll_offset(inner.width)
        };

        Paragraph::new(self.display_text().to_string())
            .block(block)
            .style(self.text_style())
            .scroll((0, offset))
            .render(area, buf);
    }
}

/// Extension trait for Frame to render [`TextInputWidget`] with cursor support.
pub trait TextInputWidgetExt {
    fn render_text_input_widget(&mut self, widget: TextInputWidget, area: Rect);
}

impl TextInputWidgetExt for Frame<'_> {
    fn render_text_input_widget(&mut self, widget: TextInputWidget, area: Rect) {
        let show_cursor = widget.focused && !widget.disabled;
        let cursor = widget.cursor.min(widget.text.chars().count());
        let inner = widget.create_block().inner(area);
        let offset = widget.scroll_offset(inner.width) as usize;

        self.render_widget(widget, area);

        if show_cursor && inner.width > 0 && inner.height > 0 {
            let x = inner.x + (cursor - offset).min(inner.width as usize - 1) as u16;
            self.set_cursor_position((x, inner.y));
        }
    }
}

//! Form field helpers shared by the question, quiz and upload forms.

use crossterm::event::KeyCode;

/// Parse a count typed by the user and clamp it into `[min, max]`.
///
/// Unparsable or zero input counts as 1 before clamping, so a cleared field
/// never blocks submission.
pub fn clamp_count(raw: &str, min: u32, max: u32) -> u32 {
    let parsed = raw
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|n| *n != 0)
        .unwrap_or(1);
    parsed.clamp(i64::from(min), i64::from(max)) as u32
}

/// Split comma-separated categories, trimming entries and dropping empty ones.
pub fn parse_categories(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

/// Step a focus or selection index, wrapping at both ends.
pub fn cycle_index(current: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (current + 1) % len
    } else {
        (current + len - 1) % len
    }
}

/// A numeric input bounded to an inclusive range.
///
/// The value is always in range. The raw text is kept while the user types
/// and normalized to the value with [`NumberField::normalize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberField {
    text: String,
    value: u32,
    min: u32,
    max: u32,
}

impl NumberField {
    pub fn new(default: u32, min: u32, max: u32) -> Self {
        let value = default.clamp(min, max);
        Self {
            text: value.to_string(),
            value,
            min,
            max,
        }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the raw text and recompute the clamped value.
    pub fn set_text(&mut self, raw: &str) {
        self.text = raw.chars().filter(char::is_ascii_digit).take(4).collect();
        self.value = clamp_count(&self.text, self.min, self.max);
    }

    /// Show the clamped value in place of whatever was typed.
    pub fn normalize(&mut self) {
        self.text = self.value.to_string();
    }

    pub fn increment(&mut self) {
        self.value = (self.value + 1).min(self.max);
        self.normalize();
    }

    pub fn decrement(&mut self) {
        self.value = self.value.saturating_sub(1).max(self.min);
        self.normalize();
    }

    /// Handle digits, backspace and Up/Down stepping. Returns true if consumed.
    pub fn handle_key(&mut self, key_code: KeyCode) -> bool {
        match key_code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let mut raw = self.text.clone();
                raw.push(c);
                self.set_text(&raw);
                true
            }
            KeyCode::Backspace => {
                let mut raw = self.text.clone();
                raw.pop();
                self.set_text(&raw);
                true
            }
            KeyCode::Up => {
                self.increment();
                true
            }
            KeyCode::Down => {
                self.decrement();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_count_bounds() {
        assert_eq!(clamp_count("3", 1, 50), 3);
        assert_eq!(clamp_count("75", 1, 50), 50);
        assert_eq!(clamp_count("21", 1, 20), 20);
        assert_eq!(clamp_count("9", 1, 5), 5);
        assert_eq!(clamp_count("-4", 1, 5), 1);
    }

    #[test]
    fn test_clamp_count_invalid_becomes_one() {
        assert_eq!(clamp_count("", 1, 50), 1);
        assert_eq!(clamp_count("abc", 1, 20), 1);
        assert_eq!(clamp_count("0", 1, 5), 1);
    }

    #[test]
    fn test_parse_categories() {
        assert_eq!(
            parse_categories(" Science, History ,, ,Geo "),
            vec!["Science", "History", "Geo"]
        );
        assert!(parse_categories("  ").is_empty());
    }

    #[test]
    fn test_cycle_index_wraps() {
        assert_eq!(cycle_index(2, 3, true), 0);
        assert_eq!(cycle_index(0, 3, false), 2);
        assert_eq!(cycle_index(0, 0, true), 0);
    }

    #[test]
    fn test_number_field_typing_clamps_value() {
        let mut field = NumberField::new(3, 1, 50);
        field.handle_key(KeyCode::Backspace);
        assert_eq!(field.text(), "");
        assert_eq!(field.value(), 1);

        field.handle_key(KeyCode::Char('9'));
        field.handle_key(KeyCode::Char('9'));
        assert_eq!(field.value(), 50);

        field.normalize();
        assert_eq!(field.text(), "50");
    }

    #[test]
    fn test_number_field_stepping_stays_in_range() {
        let mut field = NumberField::new(2, 1, 5);
        for _ in 0..10 {
            field.increment();
        }
        assert_eq!(field.value(), 5);
        for _ in 0..10 {
            field.decrement();
        }
        assert_eq!(field.value(), 1);
        assert!(!field.handle_key(KeyCode::Char('x')));
    }
}

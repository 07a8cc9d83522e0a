//! State that outlives any single view.

use super::Notice;

#[derive(Debug, Clone, Default)]
pub struct GlobalState {
    /// Notice dialog over the current view, if any.
    pub dialog: Option<Notice>,

    /// Frames drawn so far; drives spinners.
    pub tick: u64,

    pub should_quit: bool,
}

impl GlobalState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_dialog(&self) -> bool {
        self.dialog.is_some()
    }

    pub fn show_message(&mut self, title: String, content: String) {
        self.dialog = Some(Notice { title, content });
    }

    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    pub fn advance_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialog_lifecycle() {
        let mut state = GlobalState::new();
        assert!(!state.has_dialog());
        state.show_message("PDF Export".into(), "Not yet".into());
        assert!(state.has_dialog());
        state.close_dialog();
        assert!(!state.has_dialog());
    }
}

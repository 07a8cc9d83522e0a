use crate::widgets::{Dialog, DialogVariant};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;

/// Answer to a yes/no prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Yes,
    No,
    /// Key ignored, keep asking
    Pending,
}

/// Yes/No confirmation overlay
pub struct ConfirmDialog;

impl ConfirmDialog {
    pub const FOOTER: &'static str = "Confirm: y/Enter | Cancel: n/Esc";

    pub fn render(frame: &mut Frame, area: Rect, title: &str, message: &str) {
        let dialog = Dialog::new(title, message)
            .variant(DialogVariant::Warning)
            .footer(Self::FOOTER);
        frame.render_widget(dialog, area);
    }

    pub fn handle_key(key: KeyEvent) -> Confirmation {
        match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => Confirmation::Yes,
            KeyCode::Char('n' | 'N') | KeyCode::Esc => Confirmation::No,
            _ => Confirmation::Pending,
        }
    }
}

use crate::styles::theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Animated "Loading..." indicator
pub struct LoadingSpinner;

impl LoadingSpinner {
    pub fn frame(tick: u64) -> &'static str {
        FRAMES[(tick % FRAMES.len() as u64) as usize]
    }

    /// Render centered in `area` with an optional label (defaults to "Loading...").
    pub fn render(frame: &mut Frame, area: Rect, tick: u64, label: Option<&str>) {
        let t = theme();
        let line = Line::from(vec![
            Span::styled(format!("{} ", Self::frame(tick)), t.success_style()),
            Span::styled(label.unwrap_or("Loading...").to_string(), t.muted_style()),
        ]);
        let y = area.y + area.height.saturating_sub(1) / 2;
        let row = Rect::new(area.x, y, area.width, area.height.min(1));
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), row);
    }
}

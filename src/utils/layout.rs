//! Layout helpers shared by screens and overlays.

use ratatui::layout::{Constraint, Layout, Rect};

/// A `width` x `height` rectangle centered in `area`, clipped to it.
pub fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// A popup covering the given percentages of `area`, centered.
pub fn center_popup(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = (u32::from(area.width) * u32::from(percent_x.min(100)) / 100) as u16;
    let height = (u32::from(area.height) * u32::from(percent_y.min(100)) / 100) as u16;
    center_rect(area, width, height)
}

/// Split the screen into header, content and footer rows.
pub fn create_standard_layout(area: Rect, header_height: u16, footer_height: u16) -> [Rect; 3] {
    Layout::vertical([
        Constraint::Length(header_height),
        Constraint::Min(0),
        Constraint::Length(footer_height),
    ])
    .areas(area)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_rect() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(center_rect(area, 20, 10), Rect::new(40, 15, 20, 10));
        assert_eq!(center_rect(area, 200, 80), area);
    }

    #[test]
    fn test_center_popup() {
        let area = Rect::new(10, 5, 100, 40);
        let popup = center_popup(area, 50, 50);
        assert_eq!(popup, Rect::new(35, 15, 50, 20));
    }

    #[test]
    fn test_standard_layout() {
        let [header, content, footer] = create_standard_layout(Rect::new(0, 0, 80, 24), 3, 2);
        assert_eq!(header.height, 3);
        assert_eq!(footer.height, 2);
        assert_eq!(content.height, 19);
    }
}

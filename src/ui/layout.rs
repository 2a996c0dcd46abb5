use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen split used while a session is running.
pub struct PlayLayout {
    pub header: Rect,
    pub phrase: Rect,
    pub pizza: Rect,
    pub footer: Rect,
}

impl PlayLayout {
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(6),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            header: vertical[0],
            phrase: vertical[1],
            pizza: pizza_square(vertical[2]),
            footer: vertical[3],
        }
    }
}

/// Largest centered rect that looks square on a terminal whose cells are
/// about twice as tall as they are wide.
pub fn pizza_square(area: Rect) -> Rect {
    let height = area.height.min(area.width / 2);
    let width = height.saturating_mul(2);
    let left = area.x + (area.width.saturating_sub(width)) / 2;
    let top = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(left, top, width, height)
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_POPUP_WIDTH: u16 = 48;
    const MIN_POPUP_HEIGHT: u16 = 14;

    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(MIN_POPUP_WIDTH).min(area.width);
    let target_h = requested_h.max(MIN_POPUP_HEIGHT).min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}

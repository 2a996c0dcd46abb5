use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use typing_feast::session::result::SessionResult;

use crate::ui::theme::Theme;

pub struct ResultPanel<'a> {
    pub result: &'a SessionResult,
    pub theme: &'a Theme,
}

impl<'a> ResultPanel<'a> {
    pub fn new(result: &'a SessionResult, theme: &'a Theme) -> Self {
        Self { result, theme }
    }
}

impl Widget for ResultPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Risultato ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        let title = Paragraph::new(Line::from(Span::styled(
            format!("Fine! Modo {}", self.result.difficulty.profile().label),
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        title.render(layout[0], buf);

        let miss_color = if self.result.miss_count == 0 {
            colors.success()
        } else {
            colors.error()
        };
        let rows = [
            (
                "  Punteggio:    ",
                format!("{} \u{20ac}", self.result.score),
                colors.accent(),
            ),
            (
                "  Corrette:     ",
                self.result.success_count.to_string(),
                colors.success(),
            ),
            (
                "  Miss:         ",
                self.result.miss_count.to_string(),
                miss_color,
            ),
            (
                "  Velocità:     ",
                format!("{} caratteri/sec", self.result.speed_display()),
                colors.fg(),
            ),
        ];
        for ((name, value, color), &row) in rows.into_iter().zip(&layout[1..5]) {
            Paragraph::new(Line::from(vec![
                Span::styled(name, Style::default().fg(colors.fg())),
                Span::styled(
                    value,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ]))
            .render(row, buf);
        }

        Paragraph::new(Line::from(Span::styled(
            "  [Enter/t] Torna al titolo  [q] Esci",
            Style::default().fg(colors.accent()),
        )))
        .render(layout[6], buf);
    }
}

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use typing_feast::engine::DifficultyKey;

use crate::ui::theme::Theme;

pub struct MenuItem {
    pub key: String,
    pub difficulty: DifficultyKey,
    pub description: String,
}

/// Title screen difficulty picker.
pub struct Menu<'a> {
    pub items: Vec<MenuItem>,
    pub selected: usize,
    pub theme: &'a Theme,
}

impl<'a> Menu<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        let items = DifficultyKey::ALL
            .iter()
            .enumerate()
            .map(|(i, &difficulty)| {
                let profile = difficulty.profile();
                let (min, max) = profile.cost_range;
                MenuItem {
                    key: (i + 1).to_string(),
                    difficulty,
                    description: format!(
                        "{}s per phrase, +{}s per success, cost {min}-{max}",
                        profile.phrase_time_limit_secs, profile.time_bonus_on_success,
                    ),
                }
            })
            .collect();
        Self {
            items,
            selected: 0,
            theme,
        }
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % self.items.len();
    }

    pub fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = self.items.len() - 1;
        }
    }

    pub fn select(&mut self, difficulty: DifficultyKey) {
        if let Some(i) = self.items.iter().position(|item| item.difficulty == difficulty) {
            self.selected = i;
        }
    }

    pub fn selected_difficulty(&self) -> DifficultyKey {
        self.items
            .get(self.selected)
            .map_or(DifficultyKey::Easy, |item| item.difficulty)
    }
}

impl Widget for &Menu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "typing-feast",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Type the Italian phrase before the pizza is gone",
                Style::default().fg(colors.fg()),
            )),
        ];

        let title = Paragraph::new(title_lines).alignment(Alignment::Center);
        title.render(layout[0], buf);

        let menu_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.items
                    .iter()
                    .map(|_| Constraint::Length(3))
                    .collect::<Vec<_>>(),
            )
            .split(layout[2]);

        for (i, item) in self.items.iter().enumerate() {
            let is_selected = i == self.selected;
            let indicator = if is_selected { ">" } else { " " };

            let label_text = format!(
                " {indicator} [{key}] {label}",
                key = item.key,
                label = item.difficulty.profile().label
            );
            let desc_text = format!("     {}", item.description);

            let label_style = if is_selected {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            let lines = vec![
                Line::from(Span::styled(label_text, label_style)),
                Line::from(Span::styled(
                    desc_text,
                    Style::default().fg(colors.text_pending()),
                )),
            ];

            if let Some(&row) = menu_layout.get(i) {
                Paragraph::new(lines).render(row, buf);
            }
        }
    }
}

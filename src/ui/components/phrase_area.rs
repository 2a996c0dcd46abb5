use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use typing_feast::session::controller::RoundView;

use crate::ui::theme::Theme;

/// The phrase being typed with its translation underneath.
pub struct PhraseArea<'a> {
    round: &'a RoundView,
    theme: &'a Theme,
}

impl<'a> PhraseArea<'a> {
    pub fn new(round: &'a RoundView, theme: &'a Theme) -> Self {
        Self { round, theme }
    }
}

/// Splits `text` into the typed prefix, the character under the cursor and
/// whatever is still pending after it.
fn split_at_cursor(text: &str, typed_len: usize) -> (String, Option<char>, String) {
    let mut chars = text.chars();
    let typed: String = chars.by_ref().take(typed_len).collect();
    let cursor = chars.next();
    (typed, cursor, chars.collect())
}

impl Widget for PhraseArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let (typed, cursor, pending) = split_at_cursor(&self.round.text, self.round.typed_len);

        let mut phrase = vec![Span::styled(
            typed,
            Style::default()
                .fg(colors.text_correct())
                .add_modifier(Modifier::BOLD),
        )];
        if let Some(ch) = cursor {
            // Spaces are invisible on a plain cursor, show a middle dot instead.
            let shown = if ch == ' ' { '\u{00b7}' } else { ch };
            phrase.push(Span::styled(
                shown.to_string(),
                Style::default()
                    .fg(colors.text_cursor_fg())
                    .bg(colors.text_cursor_bg()),
            ));
        }
        phrase.push(Span::styled(
            pending,
            Style::default().fg(colors.text_pending()),
        ));

        let lines = vec![
            Line::from(""),
            Line::from(phrase),
            Line::from(Span::styled(
                format!("({})", self.round.translation),
                Style::default().fg(colors.fg()),
            )),
        ];

        let block = Block::bordered()
            .title(format!(" Costo {} ", self.round.cost))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));

        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use typing_feast::session::controller::SessionState;

use crate::ui::theme::Theme;

/// One-line header shown while playing.
pub struct StatusBar<'a> {
    state: &'a SessionState,
    label: &'a str,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a SessionState, label: &'a str, theme: &'a Theme) -> Self {
        Self {
            state,
            label,
            theme,
        }
    }

    fn fields(&self) -> [(&'static str, String); 5] {
        [
            ("Tempo Totale", format!("{}s", self.state.overall_time_left_secs)),
            ("Punteggio", format!("{} \u{20ac}", self.state.score)),
            ("Corrette", self.state.success_count.to_string()),
            ("Miss", self.state.miss_count.to_string()),
            ("Modo", self.label.to_string()),
        ]
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let base = Style::default().fg(colors.header_fg()).bg(colors.header_bg());

        let mut spans = vec![Span::styled(
            " typing-feast ",
            base.add_modifier(Modifier::BOLD),
        )];
        for (name, value) in self.fields() {
            spans.push(Span::styled(format!("| {name}: "), base));
            spans.push(Span::styled(
                format!("{value} "),
                base.fg(colors.accent()).add_modifier(Modifier::BOLD),
            ));
        }

        Paragraph::new(Line::from(spans))
            .style(base)
            .render(area, buf);
    }
}

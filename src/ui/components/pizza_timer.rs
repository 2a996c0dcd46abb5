use std::f64::consts::TAU;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use crate::ui::theme::Theme;

const CRUST_RADIUS: f64 = 0.82;

/// Round countdown drawn as a pizza: the slice still on the plate sweeps
/// clockwise from 12 o'clock and covers `fraction` of the disc.
pub struct PizzaTimer<'a> {
    fraction: f64,
    theme: &'a Theme,
}

impl<'a> PizzaTimer<'a> {
    pub fn new(fraction: f64, theme: &'a Theme) -> Self {
        Self {
            fraction: fraction.clamp(0.0, 1.0),
            theme,
        }
    }
}

/// `dx`/`dy` are offsets from the centre in unit-radius coordinates with `dy`
/// growing downwards.
fn slice_visible(dx: f64, dy: f64, fraction: f64) -> bool {
    if fraction >= 1.0 {
        return true;
    }
    if fraction <= 0.0 {
        return false;
    }
    let angle = dx.atan2(-dy).rem_euclid(TAU);
    angle < fraction * TAU
}

impl Widget for PizzaTimer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let colors = &self.theme.colors;
        let half_w = f64::from(area.width) / 2.0;
        let half_h = f64::from(area.height) / 2.0;

        for row in 0..area.height {
            for col in 0..area.width {
                let dx = (f64::from(col) + 0.5 - half_w) / half_w;
                let dy = (f64::from(row) + 0.5 - half_h) / half_h;
                let radius = dx.hypot(dy);
                if radius > 1.0 {
                    continue;
                }

                let (symbol, style) = if slice_visible(dx, dy, self.fraction) {
                    let fg = if radius > CRUST_RADIUS {
                        colors.pizza_crust()
                    } else {
                        colors.pizza_fill()
                    };
                    ("\u{2588}", Style::default().fg(fg).bg(colors.bg()))
                } else {
                    (
                        "\u{00b7}",
                        Style::default().fg(colors.pizza_empty()).bg(colors.bg()),
                    )
                };
                buf[(area.x + col, area.y + row)]
                    .set_symbol(symbol)
                    .set_style(style);
            }
        }
    }
}

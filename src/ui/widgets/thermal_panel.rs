//! Temperature and fan panel.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::core::state::DashState;
use crate::ui::layout::clamp_width;
use crate::ui::widgets::{meter, panel_block, truncate};

pub struct ThermalPanel<'a> {
    state: &'a DashState,
}

impl<'a> ThermalPanel<'a> {
    pub fn new(state: &'a DashState) -> Self {
        Self { state }
    }
}

impl Widget for ThermalPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = &self.state.theme;
        let block = panel_block(" TEMPS / FANS ", theme.colors.thermal, theme);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width < 10 || inner.height < 2 {
            return;
        }

        let x = inner.x + 2;
        let max_width = inner.width.saturating_sub(2);
        let bottom = inner.y + inner.height;
        let mut y = inner.y + 1;

        if self.state.temps.is_empty() {
            buf.set_span(x, y, &Span::styled("No sensors", theme.dim()), max_width);
        }

        let bar_width = clamp_width(area.width, 28, 6, 20);
        let fan_reserve = if self.state.fans.is_empty() {
            0
        } else {
            self.state.fans.len() as u16 + 2
        };
        for sensor in &self.state.temps {
            if y + fan_reserve >= bottom {
                break;
            }
            // Anything under 40°C renders in the ok color.
            let severity = if sensor.degrees > 40.0 { sensor.degrees } else { 0.0 };
            let mut spans = vec![Span::styled(
                format!("{:<12} ", truncate(&sensor.label, 12)),
                theme.text(),
            )];
            spans.extend(meter(sensor.degrees, bar_width, theme));
            spans.push(Span::styled(
                format!(" {:3.0}°C", sensor.degrees),
                theme.severity_bold(severity),
            ));
            if let Some(high) = sensor.high {
                spans.push(Span::styled(format!(" H:{high:.0}"), theme.dim()));
            } else if let Some(critical) = sensor.critical {
                spans.push(Span::styled(format!(" C:{critical:.0}"), theme.dim()));
            }
            buf.set_line(x, y, &Line::from(spans), max_width);
            y += 1;
        }

        if !self.state.fans.is_empty() {
            y += 1;
            if y < bottom {
                buf.set_span(x, y, &Span::styled("Fans", theme.dim_bold()), max_width);
                y += 1;
            }
            for fan in &self.state.fans {
                if y >= bottom {
                    break;
                }
                let rpm_pct = if fan.rpm > 3000 {
                    100.0
                } else if fan.rpm > 1500 {
                    60.0
                } else {
                    0.0
                };
                let line = Line::from(vec![
                    Span::styled(format!("{:<12} ", truncate(&fan.label, 12)), theme.text()),
                    Span::styled(format!("{} RPM", fan.rpm), theme.severity_bold(rpm_pct)),
                ]);
                buf.set_line(x, y, &line, max_width);
                y += 1;
            }
        }
    }
}

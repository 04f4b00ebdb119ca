//! Memory panel: usage meter, totals, caches, swap, and the battery line
//! when one is present.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::core::state::DashState;
use crate::ui::layout::clamp_width;
use crate::ui::widgets::{meter, panel_block};

const KB_PER_GB: f64 = 1_048_576.0;

pub struct MemoryPanel<'a> {
    state: &'a DashState,
}

impl<'a> MemoryPanel<'a> {
    pub fn new(state: &'a DashState) -> Self {
        Self { state }
    }
}

impl Widget for MemoryPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = &self.state.theme;
        let block = panel_block(" MEMORY ", theme.colors.memory, theme);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width < 10 || inner.height < 2 {
            return;
        }

        let memory = &self.state.memory;
        let x = inner.x + 2;
        let max_width = inner.width.saturating_sub(2);
        let bottom = inner.y + inner.height;
        let mut y = inner.y + 1;

        let bar_width = clamp_width(area.width, 12, 8, 35);
        let used_pct = memory.used_percent();
        buf.set_line(x, y, &Line::from(meter(used_pct, bar_width, theme)), max_width);
        y += 2;

        let mut line = |y: u16, spans: Vec<Span<'static>>| {
            if y < bottom {
                buf.set_line(x, y, &Line::from(spans), max_width);
            }
        };

        line(
            y,
            vec![
                Span::styled(format!("{:.1}", memory.used_kb() as f64 / KB_PER_GB), theme.bold()),
                Span::styled(" GB used of ", theme.dim()),
                Span::styled(format!("{:.1}", memory.total_kb as f64 / KB_PER_GB), theme.bold()),
                Span::styled(" GB", theme.dim()),
            ],
        );
        y += 1;
        line(
            y,
            vec![
                Span::styled(
                    format!("{:.1}", memory.available_kb as f64 / KB_PER_GB),
                    theme.severity(0.0),
                ),
                Span::styled(" GB available", theme.dim()),
            ],
        );
        y += 2;
        line(
            y,
            vec![
                Span::styled("Cached  ", theme.dim()),
                Span::styled(format!("{:.1}", memory.cached_kb as f64 / KB_PER_GB), theme.bold()),
                Span::styled(" GB", theme.dim()),
            ],
        );
        y += 1;
        line(
            y,
            vec![
                Span::styled("Buffers ", theme.dim()),
                Span::styled(format!("{:.1}", memory.buffers_kb as f64 / KB_PER_GB), theme.bold()),
                Span::styled(" GB", theme.dim()),
            ],
        );
        y += 1;

        if memory.swap_total_kb > 0 {
            y += 1;
            line(
                y,
                vec![
                    Span::styled("Swap    ", theme.dim()),
                    Span::styled(
                        format!(
                            "{:.1} / {:.1} GB",
                            memory.swap_used_kb() as f64 / KB_PER_GB,
                            memory.swap_total_kb as f64 / KB_PER_GB
                        ),
                        theme.text(),
                    ),
                ],
            );
            y += 1;
        }

        if let Some(battery) = &self.state.battery {
            y += 1;
            let capacity = battery.capacity_percent;
            let color = if capacity > 50 {
                theme.colors.ok
            } else if capacity > 20 {
                theme.colors.warn
            } else {
                theme.colors.crit
            };
            line(
                y,
                vec![
                    Span::styled("Battery ", theme.dim()),
                    Span::styled(
                        format!("{capacity}%"),
                        ratatui::style::Style::default()
                            .fg(color)
                            .add_modifier(ratatui::style::Modifier::BOLD),
                    ),
                    Span::styled(format!(" {}", battery.status), theme.dim()),
                ],
            );
        }
    }
}

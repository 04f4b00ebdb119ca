//! Process table panel.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::core::state::DashState;
use crate::ui::widgets::{panel_block, truncate};

/// Upper bound on rendered rows regardless of panel height.
const MAX_VISIBLE_ROWS: usize = 20;

pub struct ProcessPanel<'a> {
    state: &'a DashState,
}

impl<'a> ProcessPanel<'a> {
    pub fn new(state: &'a DashState) -> Self {
        Self { state }
    }
}

impl Widget for ProcessPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = &self.state.theme;
        let block = panel_block(" PROCESSES ", theme.colors.processes, theme);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width < 12 || inner.height < 3 {
            return;
        }

        let x = inner.x + 2;
        let max_width = inner.width.saturating_sub(2);
        let bottom = inner.y + inner.height;
        let mut y = inner.y;

        buf.set_span(
            x,
            y,
            &Span::styled(
                format!("{:<7} {:<16} {:>7} {:>7}", "PID", "PROCESS", "CPU%", "MEM%"),
                theme.dim_bold(),
            ),
            max_width,
        );
        y += 1;

        let visible = (inner.height as usize)
            .saturating_sub(3)
            .min(MAX_VISIBLE_ROWS);
        for row in self.state.processes.ranked(self.state.sort).iter().take(visible) {
            if y + 1 >= bottom {
                break;
            }
            let cpu_style = theme.severity(row.cpu_percent);
            // Memory shares run small, so the ramp is steepened for them.
            let mem_style = theme.severity(row.mem_percent * 2.0);
            let mini = ((row.cpu_percent / 10.0) as usize).min(8);
            let line = Line::from(vec![
                Span::styled(format!("{:<7}", row.pid), theme.dim()),
                Span::styled(format!(" {:<16}", truncate(&row.name, 16)), theme.text()),
                Span::styled(format!(" {:6.1}%", row.cpu_percent), cpu_style),
                Span::styled(format!(" {:6.1}%", row.mem_percent), mem_style),
                Span::raw(" "),
                Span::styled("█".repeat(mini), cpu_style),
            ]);
            buf.set_line(x, y, &line, max_width);
            y += 1;
        }

        buf.set_span(
            x,
            bottom - 1,
            &Span::styled(
                format!("{} processes", self.state.processes.len()),
                theme.dim(),
            ),
            max_width,
        );
    }
}

//! Disk I/O panel: read/write throughput with history sparklines.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::core::state::DashState;
use crate::format;
use crate::metrics::history::HISTORY_LEN;
use crate::ui::layout::clamp_width;
use crate::ui::widgets::{panel_block, sparkline};

pub struct DiskPanel<'a> {
    state: &'a DashState,
}

impl<'a> DiskPanel<'a> {
    pub fn new(state: &'a DashState) -> Self {
        Self { state }
    }
}

impl Widget for DiskPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = &self.state.theme;
        let block = panel_block(" DISK I/O ", theme.colors.disk, theme);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width < 12 || inner.height < 2 {
            return;
        }

        let x = inner.x + 2;
        let max_width = inner.width.saturating_sub(2);
        let bottom = inner.y + inner.height;
        let mut y = inner.y + 1;

        let write = Line::from(vec![
            Span::styled("▲ Write ", theme.severity(0.0)),
            Span::styled(format::rate(self.state.disk.write_per_sec), theme.text()),
        ]);
        buf.set_line(x, y, &write, max_width);
        y += 1;

        if y < bottom {
            let read = Line::from(vec![
                Span::styled("▼ Read  ", theme.border(theme.colors.network)),
                Span::styled(format::rate(self.state.disk.read_per_sec), theme.text()),
            ]);
            buf.set_line(x, y, &read, max_width);
            y += 2;
        }

        let spark_width = clamp_width(area.width, 12, 8, HISTORY_LEN as u16);
        if y < bottom {
            let mut spans = vec![Span::styled("W ", theme.dim())];
            spans.extend(sparkline(
                &self.state.disk_write_history.window(spark_width as usize),
                spark_width,
                theme,
            ));
            buf.set_line(x, y, &Line::from(spans), max_width);
            y += 1;
        }
        if y < bottom {
            let mut spans = vec![Span::styled("R ", theme.dim())];
            spans.extend(sparkline(
                &self.state.disk_read_history.window(spark_width as usize),
                spark_width,
                theme,
            ));
            buf.set_line(x, y, &Line::from(spans), max_width);
        }
    }
}

//! CPU panel: per-core meters, the aggregate meter, the history
//! sparkline, and the load line.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::core::state::DashState;
use crate::metrics::history::HISTORY_LEN;
use crate::ui::layout::clamp_width;
use crate::ui::widgets::{meter, panel_block, sparkline};

pub struct CpuPanel<'a> {
    state: &'a DashState,
}

impl<'a> CpuPanel<'a> {
    pub fn new(state: &'a DashState) -> Self {
        Self { state }
    }
}

impl Widget for CpuPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = &self.state.theme;
        let block = panel_block(" CPU ", theme.colors.cpu, theme);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width < 10 || inner.height < 2 {
            return;
        }

        let bar_width = clamp_width(area.width / 2, 12, 8, 30);
        let x = inner.x + 2;
        let max_width = inner.width.saturating_sub(2);
        let mut y = inner.y + 1;
        let bottom = inner.y + inner.height;

        // Two core meters per row; the bottom rows are reserved for the
        // average, sparkline, and load lines.
        let reserved = 4;
        for (row, pair) in self.state.cpu.per_core.chunks(2).enumerate() {
            if y + reserved >= bottom {
                break;
            }
            let mut spans = Vec::new();
            for (i, &pct) in pair.iter().enumerate() {
                let core = row * 2 + i;
                spans.push(Span::styled(format!("C{core:<2} "), theme.dim()));
                spans.extend(meter(pct, bar_width, theme));
                spans.push(Span::styled(format!(" {pct:5.1}%"), theme.severity_bold(pct)));
                if i == 0 {
                    spans.push(Span::raw("   "));
                }
            }
            buf.set_line(x, y, &Line::from(spans), max_width);
            y += 1;
        }

        y += 1;
        let average = self.state.cpu.average;
        if y < bottom {
            let mut spans = vec![Span::styled("AVG ", theme.bold())];
            spans.extend(meter(average, bar_width, theme));
            spans.push(Span::styled(
                format!(" {average:5.1}%"),
                theme.severity_bold(average),
            ));
            buf.set_line(x, y, &Line::from(spans), max_width);
            y += 1;
        }

        if y < bottom {
            let spark_width = clamp_width(area.width, 10, 10, HISTORY_LEN as u16);
            let window = self.state.cpu_history.window(spark_width as usize);
            let mut spans = vec![Span::styled("    ", theme.dim())];
            spans.extend(sparkline(&window, spark_width, theme));
            buf.set_line(x, y, &Line::from(spans), max_width);
            y += 1;
        }

        if y < bottom {
            if let Some(load) = &self.state.load {
                let cores = self.state.core_count().max(1);
                let load_pct = load.one / cores as f64 * 100.0;
                let line = Line::from(vec![
                    Span::styled("Load: ", theme.dim()),
                    Span::styled(format!("{:.2}", load.one), theme.severity(load_pct)),
                    Span::styled(
                        format!(" / {:.2} / {:.2}  {cores} cores", load.five, load.fifteen),
                        theme.dim(),
                    ),
                ]);
                buf.set_line(x, y, &line, max_width);
            }
        }
    }
}

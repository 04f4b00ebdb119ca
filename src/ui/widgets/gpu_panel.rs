//! GPU panel, drawn only on ticks where the GPU feed is present.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::core::state::DashState;
use crate::ui::layout::clamp_width;
use crate::ui::widgets::{meter, panel_block, truncate};

pub struct GpuPanel<'a> {
    state: &'a DashState,
}

impl<'a> GpuPanel<'a> {
    pub fn new(state: &'a DashState) -> Self {
        Self { state }
    }
}

impl Widget for GpuPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(gpu) = &self.state.gpu else {
            return;
        };
        let theme = &self.state.theme;
        let block = panel_block(" GPU ", theme.colors.gpu, theme);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width < 10 || inner.height < 2 {
            return;
        }

        let x = inner.x + 2;
        let max_width = inner.width.saturating_sub(2);
        let bottom = inner.y + inner.height;
        let bar_width = clamp_width(area.width, 16, 8, 25);
        let mut y = inner.y + 1;

        buf.set_span(
            x,
            y,
            &Span::styled(truncate(&gpu.name, 20), theme.bold()),
            max_width,
        );
        y += 2;

        let util = gpu.utilization as f64;
        if y < bottom {
            let mut spans = vec![Span::styled("GPU  ", theme.dim())];
            spans.extend(meter(util, bar_width, theme));
            spans.push(Span::styled(
                format!(" {:3}%", gpu.utilization),
                theme.severity_bold(util),
            ));
            buf.set_line(x, y, &Line::from(spans), max_width);
            y += 1;
        }

        let vram_pct = gpu.mem_percent();
        if y < bottom {
            let mut spans = vec![Span::styled("VRAM ", theme.dim())];
            spans.extend(meter(vram_pct, bar_width, theme));
            spans.push(Span::styled(
                format!(" {:3}%", gpu.mem_utilization),
                theme.severity_bold(vram_pct),
            ));
            buf.set_line(x, y, &Line::from(spans), max_width);
            y += 2;
        }

        if y < bottom {
            let line = Line::from(vec![
                Span::styled("Mem: ", theme.dim()),
                Span::styled(format!("{}", gpu.mem_used_mb), theme.bold()),
                Span::styled(format!(" / {} MB", gpu.mem_total_mb), theme.dim()),
            ]);
            buf.set_line(x, y, &line, max_width);
            y += 1;
        }

        if y < bottom {
            let temp = gpu.temperature as f64;
            let severity = if temp > 40.0 { temp } else { 0.0 };
            let line = Line::from(vec![
                Span::styled("Temp: ", theme.dim()),
                Span::styled(format!("{}°C", gpu.temperature), theme.severity_bold(severity)),
                Span::styled("  Fan: ", theme.dim()),
                Span::styled(format!("{}%", gpu.fan_percent), theme.text()),
            ]);
            buf.set_line(x, y, &line, max_width);
            y += 1;
        }

        if gpu.has_power_readings() && y < bottom {
            let line = Line::from(vec![
                Span::styled("Power: ", theme.dim()),
                Span::styled(
                    format!("{}W / {}W", gpu.power_watts, gpu.power_limit_watts),
                    theme.text(),
                ),
            ]);
            buf.set_line(x, y, &line, max_width);
        }
    }
}

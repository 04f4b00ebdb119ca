//! Network panel: aggregate throughput, history sparklines, and the
//! per-interface table when more than one interface is up.

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
use crate::ui::widgets::{panel_block, sparkline, truncate};

pub struct NetworkPanel<'a> {
    state: &'a DashState,
}

impl<'a> NetworkPanel<'a> {
    pub fn new(state: &'a DashState) -> Self {
        Self { state }
    }
}

impl Widget for NetworkPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = &self.state.theme;
        let block = panel_block(" NETWORK ", theme.colors.network, theme);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width < 12 || inner.height < 2 {
            return;
        }

        let x = inner.x + 2;
        let max_width = inner.width.saturating_sub(2);
        let bottom = inner.y + inner.height;
        let mut y = inner.y + 1;

        let (rx_rate, tx_rate) = self.state.net_rates();
        let (rx_total, tx_total) = self.state.net_totals();

        let up = Line::from(vec![
            Span::styled("▲ UP  ", theme.severity(0.0)),
            Span::styled(format!("{:>12}", format::rate(tx_rate)), theme.text()),
            Span::styled(format!("  {}", format::bytes(tx_total as f64)), theme.dim()),
        ]);
        buf.set_line(x, y, &up, max_width);
        y += 1;

        if y < bottom {
            let down = Line::from(vec![
                Span::styled("▼ DN  ", theme.border(theme.colors.network)),
                Span::styled(format!("{:>12}", format::rate(rx_rate)), theme.text()),
                Span::styled(format!("  {}", format::bytes(rx_total as f64)), theme.dim()),
            ]);
            buf.set_line(x, y, &down, max_width);
            y += 2;
        }

        let spark_width = clamp_width(area.width, 14, 8, HISTORY_LEN as u16);
        if y < bottom {
            let mut spans = vec![Span::styled("Up   ", theme.dim())];
            spans.extend(sparkline(
                &self.state.net_tx_history.window(spark_width as usize),
                spark_width,
                theme,
            ));
            buf.set_line(x, y, &Line::from(spans), max_width);
            y += 1;
        }
        if y < bottom {
            let mut spans = vec![Span::styled("Down ", theme.dim())];
            spans.extend(sparkline(
                &self.state.net_rx_history.window(spark_width as usize),
                spark_width,
                theme,
            ));
            buf.set_line(x, y, &Line::from(spans), max_width);
            y += 2;
        }

        if self.state.interfaces.len() > 1 && y + 1 < bottom {
            buf.set_span(
                x,
                y,
                &Span::styled(
                    format!("{:<10} {:>10} {:>10}", "iface", "RX", "TX"),
                    theme.dim_bold(),
                ),
                max_width,
            );
            y += 1;
            for (name, rates) in &self.state.interfaces {
                if y >= bottom {
                    break;
                }
                let line = Line::from(vec![
                    Span::styled(format!("{:<10}", truncate(name, 10)), theme.dim()),
                    Span::styled(
                        format!(
                            " {:>10} {:>10}",
                            format::rate(rates.rx_per_sec),
                            format::rate(rates.tx_per_sec)
                        ),
                        theme.text(),
                    ),
                ]);
                buf.set_line(x, y, &line, max_width);
                y += 1;
            }
        }
    }
}

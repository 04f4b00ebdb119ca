//! Container panel, drawn only when the container engine reports running
//! containers.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::core::state::DashState;
use crate::ui::widgets::{panel_block, truncate};

pub struct ContainerPanel<'a> {
    state: &'a DashState,
}

impl<'a> ContainerPanel<'a> {
    pub fn new(state: &'a DashState) -> Self {
        Self { state }
    }
}

impl Widget for ContainerPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = &self.state.theme;
        let block = panel_block(" CONTAINERS ", theme.colors.containers, theme);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width < 12 || inner.height < 2 {
            return;
        }

        let x = inner.x + 2;
        let max_width = inner.width.saturating_sub(2);
        let bottom = inner.y + inner.height;
        let mut y = inner.y + 1;

        buf.set_span(
            x,
            y,
            &Span::styled(
                format!("{:<18} {:>7} {:>8} {}", "CONTAINER", "CPU%", "MEM", "STATUS"),
                theme.dim_bold(),
            ),
            max_width,
        );
        y += 1;

        for container in &self.state.containers {
            if y >= bottom {
                break;
            }
            let line = Line::from(vec![
                Span::styled(
                    format!("{:<18}", truncate(&container.name, 18)),
                    theme.text(),
                ),
                Span::styled(
                    format!(" {:6.1}%", container.cpu_percent),
                    theme.severity(container.cpu_percent),
                ),
                Span::styled(format!(" {:6.0}MB", container.mem_mb), theme.text()),
                Span::styled(
                    format!(" {}", truncate(&container.status, 15)),
                    theme.dim(),
                ),
            ]);
            buf.set_line(x, y, &line, max_width);
            y += 1;
        }
    }
}

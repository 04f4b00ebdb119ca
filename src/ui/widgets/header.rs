//! Header strip: banner, clock, uptime, headline percentages, key hints.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::core::state::DashState;
use crate::format;

pub struct Header<'a> {
    state: &'a DashState,
}

impl<'a> Header<'a> {
    pub fn new(state: &'a DashState) -> Self {
        Self { state }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let theme = &self.state.theme;
        let clock = chrono::Local::now().format("%a %b %d  %H:%M:%S").to_string();

        let banner = if self.state.alert {
            Span::styled(" !! ALERT ", theme.alert())
        } else {
            Span::styled(" VITALS ", theme.header())
        };

        let mut spans = vec![
            banner,
            Span::styled(" | ", theme.dim()),
            Span::styled(clock, theme.header()),
            Span::styled("  |  ", theme.dim()),
            Span::styled(format!("up {}", format::uptime(self.state.uptime_seconds)), theme.text()),
            Span::styled("  |  ", theme.dim()),
            Span::styled("CPU ", theme.text()),
            Span::styled(
                format!("{:.0}%", self.state.cpu.average),
                theme.severity_bold(self.state.cpu.average),
            ),
            Span::styled("  MEM ", theme.text()),
            Span::styled(
                format!("{:.0}%", self.state.memory.used_percent()),
                theme.severity_bold(self.state.memory.used_percent()),
            ),
        ];

        if let Some(battery) = &self.state.battery {
            spans.push(Span::styled("  |  ", theme.dim()));
            let plug = if battery.charging { "+" } else { "" };
            spans.push(Span::styled(
                format!("BAT {}%{plug}", battery.capacity_percent),
                theme.text(),
            ));
        }

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);

        let hints = format!(
            " sort:{}  [c/m/p]  t:theme  q:quit ",
            self.state.sort.label()
        );
        let hint_width = hints.chars().count() as u16;
        if area.width > hint_width {
            buf.set_span(
                area.x + area.width - hint_width,
                area.y,
                &Span::styled(hints, theme.dim()),
                hint_width,
            );
        }
    }
}

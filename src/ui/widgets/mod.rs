//! Dashboard widgets: shared bar/sparkline primitives and one panel per
//! metric domain.

mod container_panel;
mod cpu_panel;
mod disk_panel;
mod gpu_panel;
mod header;
mod memory_panel;
mod network_panel;
mod process_panel;
mod thermal_panel;

pub use container_panel::ContainerPanel;
pub use cpu_panel::CpuPanel;
pub use disk_panel::DiskPanel;
pub use gpu_panel::GpuPanel;
pub use header::Header;
pub use memory_panel::MemoryPanel;
pub use network_panel::NetworkPanel;
pub use process_panel::ProcessPanel;
pub use thermal_panel::ThermalPanel;

use ratatui::{
    style::Color,
    text::Span,
    widgets::{Block, Borders},
};

use crate::metrics::history::WindowScale;
use crate::ui::theme::Theme;

/// Eight-level sparkline glyphs, lowest band first.
const SPARK_GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const METER_FULL: &str = "━";
const METER_EMPTY: &str = "─";

pub(crate) fn panel_block<'a>(title: &'a str, color: Color, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(Span::styled(title, theme.title(color)))
        .borders(Borders::ALL)
        .border_style(theme.border(color))
}

/// Spans of a meter bar: the filled portion in the severity color of
/// `percent`, the remainder dimmed.
pub(crate) fn meter(percent: f64, width: u16, theme: &Theme) -> Vec<Span<'static>> {
    let width = width as usize;
    let filled = ((percent / 100.0 * width as f64) as usize).min(width);
    vec![
        Span::styled(METER_FULL.repeat(filled), theme.severity_bold(percent)),
        Span::styled(METER_EMPTY.repeat(width - filled), theme.dim()),
    ]
}

/// Spans of a sparkline: dim padding while the window is still filling,
/// then one glyph per sample, banded and colored against the visible
/// window only so the sparkline auto-scales to what's on screen.
pub(crate) fn sparkline(window: &[f64], width: u16, theme: &Theme) -> Vec<Span<'static>> {
    let width = width as usize;
    let mut spans = Vec::with_capacity(window.len().min(width) + 1);
    if window.len() < width {
        spans.push(Span::styled(
            METER_EMPTY.repeat(width - window.len()),
            theme.dim(),
        ));
    }
    let scale = WindowScale::of(window);
    for &value in window.iter().take(width) {
        spans.push(Span::styled(
            SPARK_GLYPHS[scale.band(value)].to_string(),
            theme.severity(scale.severity(value)),
        ));
    }
    spans
}

pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span_text(spans: &[Span<'_>]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn meter_fills_proportionally_and_never_overflows() {
        let theme = Theme::default();
        assert_eq!(span_text(&meter(50.0, 10, &theme)).chars().count(), 10);
        assert_eq!(span_text(&meter(250.0, 10, &theme)).chars().count(), 10);
        assert_eq!(span_text(&meter(-5.0, 10, &theme)).chars().count(), 10);
        assert!(span_text(&meter(250.0, 10, &theme))
            .chars()
            .all(|c| c.to_string() == METER_FULL));
    }

    #[test]
    fn sparkline_pads_a_filling_window_on_the_left() {
        let theme = Theme::default();
        let text = span_text(&sparkline(&[1.0, 2.0, 3.0], 8, &theme));
        assert_eq!(text.chars().count(), 8);
        assert!(text.starts_with(METER_EMPTY.repeat(5).as_str()));
    }

    #[test]
    fn sparkline_glyphs_span_the_window_range() {
        let theme = Theme::default();
        let text = span_text(&sparkline(&[0.0, 100.0], 2, &theme));
        let glyphs: Vec<char> = text.chars().collect();
        assert_eq!(glyphs[0], SPARK_GLYPHS[0]);
        assert_eq!(glyphs[1], SPARK_GLYPHS[7]);
    }

    #[test]
    fn truncate_marks_cut_names() {
        assert_eq!(truncate("short", 16), "short");
        assert_eq!(truncate("averylongprocessname", 8), "averylo…");
        assert_eq!(truncate("ほげほげほげ", 4), "ほげほ…");
    }
}

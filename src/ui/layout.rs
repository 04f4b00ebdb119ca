//! Adaptive panel layout.
//!
//! A stateless function of the terminal size and the tick's panel-presence
//! flags. Column widths always sum exactly to the terminal width: the last
//! column absorbs the integer-division remainder.

use ratatui::layout::Rect;

/// Rows consumed by the header strip.
const HEADER_ROWS: u16 = 2;

/// Minimum extent below which a panel is skipped rather than drawn.
const MIN_PANEL_EXTENT: u16 = 2;

/// Computed bounding boxes for one frame. Optional panels are `None` when
/// their data source is absent this tick, and any panel degenerates to
/// `None` when its box falls under the minimum extent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashLayout {
    pub header: Rect,
    pub cpu: Option<Rect>,
    pub memory: Option<Rect>,
    pub thermal: Option<Rect>,
    pub gpu: Option<Rect>,
    pub processes: Option<Rect>,
    pub network: Option<Rect>,
    pub disk: Option<Rect>,
    pub containers: Option<Rect>,
}

impl DashLayout {
    /// Presence flags are re-evaluated every tick by the caller; nothing
    /// here assumes a fixed panel set.
    pub fn compute(area: Rect, has_gpu: bool, has_containers: bool) -> Self {
        let header = Rect {
            height: HEADER_ROWS.min(area.height),
            ..area
        };

        let usable = area.height.saturating_sub(HEADER_ROWS);
        let top_height = usable * 3 / 5;
        let bottom_height = usable - top_height;

        let top = Rect {
            x: area.x,
            y: area.y.saturating_add(header.height),
            width: area.width,
            height: top_height,
        };
        let bottom = Rect {
            y: top.y.saturating_add(top_height),
            height: bottom_height,
            ..top
        };

        let top_cols = split_columns(top, if has_gpu { 4 } else { 3 });
        let bottom_cols = split_columns(bottom, if has_containers { 4 } else { 3 });

        Self {
            header,
            cpu: drawable(top_cols[0]),
            memory: drawable(top_cols[1]),
            thermal: drawable(top_cols[2]),
            gpu: top_cols.get(3).copied().and_then(drawable),
            processes: drawable(bottom_cols[0]),
            network: drawable(bottom_cols[1]),
            disk: drawable(bottom_cols[2]),
            containers: bottom_cols.get(3).copied().and_then(drawable),
        }
    }
}

/// Splits a row into `n` equal columns; the last column absorbs
/// `row.width - col_w * (n - 1)` so the widths consume the row exactly.
fn split_columns(row: Rect, n: u16) -> Vec<Rect> {
    let col_width = row.width / n;
    (0..n)
        .map(|i| {
            let width = if i == n - 1 {
                row.width - col_width * (n - 1)
            } else {
                col_width
            };
            Rect {
                x: row.x + col_width * i,
                width,
                ..row
            }
        })
        .collect()
}

fn drawable(rect: Rect) -> Option<Rect> {
    (rect.width >= MIN_PANEL_EXTENT && rect.height >= MIN_PANEL_EXTENT).then_some(rect)
}

/// Clamps a widget width derived from its panel's width, so widgets
/// degrade gracefully on narrow terminals instead of going negative.
pub fn clamp_width(panel_width: u16, overhead: u16, min: u16, max: u16) -> u16 {
    panel_width.saturating_sub(overhead).clamp(min, max)
}

//! Bounded per-stream history feeding the sparkline renderers.

/// Samples retained per metric stream.
pub const HISTORY_LEN: usize = 120;

/// Window spread below which all samples land in the lowest band.
const FLAT_EPSILON: f64 = 0.001;

/// A fixed-capacity ring of the most recent derived samples.
///
/// The ring never distinguishes unfilled slots from zero-valued ones;
/// readers must go through [`History::window`], which exposes only the
/// `count` most recent entries in chronological order.
#[derive(Debug, Clone)]
pub struct History {
    slots: Vec<f64>,
    cursor: usize,
    count: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            slots: vec![0.0; capacity.max(1)],
            cursor: 0,
            count: 0,
        }
    }

    /// Overwrites the slot at the cursor and advances it modulo capacity;
    /// the valid-entry count saturates at capacity.
    pub fn push(&mut self, value: f64) {
        self.slots[self.cursor] = value;
        self.cursor = (self.cursor + 1) % self.slots.len();
        if self.count < self.slots.len() {
            self.count += 1;
        }
    }

    /// The most recent `min(count, width)` values, oldest first.
    pub fn window(&self, width: usize) -> Vec<f64> {
        let take = self.count.min(width);
        let capacity = self.slots.len();
        (0..take)
            .map(|i| self.slots[(self.cursor + capacity - take + i) % capacity])
            .collect()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(HISTORY_LEN)
    }
}

/// Min/max of a visible window with the flat-window guard applied, used
/// to band samples into the eight sparkline glyphs and to color them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowScale {
    pub min: f64,
    pub max: f64,
    range: f64,
}

impl WindowScale {
    pub fn of(window: &[f64]) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &value in window {
            min = min.min(value);
            max = max.max(value);
        }
        if window.is_empty() {
            min = 0.0;
            max = 0.0;
        }
        let range = if max - min > FLAT_EPSILON {
            max - min
        } else {
            1.0
        };
        Self { min, max, range }
    }

    /// Buckets a value into one of the eight glyph bands.
    pub fn band(&self, value: f64) -> usize {
        let band = ((value - self.min) / self.range * 7.0) as isize;
        band.clamp(0, 7) as usize
    }

    /// Re-expresses a value as a 0-100 severity percentage. Percent-like
    /// windows (max at most 100) keep the raw value; unbounded streams use
    /// the value's position within the visible window.
    pub fn severity(&self, value: f64) -> f64 {
        if self.max <= 100.0 {
            value
        } else {
            (value - self.min) / self.range * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn count_saturates_past_capacity() {
        let mut history = History::new(8);
        for i in 0..13 {
            history.push(i as f64);
        }
        assert_eq!(history.len(), 8);
        assert_eq!(
            history.window(8),
            vec![5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0]
        );
    }

    #[test]
    fn window_is_chronological_while_filling() {
        let mut history = History::new(8);
        history.push(1.0);
        history.push(2.0);
        history.push(3.0);
        assert_eq!(history.window(8), vec![1.0, 2.0, 3.0]);
        assert_eq!(history.window(2), vec![2.0, 3.0]);
    }

    #[test]
    fn full_capacity_ring_discards_the_oldest() {
        let mut history = History::default();
        for i in 1..=130 {
            history.push(i as f64);
        }
        assert_eq!(history.len(), HISTORY_LEN);
        let window = history.window(10);
        let expected: Vec<f64> = (121..=130).map(f64::from).collect();
        assert_eq!(window, expected);
    }

    #[test]
    fn flat_window_buckets_to_band_zero() {
        let scale = WindowScale::of(&[42.0; 30]);
        for _ in 0..30 {
            assert_eq!(scale.band(42.0), 0);
        }
    }

    #[test]
    fn band_stays_in_glyph_range() {
        let scale = WindowScale::of(&[0.0, 1e12]);
        assert_eq!(scale.band(0.0), 0);
        assert_eq!(scale.band(1e12), 7);
        assert_eq!(scale.band(-5e12), 0);
        assert_eq!(scale.band(9e15), 7);

        let flat = WindowScale::of(&[7.0, 7.0]);
        assert_eq!(flat.band(7.0), 0);
        assert_eq!(flat.band(f64::MAX), 7);
    }

    #[test]
    fn percent_like_windows_keep_raw_severity() {
        let scale = WindowScale::of(&[10.0, 95.0]);
        assert_eq!(scale.severity(95.0), 95.0);
        assert_eq!(scale.severity(10.0), 10.0);
    }

    #[test]
    fn unbounded_windows_rescale_severity() {
        let scale = WindowScale::of(&[1_000.0, 3_000.0]);
        assert_eq!(scale.severity(1_000.0), 0.0);
        assert_eq!(scale.severity(3_000.0), 100.0);
        assert_eq!(scale.severity(2_000.0), 50.0);
    }
}

//! Tick-modulo throttling for sensors that spawn external processes.

/// Caches the latest reading of an expensive feed and refreshes it every
/// `every` ticks; skipped ticks reuse the cached value.
#[derive(Debug)]
pub struct Throttle<T> {
    every: u32,
    countdown: u32,
    cached: T,
}

impl<T> Throttle<T> {
    /// A throttle that refreshes on its first tick and then every `every`
    /// ticks after that.
    pub fn new(every: u32, initial: T) -> Self {
        Self {
            every: every.max(1),
            countdown: 0,
            cached: initial,
        }
    }

    /// Advances one tick, invoking `refresh` only when the cadence is due.
    pub fn tick(&mut self, refresh: impl FnOnce() -> T) -> &T {
        if self.countdown == 0 {
            self.cached = refresh();
            self.countdown = self.every - 1;
        } else {
            self.countdown -= 1;
        }
        &self.cached
    }

    /// The last refreshed value, without advancing the cadence.
    pub fn cached(&self) -> &T {
        &self.cached
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refreshes_on_first_tick_then_every_nth() {
        let mut throttle = Throttle::new(3, 0u32);
        let mut refreshes = 0;
        for _ in 0..9 {
            throttle.tick(|| {
                refreshes += 1;
                refreshes
            });
        }
        assert_eq!(refreshes, 3);
        assert_eq!(*throttle.cached(), 3);
    }

    #[test]
    fn skipped_ticks_reuse_the_cached_value() {
        let mut throttle = Throttle::new(5, "stale");
        assert_eq!(*throttle.tick(|| "fresh"), "fresh");
        for _ in 0..4 {
            assert_eq!(*throttle.tick(|| "never"), "fresh");
        }
        assert_eq!(*throttle.tick(|| "again"), "again");
    }

    #[test]
    fn every_one_refreshes_each_tick() {
        let mut throttle = Throttle::new(1, 0u32);
        let mut count = 0;
        for _ in 0..4 {
            throttle.tick(|| {
                count += 1;
                count
            });
        }
        assert_eq!(count, 4);
    }
}

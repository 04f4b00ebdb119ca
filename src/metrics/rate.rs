//! Rate derivation from cumulative OS counters.
//!
//! Every stream here follows the same discipline: the previous sample is
//! retained until the next tick overwrites it, and a counter that moves
//! backwards (reset, restart, interface re-creation) derives a zero rate,
//! never a negative one.

use indexmap::IndexMap;

/// Converts a pair of cumulative counter samples into a per-second rate.
///
/// Zero elapsed time and counter regressions both yield 0.
pub fn derive_rate(current: u64, previous: u64, elapsed_seconds: f64) -> f64 {
    if elapsed_seconds <= 0.0 || current < previous {
        return 0.0;
    }
    (current - previous) as f64 / elapsed_seconds
}

/// Time-in-state counters for one `/proc/stat` cpu line, in USER_HZ ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuCounters {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
}

impl CpuCounters {
    pub fn total(&self) -> u64 {
        self.user
            + self.nice
            + self.system
            + self.idle
            + self.iowait
            + self.irq
            + self.softirq
            + self.steal
    }

    /// Busy time is everything except idle and iowait.
    pub fn busy(&self) -> u64 {
        self.total() - self.idle - self.iowait
    }
}

/// Busy percentage between two samples of the same stat line.
///
/// iowait may decrease on its own, so the busy delta saturates at zero
/// independently of the total delta.
pub fn busy_percent(current: &CpuCounters, previous: &CpuCounters) -> f64 {
    if current.total() < previous.total() {
        return 0.0;
    }
    let delta_total = current.total() - previous.total();
    if delta_total == 0 {
        return 0.0;
    }
    let delta_busy = current.busy().saturating_sub(previous.busy());
    delta_busy as f64 / delta_total as f64 * 100.0
}

/// One tick's cpu lines: the aggregate plus one entry per logical core.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpuReading {
    pub aggregate: CpuCounters,
    pub cores: Vec<CpuCounters>,
}

/// Derived busy percentages for one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CpuUsage {
    pub average: f64,
    pub per_core: Vec<f64>,
}

/// Tracks cpu counters across ticks. Each line is compared only against
/// its own previous sample; the aggregate and every core line delta
/// independently.
#[derive(Debug, Default)]
pub struct CpuTracker {
    prev: Option<CpuReading>,
}

impl CpuTracker {
    pub fn update(&mut self, reading: CpuReading) -> CpuUsage {
        let usage = match &self.prev {
            Some(prev) => CpuUsage {
                average: busy_percent(&reading.aggregate, &prev.aggregate),
                per_core: reading
                    .cores
                    .iter()
                    .enumerate()
                    .map(|(i, cur)| {
                        prev.cores
                            .get(i)
                            .map(|p| busy_percent(cur, p))
                            .unwrap_or(0.0)
                    })
                    .collect(),
            },
            None => CpuUsage {
                average: 0.0,
                per_core: vec![0.0; reading.cores.len()],
            },
        };
        self.prev = Some(reading);
        usage
    }
}

/// Cumulative rx/tx byte counters for one network interface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IfaceCounters {
    pub rx_bytes: u64,
    pub tx_bytes: u64,
}

/// Derived throughput for one interface, plus its running totals.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IfaceRates {
    pub rx_per_sec: f64,
    pub tx_per_sec: f64,
    pub rx_total: u64,
    pub tx_total: u64,
}

/// Tracks interface counters across ticks, keyed by interface name.
///
/// A name missing from the current enumeration is dropped outright; a
/// name appearing for the first time starts at zero throughput.
#[derive(Debug, Default)]
pub struct NetTracker {
    prev: IndexMap<String, IfaceCounters>,
}

impl NetTracker {
    pub fn update(
        &mut self,
        current: IndexMap<String, IfaceCounters>,
        elapsed_seconds: f64,
    ) -> IndexMap<String, IfaceRates> {
        let rates = current
            .iter()
            .map(|(name, cur)| {
                let rate = match self.prev.get(name) {
                    Some(prev) => IfaceRates {
                        rx_per_sec: derive_rate(cur.rx_bytes, prev.rx_bytes, elapsed_seconds),
                        tx_per_sec: derive_rate(cur.tx_bytes, prev.tx_bytes, elapsed_seconds),
                        rx_total: cur.rx_bytes,
                        tx_total: cur.tx_bytes,
                    },
                    None => IfaceRates {
                        rx_total: cur.rx_bytes,
                        tx_total: cur.tx_bytes,
                        ..IfaceRates::default()
                    },
                };
                (name.clone(), rate)
            })
            .collect();
        self.prev = current;
        rates
    }
}

/// Cumulative bytes moved through all physical block devices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiskCounters {
    pub read_bytes: u64,
    pub written_bytes: u64,
}

/// Derived disk throughput for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DiskRates {
    pub read_per_sec: f64,
    pub write_per_sec: f64,
}

/// Tracks aggregate disk counters across ticks.
#[derive(Debug, Default)]
pub struct DiskTracker {
    prev: Option<DiskCounters>,
}

impl DiskTracker {
    pub fn update(&mut self, current: DiskCounters, elapsed_seconds: f64) -> DiskRates {
        let rates = match self.prev {
            Some(prev) => DiskRates {
                read_per_sec: derive_rate(current.read_bytes, prev.read_bytes, elapsed_seconds),
                write_per_sec: derive_rate(
                    current.written_bytes,
                    prev.written_bytes,
                    elapsed_seconds,
                ),
            },
            None => DiskRates::default(),
        };
        self.prev = Some(current);
        rates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_counters_divide_by_elapsed() {
        assert_eq!(derive_rate(2_048_000, 1_000_000, 1.0), 1_048_000.0);
        assert_eq!(derive_rate(300, 100, 2.0), 100.0);
        assert_eq!(derive_rate(100, 100, 1.0), 0.0);
    }

    #[test]
    fn counter_regression_derives_zero() {
        assert_eq!(derive_rate(50, 100, 1.0), 0.0);
        assert_eq!(derive_rate(0, u64::MAX, 1.0), 0.0);
    }

    #[test]
    fn zero_elapsed_derives_zero() {
        assert_eq!(derive_rate(500, 100, 0.0), 0.0);
        assert_eq!(derive_rate(100, 500, 0.0), 0.0);
    }

    fn counters(busy: u64, idle: u64) -> CpuCounters {
        CpuCounters {
            user: busy,
            idle,
            ..CpuCounters::default()
        }
    }

    #[test]
    fn busy_percent_over_one_tick() {
        // total 1000 -> 1200, busy 200 -> 250: (250-200)/(1200-1000) = 25%.
        let prev = counters(200, 800);
        let cur = counters(250, 950);
        assert_eq!(busy_percent(&cur, &prev), 25.0);
    }

    #[test]
    fn busy_percent_guards_zero_and_regressed_totals() {
        let sample = counters(200, 800);
        assert_eq!(busy_percent(&sample, &sample), 0.0);
        assert_eq!(busy_percent(&counters(100, 400), &sample), 0.0);
    }

    #[test]
    fn busy_regression_with_growing_total_is_zero() {
        // iowait shrank enough that busy went backwards while total grew.
        let prev = CpuCounters {
            user: 100,
            iowait: 50,
            idle: 850,
            ..CpuCounters::default()
        };
        let cur = CpuCounters {
            user: 110,
            iowait: 120,
            idle: 900,
            ..CpuCounters::default()
        };
        assert_eq!(busy_percent(&cur, &prev), 0.0);
    }

    #[test]
    fn each_cpu_line_deltas_against_its_own_previous() {
        let mut tracker = CpuTracker::default();
        tracker.update(CpuReading {
            aggregate: counters(200, 800),
            cores: vec![counters(150, 350), counters(50, 450)],
        });
        let usage = tracker.update(CpuReading {
            aggregate: counters(250, 950),
            cores: vec![counters(250, 350), counters(50, 550)],
        });
        assert_eq!(usage.average, 25.0);
        assert_eq!(usage.per_core, vec![100.0, 0.0]);
    }

    #[test]
    fn first_cpu_sample_reports_zero() {
        let mut tracker = CpuTracker::default();
        let usage = tracker.update(CpuReading {
            aggregate: counters(10, 90),
            cores: vec![counters(10, 90); 4],
        });
        assert_eq!(usage.average, 0.0);
        assert_eq!(usage.per_core, vec![0.0; 4]);
    }

    #[test]
    fn hotplugged_core_reports_zero_until_matched() {
        let mut tracker = CpuTracker::default();
        tracker.update(CpuReading {
            aggregate: counters(10, 90),
            cores: vec![counters(10, 90)],
        });
        let usage = tracker.update(CpuReading {
            aggregate: counters(20, 180),
            cores: vec![counters(20, 180), counters(5, 95)],
        });
        assert_eq!(usage.per_core[1], 0.0);
    }

    #[test]
    fn absent_interface_is_dropped_not_carried() {
        let mut tracker = NetTracker::default();
        let mut first = IndexMap::new();
        first.insert(
            "eth0".to_string(),
            IfaceCounters {
                rx_bytes: 1_000,
                tx_bytes: 2_000,
            },
        );
        first.insert(
            "wlan0".to_string(),
            IfaceCounters {
                rx_bytes: 500,
                tx_bytes: 500,
            },
        );
        tracker.update(first, 1.0);

        let mut second = IndexMap::new();
        second.insert(
            "eth0".to_string(),
            IfaceCounters {
                rx_bytes: 2_000,
                tx_bytes: 2_500,
            },
        );
        let rates = tracker.update(second, 1.0);
        assert_eq!(rates.len(), 1);
        assert_eq!(rates["eth0"].rx_per_sec, 1_000.0);
        assert_eq!(rates["eth0"].tx_per_sec, 500.0);
        assert!(!rates.contains_key("wlan0"));
    }

    #[test]
    fn new_interface_starts_at_zero_throughput() {
        let mut tracker = NetTracker::default();
        let mut reading = IndexMap::new();
        reading.insert(
            "eth0".to_string(),
            IfaceCounters {
                rx_bytes: 9_999,
                tx_bytes: 9_999,
            },
        );
        let rates = tracker.update(reading, 1.0);
        assert_eq!(rates["eth0"].rx_per_sec, 0.0);
        assert_eq!(rates["eth0"].rx_total, 9_999);
    }

    #[test]
    fn disk_rates_track_sector_bytes() {
        let mut tracker = DiskTracker::default();
        tracker.update(
            DiskCounters {
                read_bytes: 512_000,
                written_bytes: 1_024_000,
            },
            1.0,
        );
        let rates = tracker.update(
            DiskCounters {
                read_bytes: 1_024_000,
                written_bytes: 1_024_000,
            },
            2.0,
        );
        assert_eq!(rates.read_per_sec, 256_000.0);
        assert_eq!(rates.write_per_sec, 0.0);
    }
}

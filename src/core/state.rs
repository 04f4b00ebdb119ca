//! The dashboard's single long-lived state context.
//!
//! Everything mutable across ticks lives here: previous-sample trackers,
//! history rings, sensor cadences, the sort mode, and the theme. One tick
//! is `collect` → [`DashState::apply`] → render, so a tick can be unit
//! tested by applying a synthetic [`TickReading`].

use indexmap::IndexMap;

use crate::metrics::history::History;
use crate::metrics::process::{ProcessEntry, ProcessTable, SortMode};
use crate::metrics::rate::{
    CpuReading, CpuTracker, CpuUsage, DiskCounters, DiskRates, DiskTracker, IfaceCounters,
    IfaceRates, NetTracker,
};
use crate::metrics::throttle::Throttle;
use crate::sensors::battery::BatteryFacts;
use crate::sensors::docker::ContainerFacts;
use crate::sensors::gpu::GpuFacts;
use crate::sensors::memory::MemoryReading;
use crate::sensors::system::LoadAvg;
use crate::sensors::thermal::{FanSensor, TempSensor};
use crate::ui::theme::Theme;

/// Refresh cadences for sensors that spawn external processes.
const GPU_REFRESH_TICKS: u32 = 3;
const CONTAINER_REFRESH_TICKS: u32 = 5;
const BATTERY_REFRESH_TICKS: u32 = 10;

/// One tick's raw readings, before derivation. Collected from the live
/// feed each tick, or constructed directly in tests.
#[derive(Debug, Clone, Default)]
pub struct TickReading {
    pub cpu: Option<CpuReading>,
    pub memory: MemoryReading,
    pub load: Option<LoadAvg>,
    pub uptime_seconds: f64,
    pub temps: Vec<TempSensor>,
    pub fans: Vec<FanSensor>,
    pub interfaces: IndexMap<String, IfaceCounters>,
    pub disk: DiskCounters,
    pub processes: Vec<ProcessEntry>,
    /// System-wide USER_HZ ticks, sampled once and shared by every
    /// per-process delta this tick.
    pub system_ticks: u64,
    pub gpu: Option<GpuFacts>,
    pub containers: Vec<ContainerFacts>,
    pub battery: Option<BatteryFacts>,
}

/// Alert thresholds from the command line.
#[derive(Debug, Clone, Copy)]
pub struct AlertThresholds {
    pub cpu_percent: f64,
    pub temp_degrees: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            cpu_percent: 90.0,
            temp_degrees: 85.0,
        }
    }
}

/// Per-sensor cooldown caches for the expensive external feeds.
#[derive(Debug)]
pub struct SensorCadence {
    pub gpu: Throttle<Option<GpuFacts>>,
    pub containers: Throttle<Vec<ContainerFacts>>,
    pub battery: Throttle<Option<BatteryFacts>>,
}

impl Default for SensorCadence {
    fn default() -> Self {
        Self {
            gpu: Throttle::new(GPU_REFRESH_TICKS, None),
            containers: Throttle::new(CONTAINER_REFRESH_TICKS, Vec::new()),
            battery: Throttle::new(BATTERY_REFRESH_TICKS, None),
        }
    }
}

pub struct DashState {
    pub theme: Theme,
    pub sort: SortMode,
    pub thresholds: AlertThresholds,
    pub cadence: SensorCadence,

    // Cumulative-counter trackers
    cpu_tracker: CpuTracker,
    net_tracker: NetTracker,
    disk_tracker: DiskTracker,
    pub processes: ProcessTable,

    // Derived view of the latest tick
    pub cpu: CpuUsage,
    pub memory: MemoryReading,
    pub load: Option<LoadAvg>,
    pub uptime_seconds: f64,
    pub temps: Vec<TempSensor>,
    pub fans: Vec<FanSensor>,
    pub interfaces: IndexMap<String, IfaceRates>,
    pub disk: DiskRates,
    pub gpu: Option<GpuFacts>,
    pub containers: Vec<ContainerFacts>,
    pub battery: Option<BatteryFacts>,
    pub alert: bool,

    // Histories
    pub cpu_history: History,
    pub net_rx_history: History,
    pub net_tx_history: History,
    pub disk_read_history: History,
    pub disk_write_history: History,
}

impl DashState {
    pub fn new(theme: Theme, thresholds: AlertThresholds) -> Self {
        Self {
            theme,
            sort: SortMode::default(),
            thresholds,
            cadence: SensorCadence::default(),
            cpu_tracker: CpuTracker::default(),
            net_tracker: NetTracker::default(),
            disk_tracker: DiskTracker::default(),
            processes: ProcessTable::default(),
            cpu: CpuUsage::default(),
            memory: MemoryReading::default(),
            load: None,
            uptime_seconds: 0.0,
            temps: Vec::new(),
            fans: Vec::new(),
            interfaces: IndexMap::new(),
            disk: DiskRates::default(),
            gpu: None,
            containers: Vec::new(),
            battery: None,
            alert: false,
            cpu_history: History::default(),
            net_rx_history: History::default(),
            net_tx_history: History::default(),
            disk_read_history: History::default(),
            disk_write_history: History::default(),
        }
    }

    /// Folds one tick's raw reading into derived rates, histories, the
    /// rebuilt process table, and the alert flag.
    pub fn apply(&mut self, reading: TickReading, elapsed_seconds: f64) {
        if let Some(cpu) = reading.cpu {
            self.cpu = self.cpu_tracker.update(cpu);
        }
        self.cpu_history.push(self.cpu.average);

        self.memory = reading.memory;
        self.load = reading.load;
        self.uptime_seconds = reading.uptime_seconds;
        self.temps = reading.temps;
        self.fans = reading.fans;

        self.interfaces = self.net_tracker.update(reading.interfaces, elapsed_seconds);
        let (rx, tx) = self.net_rates();
        self.net_rx_history.push(rx);
        self.net_tx_history.push(tx);

        self.disk = self.disk_tracker.update(reading.disk, elapsed_seconds);
        self.disk_read_history.push(self.disk.read_per_sec);
        self.disk_write_history.push(self.disk.write_per_sec);

        self.processes.rebuild(
            reading.processes,
            reading.system_ticks,
            self.core_count().max(1),
        );

        self.gpu = reading.gpu;
        self.containers = reading.containers;
        self.battery = reading.battery;

        self.alert = self.cpu.average >= self.thresholds.cpu_percent
            || self
                .temps
                .iter()
                .any(|t| t.degrees >= self.thresholds.temp_degrees);
    }

    pub fn core_count(&self) -> usize {
        self.cpu.per_core.len()
    }

    /// Aggregate (rx, tx) throughput across all tracked interfaces.
    pub fn net_rates(&self) -> (f64, f64) {
        self.interfaces.values().fold((0.0, 0.0), |(rx, tx), i| {
            (rx + i.rx_per_sec, tx + i.tx_per_sec)
        })
    }

    /// Aggregate (rx, tx) cumulative byte totals.
    pub fn net_totals(&self) -> (u64, u64) {
        self.interfaces
            .values()
            .fold((0, 0), |(rx, tx), i| (rx + i.rx_total, tx + i.tx_total))
    }

    pub fn has_gpu(&self) -> bool {
        self.gpu.is_some()
    }

    pub fn has_containers(&self) -> bool {
        !self.containers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::rate::CpuCounters;

    fn cpu_reading(busy: u64, idle: u64, cores: usize) -> CpuReading {
        let line = CpuCounters {
            user: busy,
            idle,
            ..CpuCounters::default()
        };
        CpuReading {
            aggregate: line,
            cores: vec![line; cores],
        }
    }

    fn tick(busy: u64, idle: u64) -> TickReading {
        TickReading {
            cpu: Some(cpu_reading(busy, idle, 2)),
            ..TickReading::default()
        }
    }

    #[test]
    fn one_tick_derives_and_records_cpu_history() {
        let mut state = DashState::new(Theme::default(), AlertThresholds::default());
        state.apply(tick(200, 800), 1.0);
        state.apply(tick(250, 950), 1.0);

        assert_eq!(state.cpu.average, 25.0);
        assert_eq!(state.core_count(), 2);
        assert_eq!(state.cpu_history.window(2), vec![0.0, 25.0]);
    }

    #[test]
    fn alert_raises_on_cpu_threshold() {
        let mut state = DashState::new(
            Theme::default(),
            AlertThresholds {
                cpu_percent: 20.0,
                temp_degrees: 85.0,
            },
        );
        state.apply(tick(200, 800), 1.0);
        assert!(!state.alert);
        state.apply(tick(250, 950), 1.0);
        assert!(state.alert, "25% average crosses the 20% threshold");
    }

    #[test]
    fn alert_raises_on_any_hot_sensor() {
        let mut state = DashState::new(Theme::default(), AlertThresholds::default());
        let mut reading = tick(200, 800);
        reading.temps = vec![
            TempSensor {
                label: "Core 0".into(),
                degrees: 40.0,
                high: None,
                critical: None,
            },
            TempSensor {
                label: "Core 1".into(),
                degrees: 91.0,
                high: None,
                critical: None,
            },
        ];
        state.apply(reading, 1.0);
        assert!(state.alert);
    }

    #[test]
    fn network_totals_aggregate_across_interfaces() {
        let mut state = DashState::new(Theme::default(), AlertThresholds::default());
        let mut first = tick(200, 800);
        first.interfaces.insert(
            "eth0".into(),
            IfaceCounters {
                rx_bytes: 1_000,
                tx_bytes: 1_000_000,
            },
        );
        state.apply(first, 1.0);

        let mut second = tick(250, 950);
        second.interfaces.insert(
            "eth0".into(),
            IfaceCounters {
                rx_bytes: 2_000,
                tx_bytes: 2_048_576,
            },
        );
        state.apply(second, 1.0);

        let (rx, tx) = state.net_rates();
        assert_eq!(rx, 1_000.0);
        assert_eq!(tx, 1_048_576.0);
        assert_eq!(crate::format::rate(tx), "1.0 MB/s");
        assert_eq!(state.net_tx_history.window(1), vec![1_048_576.0]);
    }

    #[test]
    fn absent_optional_feeds_clear_their_panels() {
        let mut state = DashState::new(Theme::default(), AlertThresholds::default());
        let mut reading = tick(200, 800);
        reading.gpu = Some(GpuFacts {
            name: "TestCard".into(),
            temperature: 40,
            fan_percent: 20,
            utilization: 5,
            mem_utilization: 2,
            mem_used_mb: 100,
            mem_total_mb: 1000,
            power_watts: 30,
            power_limit_watts: 100,
        });
        state.apply(reading, 1.0);
        assert!(state.has_gpu());

        state.apply(tick(250, 950), 1.0);
        assert!(!state.has_gpu());
        assert!(!state.has_containers());
    }
}

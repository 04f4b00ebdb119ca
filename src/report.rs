//! Snapshot mode: one deterministic plain-text report and exit.

use std::fmt::Write as _;
use std::time::Duration;

use anyhow::Result;

use crate::core::state::{AlertThresholds, DashState};
use crate::format;
use crate::metrics::process::SortMode;
use crate::sensors;
use crate::ui::theme::Theme;

/// Gap between the two samples that seed the derived rates.
const SETTLE: Duration = Duration::from_millis(500);

/// Rows of the process table included in the report.
const REPORT_PROCESSES: usize = 10;

/// Samples the feed twice with a short settle gap, derives, and prints a
/// labeled report to stdout. A section whose source is absent is omitted
/// entirely.
pub fn print_snapshot(thresholds: AlertThresholds) -> Result<()> {
    let mut state = DashState::new(Theme::default(), thresholds);
    let baseline = sensors::collect(&mut state.cadence);
    state.apply(baseline, 0.0);
    std::thread::sleep(SETTLE);
    let reading = sensors::collect(&mut state.cadence);
    state.apply(reading, SETTLE.as_secs_f64());

    let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    print!("{}", render_report(&state, &stamp));
    Ok(())
}

/// Pure report body, driven by synthetic state in tests.
fn render_report(state: &DashState, stamp: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== VITALS SNAPSHOT === {stamp}");
    let _ = writeln!(out);
    let _ = writeln!(out, "Uptime: {}", format::uptime(state.uptime_seconds));

    let _ = writeln!(out, "\n-- CPU --");
    for (core, pct) in state.cpu.per_core.iter().enumerate() {
        let _ = writeln!(out, "  Core {core}: {pct:5.1}%");
    }
    let _ = writeln!(out, "  Average: {:.1}%", state.cpu.average);
    if let Some(load) = &state.load {
        let _ = writeln!(
            out,
            "  Load: {:.2} / {:.2} / {:.2}",
            load.one, load.five, load.fifteen
        );
    }

    let memory = &state.memory;
    let _ = writeln!(out, "\n-- MEMORY --");
    let _ = writeln!(
        out,
        "  Used: {:.1} / {:.1} GB ({:.1}%)",
        memory.used_kb() as f64 / 1_048_576.0,
        memory.total_kb as f64 / 1_048_576.0,
        memory.used_percent()
    );
    let _ = writeln!(
        out,
        "  Available: {:.1} GB",
        memory.available_kb as f64 / 1_048_576.0
    );
    let _ = writeln!(
        out,
        "  Cached: {:.1} GB  Buffers: {:.1} GB",
        memory.cached_kb as f64 / 1_048_576.0,
        memory.buffers_kb as f64 / 1_048_576.0
    );
    if memory.swap_total_kb > 0 {
        let _ = writeln!(
            out,
            "  Swap: {:.1} / {:.1} GB",
            memory.swap_used_kb() as f64 / 1_048_576.0,
            memory.swap_total_kb as f64 / 1_048_576.0
        );
    }

    if !state.temps.is_empty() {
        let _ = writeln!(out, "\n-- TEMPS --");
        for sensor in &state.temps {
            let _ = writeln!(out, "  {:<16} {:4.0}°C", sensor.label, sensor.degrees);
        }
    }

    if !state.fans.is_empty() {
        let _ = writeln!(out, "\n-- FANS --");
        for fan in &state.fans {
            let _ = writeln!(out, "  {:<16} {} RPM", fan.label, fan.rpm);
        }
    }

    if let Some(gpu) = &state.gpu {
        let _ = writeln!(out, "\n-- GPU --");
        let _ = writeln!(out, "  {}", gpu.name);
        let _ = write!(
            out,
            "  Util: {}%  Mem: {}/{} MB  Temp: {}°C",
            gpu.utilization, gpu.mem_used_mb, gpu.mem_total_mb, gpu.temperature
        );
        if gpu.has_power_readings() {
            let _ = write!(out, "  Power: {}W/{}W", gpu.power_watts, gpu.power_limit_watts);
        }
        let _ = writeln!(out);
    }

    if let Some(battery) = &state.battery {
        let _ = writeln!(out, "\n-- BATTERY --");
        let _ = writeln!(out, "  {}% ({})", battery.capacity_percent, battery.status);
    }

    let _ = writeln!(out, "\n-- DISK I/O --");
    let _ = writeln!(out, "  Read:  {}", format::rate(state.disk.read_per_sec));
    let _ = writeln!(out, "  Write: {}", format::rate(state.disk.write_per_sec));

    let _ = writeln!(out, "\n-- NETWORK --");
    let (rx_rate, tx_rate) = state.net_rates();
    let (rx_total, tx_total) = state.net_totals();
    let _ = writeln!(
        out,
        "  Up:   {:>12}  total: {}",
        format::rate(tx_rate),
        format::bytes(tx_total as f64)
    );
    let _ = writeln!(
        out,
        "  Down: {:>12}  total: {}",
        format::rate(rx_rate),
        format::bytes(rx_total as f64)
    );
    for (name, rates) in &state.interfaces {
        let _ = writeln!(
            out,
            "  {:<10} rx {:>12}  tx {:>12}",
            name,
            format::rate(rates.rx_per_sec),
            format::rate(rates.tx_per_sec)
        );
    }

    if !state.processes.is_empty() {
        let _ = writeln!(out, "\n-- PROCESSES (top {REPORT_PROCESSES} by cpu) --");
        for row in state.processes.ranked(SortMode::Cpu).iter().take(REPORT_PROCESSES) {
            let _ = writeln!(
                out,
                "  {:<7} {:<20} {:5.1}%  {:5.1}%",
                row.pid, row.name, row.cpu_percent, row.mem_percent
            );
        }
    }

    if !state.containers.is_empty() {
        let _ = writeln!(
            out,
            "\n-- CONTAINERS ({} running) --",
            state.containers.len()
        );
        for container in &state.containers {
            let _ = writeln!(
                out,
                "  {:<24} {:<12} {}  CPU: {:.1}%  Mem: {:.0} MB",
                container.name,
                container.id,
                container.status,
                container.cpu_percent,
                container.mem_mb
            );
        }
    }

    let _ = writeln!(out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::TickReading;
    use crate::metrics::rate::{CpuCounters, CpuReading};
    use crate::sensors::battery::BatteryFacts;
    use crate::sensors::gpu::GpuFacts;
    use crate::sensors::memory::MemoryReading;

    fn base_state() -> DashState {
        let mut state = DashState::new(Theme::default(), AlertThresholds::default());
        let reading = TickReading {
            cpu: Some(CpuReading {
                aggregate: CpuCounters {
                    user: 100,
                    idle: 900,
                    ..CpuCounters::default()
                },
                cores: vec![CpuCounters::default(); 2],
            }),
            memory: MemoryReading {
                total_kb: 8_388_608,
                available_kb: 4_194_304,
                ..MemoryReading::default()
            },
            uptime_seconds: 3_700.0,
            ..TickReading::default()
        };
        state.apply(reading, 1.0);
        state
    }

    #[test]
    fn absent_sources_omit_their_sections() {
        let state = base_state();
        let report = render_report(&state, "2026-01-01 00:00:00");
        assert!(!report.contains("-- GPU --"));
        assert!(!report.contains("-- BATTERY --"));
        assert!(!report.contains("-- TEMPS --"));
        assert!(!report.contains("-- FANS --"));
        assert!(!report.contains("-- CONTAINERS"));
        assert!(report.contains("-- CPU --"));
        assert!(report.contains("-- MEMORY --"));
        assert!(report.contains("-- DISK I/O --"));
        assert!(report.contains("-- NETWORK --"));
    }

    #[test]
    fn present_sources_get_their_sections() {
        let mut state = base_state();
        state.gpu = Some(GpuFacts {
            name: "TestCard".into(),
            temperature: 50,
            fan_percent: 30,
            utilization: 12,
            mem_utilization: 4,
            mem_used_mb: 512,
            mem_total_mb: 8_192,
            power_watts: 60,
            power_limit_watts: 200,
        });
        state.battery = Some(BatteryFacts {
            capacity_percent: 73,
            status: "Discharging".into(),
            charging: false,
        });
        let report = render_report(&state, "2026-01-01 00:00:00");
        assert!(report.contains("-- GPU --"));
        assert!(report.contains("TestCard"));
        assert!(report.contains("Power: 60W/200W"));
        assert!(report.contains("-- BATTERY --"));
        assert!(report.contains("73% (Discharging)"));
    }

    #[test]
    fn report_reflects_memory_math() {
        let state = base_state();
        let report = render_report(&state, "2026-01-01 00:00:00");
        assert!(report.contains("Used: 4.0 / 8.0 GB (50.0%)"));
        assert!(report.contains("Uptime: 0d 1h 1m"));
    }
}

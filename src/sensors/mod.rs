//! The sensor feed: raw point-in-time readings from procfs, sysfs, and
//! spawned inspection commands.
//!
//! Every reader degrades rather than fails: a missing source means the
//! feature is absent this tick, and a malformed record is skipped without
//! aborting its enumeration.

pub mod battery;
pub mod cpu;
pub mod disk;
pub mod docker;
pub mod gpu;
pub mod memory;
pub mod net;
pub mod procs;
pub mod system;
pub mod thermal;

use thiserror::Error;

use crate::core::state::{SensorCadence, TickReading};

#[derive(Debug, Error)]
pub enum SensorError {
    #[error("sensor read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed sensor data: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, SensorError>;

/// Gathers one tick's raw readings from the live feed, honoring the
/// expensive-sensor cadence. Degraded sources log at debug and come back
/// empty.
pub fn collect(cadence: &mut SensorCadence) -> TickReading {
    let memory = memory::read().unwrap_or_else(|err| {
        tracing::debug!(%err, "memory source degraded");
        memory::MemoryReading::default()
    });
    let cpu = cpu::read()
        .map_err(|err| tracing::debug!(%err, "cpu source degraded"))
        .ok();
    let load = system::load_average().ok();
    let uptime_seconds = system::uptime_seconds().unwrap_or(0.0);
    let interfaces = net::read().unwrap_or_else(|err| {
        tracing::debug!(%err, "network source degraded");
        Default::default()
    });
    let disk = disk::read().unwrap_or_else(|err| {
        tracing::debug!(%err, "disk source degraded");
        Default::default()
    });

    TickReading {
        cpu,
        memory,
        load,
        uptime_seconds,
        temps: thermal::read_temps(),
        fans: thermal::read_fans(),
        interfaces,
        disk,
        processes: procs::read(memory.total_kb),
        system_ticks: (uptime_seconds * system::USER_HZ) as u64,
        gpu: cadence.gpu.tick(gpu::read).clone(),
        containers: cadence.containers.tick(docker::read).clone(),
        battery: cadence.battery.tick(battery::read).clone(),
    }
}

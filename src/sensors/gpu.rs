//! Optional GPU facts via a spawned `nvidia-smi` query.

use std::process::Command;

const QUERY: &str = "name,temperature.gpu,fan.speed,utilization.gpu,\
utilization.memory,memory.used,memory.total,power.draw,power.limit";

#[derive(Debug, Clone, PartialEq)]
pub struct GpuFacts {
    pub name: String,
    pub temperature: i64,
    pub fan_percent: i64,
    pub utilization: i64,
    pub mem_utilization: i64,
    pub mem_used_mb: i64,
    pub mem_total_mb: i64,
    pub power_watts: i64,
    pub power_limit_watts: i64,
}

impl GpuFacts {
    pub fn mem_percent(&self) -> f64 {
        if self.mem_total_mb <= 0 {
            return 0.0;
        }
        self.mem_used_mb as f64 / self.mem_total_mb as f64 * 100.0
    }

    pub fn has_power_readings(&self) -> bool {
        self.power_watts > 0
    }
}

/// Queries the first GPU. Any spawn, exit-status, or parse failure means
/// the GPU feed is absent this refresh.
pub fn read() -> Option<GpuFacts> {
    let output = Command::new("nvidia-smi")
        .arg(format!("--query-gpu={QUERY}"))
        .arg("--format=csv,noheader,nounits")
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    parse(text.lines().next()?)
}

/// Parses one CSV line of the query above. The name and the six core
/// numeric fields are required; power readings are optional.
pub fn parse(line: &str) -> Option<GpuFacts> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < 7 || fields[0].is_empty() {
        return None;
    }
    let number = |index: usize| {
        fields
            .get(index)
            .and_then(|value| value.parse::<f64>().ok())
            .map(|value| value as i64)
    };
    Some(GpuFacts {
        name: fields[0].to_string(),
        temperature: number(1)?,
        fan_percent: number(2)?,
        utilization: number(3)?,
        mem_utilization: number(4)?,
        mem_used_mb: number(5)?,
        mem_total_mb: number(6)?,
        power_watts: number(7).unwrap_or(0),
        power_limit_watts: number(8).unwrap_or(0),
    })
}

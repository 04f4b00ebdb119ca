//! `/proc/meminfo` aggregate memory facts.

use super::Result;

const PROC_MEMINFO: &str = "/proc/meminfo";

/// Aggregate memory counters in kilobytes, as the kernel reports them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryReading {
    pub total_kb: u64,
    pub available_kb: u64,
    pub buffers_kb: u64,
    pub cached_kb: u64,
    pub swap_total_kb: u64,
    pub swap_free_kb: u64,
}

impl MemoryReading {
    pub fn used_kb(&self) -> u64 {
        self.total_kb.saturating_sub(self.available_kb)
    }

    pub fn used_percent(&self) -> f64 {
        if self.total_kb == 0 {
            return 0.0;
        }
        self.used_kb() as f64 / self.total_kb as f64 * 100.0
    }

    pub fn swap_used_kb(&self) -> u64 {
        self.swap_total_kb.saturating_sub(self.swap_free_kb)
    }
}

pub fn read() -> Result<MemoryReading> {
    Ok(parse(&std::fs::read_to_string(PROC_MEMINFO)?))
}

/// Scans for the handful of fields the dashboard uses; unknown or
/// malformed lines are ignored.
pub fn parse(meminfo: &str) -> MemoryReading {
    let mut reading = MemoryReading::default();
    for line in meminfo.lines() {
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        let Some(value) = rest.split_whitespace().next().and_then(|v| v.parse().ok()) else {
            continue;
        };
        match key {
            "MemTotal" => reading.total_kb = value,
            "MemAvailable" => reading.available_kb = value,
            "Buffers" => reading.buffers_kb = value,
            "Cached" => reading.cached_kb = value,
            "SwapTotal" => reading.swap_total_kb = value,
            "SwapFree" => reading.swap_free_kb = value,
            _ => {}
        }
    }
    reading
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEMINFO: &str = "\
MemTotal:       16384000 kB
MemFree:         1024000 kB
MemAvailable:    8192000 kB
Buffers:          512000 kB
Cached:          4096000 kB
SwapCached:            0 kB
SwapTotal:       2048000 kB
SwapFree:        2000000 kB
";

    #[test]
    fn parses_the_fields_the_dashboard_uses() {
        let reading = parse(MEMINFO);
        assert_eq!(reading.total_kb, 16_384_000);
        assert_eq!(reading.available_kb, 8_192_000);
        assert_eq!(reading.used_kb(), 8_192_000);
        assert_eq!(reading.used_percent(), 50.0);
        assert_eq!(reading.swap_used_kb(), 48_000);
    }

    #[test]
    fn malformed_lines_are_ignored() {
        let reading = parse("MemTotal: garbage\nMemAvailable:    100 kB\n");
        assert_eq!(reading.total_kb, 0);
        assert_eq!(reading.available_kb, 100);
        assert_eq!(reading.used_percent(), 0.0);
    }
}

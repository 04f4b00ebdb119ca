//! `/sys/class/power_supply` battery facts.

use std::path::Path;

const SUPPLIES: [&str; 2] = [
    "/sys/class/power_supply/BAT0",
    "/sys/class/power_supply/BAT1",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatteryFacts {
    pub capacity_percent: u8,
    pub status: String,
    pub charging: bool,
}

/// Reads the first present battery; desktops without one report `None`.
pub fn read() -> Option<BatteryFacts> {
    SUPPLIES.iter().map(Path::new).find_map(read_supply)
}

fn read_supply(base: &Path) -> Option<BatteryFacts> {
    let present = std::fs::read_to_string(base.join("present")).ok()?;
    if present.trim() != "1" {
        return None;
    }
    let capacity = std::fs::read_to_string(base.join("capacity"))
        .ok()?
        .trim()
        .parse()
        .ok()?;
    let status = std::fs::read_to_string(base.join("status"))
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|_| "Unknown".to_string());
    let charging = status == "Charging";
    Some(BatteryFacts {
        capacity_percent: capacity,
        status,
        charging,
    })
}

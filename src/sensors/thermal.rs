//! `/sys/class/hwmon` temperature and fan sensors.

use std::path::{Path, PathBuf};

const SYS_HWMON: &str = "/sys/class/hwmon";
const MAX_TEMP_SENSORS: usize = 32;
const MAX_FAN_SENSORS: usize = 16;

#[derive(Debug, Clone, PartialEq)]
pub struct TempSensor {
    pub label: String,
    pub degrees: f64,
    pub high: Option<f64>,
    pub critical: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FanSensor {
    pub label: String,
    pub rpm: u32,
}

/// Enumerates temperature inputs across all hwmon chips. No hwmon tree,
/// or an empty one, yields an empty list.
pub fn read_temps() -> Vec<TempSensor> {
    let mut sensors = Vec::new();
    for chip in chips() {
        for index in 1..20 {
            if sensors.len() >= MAX_TEMP_SENSORS {
                return sensors;
            }
            let Some(millidegrees) = read_number(&chip.join(format!("temp{index}_input"))) else {
                break;
            };
            let label = sensor_label(
                read_line(&chip.join(format!("temp{index}_label"))),
                read_line(&chip.join("name")),
                index,
                sensors.len(),
            );
            sensors.push(TempSensor {
                label,
                degrees: millidegrees / 1000.0,
                high: read_number(&chip.join(format!("temp{index}_max")))
                    .map(|v| v / 1000.0)
                    .filter(|v| *v > 0.0),
                critical: read_number(&chip.join(format!("temp{index}_crit")))
                    .map(|v| v / 1000.0)
                    .filter(|v| *v > 0.0),
            });
        }
    }
    sensors
}

/// Enumerates fan tachometer inputs across all hwmon chips.
pub fn read_fans() -> Vec<FanSensor> {
    let mut fans = Vec::new();
    for chip in chips() {
        for index in 1..10 {
            if fans.len() >= MAX_FAN_SENSORS {
                return fans;
            }
            let Some(rpm) = read_number(&chip.join(format!("fan{index}_input"))) else {
                break;
            };
            let label = read_line(&chip.join(format!("fan{index}_label")))
                .unwrap_or_else(|| format!("Fan {index}"));
            fans.push(FanSensor {
                label,
                rpm: rpm.max(0.0) as u32,
            });
        }
    }
    fans
}

/// Hwmon chip directories, sorted by name for stable panel ordering.
fn chips() -> Vec<PathBuf> {
    let Ok(dir) = std::fs::read_dir(SYS_HWMON) else {
        return Vec::new();
    };
    let mut chips: Vec<PathBuf> = dir.flatten().map(|entry| entry.path()).collect();
    chips.sort();
    chips
}

fn read_line(path: &Path) -> Option<String> {
    let text = std::fs::read_to_string(path).ok()?;
    let line = text.lines().next()?.trim();
    (!line.is_empty()).then(|| line.to_string())
}

fn read_number(path: &Path) -> Option<f64> {
    read_line(path)?.parse().ok()
}

/// Label precedence: the sensor's own label file, then `<chip> #N`, then a
/// positional fallback.
fn sensor_label(
    label: Option<String>,
    chip_name: Option<String>,
    index: usize,
    position: usize,
) -> String {
    label.unwrap_or_else(|| match chip_name {
        Some(name) => format!("{name} #{index}"),
        None => format!("sensor{position}"),
    })
}

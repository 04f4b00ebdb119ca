//! Uptime and load-average facts.

use super::Result;

const PROC_UPTIME: &str = "/proc/uptime";
const PROC_LOADAVG: &str = "/proc/loadavg";

/// Kernel tick rate used to convert uptime seconds into USER_HZ ticks.
/// 100 on every mainstream Linux target.
pub const USER_HZ: f64 = 100.0;

/// 1/5/15-minute load averages.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoadAvg {
    pub one: f64,
    pub five: f64,
    pub fifteen: f64,
}

pub fn uptime_seconds() -> Result<f64> {
    parse_uptime(&std::fs::read_to_string(PROC_UPTIME)?)
        .ok_or_else(|| super::SensorError::Parse("uptime".into()))
}

pub fn load_average() -> Result<LoadAvg> {
    parse_loadavg(&std::fs::read_to_string(PROC_LOADAVG)?)
        .ok_or_else(|| super::SensorError::Parse("loadavg".into()))
}

pub fn parse_uptime(text: &str) -> Option<f64> {
    text.split_whitespace().next()?.parse().ok()
}

pub fn parse_loadavg(text: &str) -> Option<LoadAvg> {
    let mut fields = text.split_whitespace();
    Some(LoadAvg {
        one: fields.next()?.parse().ok()?,
        five: fields.next()?.parse().ok()?,
        fifteen: fields.next()?.parse().ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_uptime_first_field() {
        assert_eq!(parse_uptime("12345.67 99999.99\n"), Some(12345.67));
        assert_eq!(parse_uptime(""), None);
    }

    #[test]
    fn parses_three_load_fields() {
        let load = parse_loadavg("0.52 1.04 2.08 2/1234 5678\n").unwrap();
        assert_eq!(load.one, 0.52);
        assert_eq!(load.five, 1.04);
        assert_eq!(load.fifteen, 2.08);
        assert!(parse_loadavg("0.52 1.04").is_none());
    }
}

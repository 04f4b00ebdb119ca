//! Human-readable formatting for byte counts, rates, and durations.

/// Formats a byte count, stepping units by 1024.
pub fn bytes(value: f64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut value = value.max(0.0);
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

/// Formats a per-second byte rate, stepping units by 1024.
pub fn rate(value: f64) -> String {
    const UNITS: [&str; 4] = ["B/s", "KB/s", "MB/s", "GB/s"];
    let mut value = value.max(0.0);
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

/// Formats an uptime as days, hours, and minutes.
pub fn uptime(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    format!("{days}d {hours}h {minutes}m")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_steps_by_1024() {
        assert_eq!(bytes(0.0), "0.0 B");
        assert_eq!(bytes(1023.0), "1023.0 B");
        assert_eq!(bytes(1024.0), "1.0 KB");
        assert_eq!(bytes(1536.0), "1.5 KB");
        assert_eq!(bytes(1024.0 * 1024.0 * 1024.0), "1.0 GB");
    }

    #[test]
    fn one_mebibyte_per_second_reads_as_one_mb() {
        assert_eq!(rate(1_048_576.0), "1.0 MB/s");
    }

    #[test]
    fn rate_saturates_at_gb() {
        assert_eq!(rate(3.0 * 1024.0 * 1024.0 * 1024.0 * 1024.0), "3072.0 GB/s");
    }

    #[test]
    fn uptime_breaks_into_fields() {
        assert_eq!(uptime(0.0), "0d 0h 0m");
        assert_eq!(uptime(90_061.0), "1d 1h 1m");
    }
}

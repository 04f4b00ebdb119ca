//! `/proc/<pid>` process enumeration.

use crate::metrics::process::{ProcessEntry, MAX_PROCESSES};

/// Page size on every mainstream Linux target.
pub const PAGE_SIZE_BYTES: u64 = 4096;

/// Enumerates every running process once. Entries that disappear or turn
/// malformed mid-scan are skipped; the scan truncates silently at
/// [`MAX_PROCESSES`].
pub fn read(mem_total_kb: u64) -> Vec<ProcessEntry> {
    let Ok(dir) = std::fs::read_dir("/proc") else {
        return Vec::new();
    };
    let mut entries = Vec::new();
    for dirent in dir.flatten() {
        if entries.len() >= MAX_PROCESSES {
            break;
        }
        let file_name = dirent.file_name();
        let Some(pid) = file_name.to_str().and_then(|name| name.parse::<i32>().ok()) else {
            continue;
        };
        let Ok(stat) = std::fs::read_to_string(format!("/proc/{pid}/stat")) else {
            continue;
        };
        let Some((name, cpu_ticks)) = parse_stat_line(&stat) else {
            continue;
        };
        let resident_pages = std::fs::read_to_string(format!("/proc/{pid}/statm"))
            .ok()
            .and_then(|text| parse_statm(&text))
            .unwrap_or(0);
        entries.push(ProcessEntry {
            pid,
            name,
            cpu_ticks,
            mem_percent: mem_percent(resident_pages, mem_total_kb),
        });
    }
    entries
}

/// Extracts the comm (between parens, which may themselves contain parens
/// and spaces) and utime+stime from a `/proc/<pid>/stat` line.
pub fn parse_stat_line(line: &str) -> Option<(String, u64)> {
    let open = line.find('(')?;
    let close = line.rfind(')')?;
    let name = line.get(open + 1..close)?.to_string();
    let rest = line.get(close + 2..)?;
    // After the comm: state is field 0, utime field 11, stime field 12.
    let mut fields = rest.split_whitespace();
    let utime: u64 = fields.nth(11)?.parse().ok()?;
    let stime: u64 = fields.next()?.parse().ok()?;
    Some((name, utime + stime))
}

/// Resident pages are the second field of `/proc/<pid>/statm`.
pub fn parse_statm(text: &str) -> Option<u64> {
    text.split_whitespace().nth(1)?.parse().ok()
}

pub fn mem_percent(resident_pages: u64, mem_total_kb: u64) -> f64 {
    if mem_total_kb == 0 {
        return 0.0;
    }
    let resident_kb = resident_pages as f64 * PAGE_SIZE_BYTES as f64 / 1024.0;
    resident_kb / mem_total_kb as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comm_and_cpu_ticks() {
        let line = "1234 (myproc) S 1 1234 1234 0 -1 4194304 100 0 0 0 250 150 0 0 20 0 4 0 12345 1000000 500 18446744073709551615";
        let (name, ticks) = parse_stat_line(line).unwrap();
        assert_eq!(name, "myproc");
        assert_eq!(ticks, 400);
    }

    #[test]
    fn comm_may_contain_spaces_and_parens() {
        let line = "42 (Web Content (x)) R 1 42 42 0 -1 0 0 0 0 0 7 3 0 0 20 0 1 0 1 1 1 1";
        let (name, ticks) = parse_stat_line(line).unwrap();
        assert_eq!(name, "Web Content (x)");
        assert_eq!(ticks, 10);
    }

    #[test]
    fn truncated_stat_line_is_rejected() {
        assert!(parse_stat_line("77 (short) S 1 2 3").is_none());
        assert!(parse_stat_line("no parens here").is_none());
    }

    #[test]
    fn statm_second_field_is_resident_pages() {
        assert_eq!(parse_statm("2500 612 300 50 0 800 0"), Some(612));
        assert_eq!(parse_statm("2500"), None);
    }

    #[test]
    fn mem_percent_scales_pages_against_total() {
        // 256 pages * 4096 B = 1024 kB of 16384 kB total.
        assert_eq!(mem_percent(256, 16_384), 6.25);
        assert_eq!(mem_percent(256, 0), 0.0);
    }
}

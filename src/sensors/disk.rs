//! `/proc/diskstats` cumulative sector counters.

use super::Result;
use crate::metrics::rate::DiskCounters;

const PROC_DISKSTATS: &str = "/proc/diskstats";
const SECTOR_BYTES: u64 = 512;

pub fn read() -> Result<DiskCounters> {
    Ok(parse(&std::fs::read_to_string(PROC_DISKSTATS)?))
}

/// Sums sectors read/written over whole physical devices: minor number 0
/// only (partitions excluded), `loop*` and `ram*` devices skipped.
pub fn parse(text: &str) -> DiskCounters {
    let mut totals = DiskCounters::default();
    for line in text.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let (Some(minor), Some(name), Some(read_sectors), Some(written_sectors)) = (
            fields.get(1).and_then(|v| v.parse::<u32>().ok()),
            fields.get(2),
            fields.get(5).and_then(|v| v.parse::<u64>().ok()),
            fields.get(9).and_then(|v| v.parse::<u64>().ok()),
        ) else {
            continue;
        };
        if minor != 0 || name.starts_with("loop") || name.starts_with("ram") {
            continue;
        }
        totals.read_bytes += read_sectors * SECTOR_BYTES;
        totals.written_bytes += written_sectors * SECTOR_BYTES;
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    const DISKSTATS: &str = "\
   7       0 loop0 100 0 8000 50 0 0 0 0 0 40 50
   1       0 ram0 10 0 800 5 0 0 0 0 0 4 5
   8       0 sda 26208 6084 2819148 9505 10945 7214 1554176 12000 0 7632 21530
   8       1 sda1 25988 5356 2808426 9471 8104 7142 1554176 11000 0 7020 20480
 259       0 nvme0n1 1000 0 200000 300 2000 0 400000 500 0 600 800
";

    #[test]
    fn sums_whole_devices_only() {
        let totals = parse(DISKSTATS);
        // sda + nvme0n1; partitions, loop, and ram devices excluded.
        assert_eq!(totals.read_bytes, (2_819_148 + 200_000) * 512);
        assert_eq!(totals.written_bytes, (1_554_176 + 400_000) * 512);
    }

    #[test]
    fn short_lines_are_skipped() {
        let totals = parse("8 0 sda 1 2 3\n");
        assert_eq!(totals, DiskCounters::default());
    }
}

//! `/proc/net/dev` cumulative interface counters.

use super::Result;
use crate::metrics::rate::IfaceCounters;
use indexmap::IndexMap;

const PROC_NET_DEV: &str = "/proc/net/dev";

pub fn read() -> Result<IndexMap<String, IfaceCounters>> {
    Ok(parse(&std::fs::read_to_string(PROC_NET_DEV)?))
}

/// Parses per-interface rx/tx byte counters. The loopback interface is
/// excluded; malformed lines are skipped.
pub fn parse(text: &str) -> IndexMap<String, IfaceCounters> {
    let mut interfaces = IndexMap::new();
    // The first two lines are column headers.
    for line in text.lines().skip(2) {
        let Some((name, counters)) = line.split_once(':') else {
            continue;
        };
        let name = name.trim();
        if name == "lo" {
            continue;
        }
        let fields: Vec<&str> = counters.split_whitespace().collect();
        // rx bytes is the first receive column, tx bytes the ninth.
        let (Some(rx), Some(tx)) = (
            fields.first().and_then(|v| v.parse().ok()),
            fields.get(8).and_then(|v| v.parse().ok()),
        ) else {
            continue;
        };
        interfaces.insert(
            name.to_string(),
            IfaceCounters {
                rx_bytes: rx,
                tx_bytes: tx,
            },
        );
    }
    interfaces
}

#[cfg(test)]
mod tests {
    use super::*;

    const NET_DEV: &str = "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
    lo: 1000000    1000    0    0    0     0          0         0  1000000    1000    0    0    0     0       0          0
  eth0: 5000000    4000    0    0    0     0          0         0  2500000    2000    0    0    0     0       0          0
 wlan0: 7000000    6000    0    0    0     0          0         0   900000     800    0    0    0     0       0          0
";

    #[test]
    fn excludes_loopback_and_keys_by_name() {
        let interfaces = parse(NET_DEV);
        assert_eq!(interfaces.len(), 2);
        assert!(!interfaces.contains_key("lo"));
        assert_eq!(interfaces["eth0"].rx_bytes, 5_000_000);
        assert_eq!(interfaces["eth0"].tx_bytes, 2_500_000);
        assert_eq!(interfaces["wlan0"].tx_bytes, 900_000);
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let text = "h1\nh2\n  eth0: not numbers\n  eth1: 10 0 0 0 0 0 0 0 20 0\n";
        let interfaces = parse(text);
        assert_eq!(interfaces.len(), 1);
        assert_eq!(interfaces["eth1"].tx_bytes, 20);
    }
}

//! `/proc/stat` CPU time-in-state counters.

use super::{Result, SensorError};
use crate::metrics::rate::{CpuCounters, CpuReading};

const PROC_STAT: &str = "/proc/stat";

pub fn read() -> Result<CpuReading> {
    parse(&std::fs::read_to_string(PROC_STAT)?)
}

/// Parses the leading `cpu`/`cpuN` block; the first non-cpu entry ends the
/// scan. Malformed cpu lines are skipped.
pub fn parse(stat: &str) -> Result<CpuReading> {
    let mut aggregate = None;
    let mut cores = Vec::new();

    for line in stat.lines() {
        if !line.starts_with("cpu") {
            break;
        }
        let Some((tag, fields)) = line.split_once(char::is_whitespace) else {
            continue;
        };
        let Some(counters) = parse_counters(fields) else {
            continue;
        };
        if tag == "cpu" {
            aggregate = Some(counters);
        } else {
            cores.push(counters);
        }
    }

    match aggregate {
        Some(aggregate) => Ok(CpuReading { aggregate, cores }),
        None => Err(SensorError::Parse("no aggregate cpu line".into())),
    }
}

fn parse_counters(fields: &str) -> Option<CpuCounters> {
    let mut values = fields
        .split_whitespace()
        .map(|token| token.parse::<u64>());
    let mut next = || values.next().and_then(|v| v.ok());
    Some(CpuCounters {
        user: next()?,
        nice: next()?,
        system: next()?,
        idle: next()?,
        iowait: next()?,
        irq: next()?,
        softirq: next()?,
        steal: next()?,
    })
}

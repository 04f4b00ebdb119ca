//! Container-engine feed via the spawned docker CLI.
//!
//! Both calls use `--format '{{json .}}'` so every output line is a single
//! JSON record; stats are joined to the enumeration by container name.

use serde::Deserialize;
use std::process::Command;

#[derive(Debug, Clone, PartialEq)]
pub struct ContainerFacts {
    pub name: String,
    pub id: String,
    pub status: String,
    pub cpu_percent: f64,
    pub mem_mb: f64,
}

#[derive(Deserialize)]
struct PsRecord {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Names")]
    names: String,
    #[serde(rename = "Status")]
    status: String,
}

#[derive(Deserialize)]
struct StatsRecord {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "CPUPerc")]
    cpu_perc: String,
    #[serde(rename = "MemUsage")]
    mem_usage: String,
}

/// Lists running containers with stats joined in. A missing or failing
/// engine yields an empty list — the feature is simply absent this
/// refresh.
pub fn read() -> Vec<ContainerFacts> {
    let Some(ps) = run(&["ps", "--format", "{{json .}}"]) else {
        return Vec::new();
    };
    let mut containers = parse_ps(&ps);
    if containers.is_empty() {
        return containers;
    }
    if let Some(stats) = run(&["stats", "--no-stream", "--format", "{{json .}}"]) {
        join_stats(&mut containers, &stats);
    }
    containers
}

fn run(args: &[&str]) -> Option<String> {
    let output = Command::new("docker").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout).ok()
}

fn parse_ps(text: &str) -> Vec<ContainerFacts> {
    text.lines()
        .filter_map(|line| {
            let record: PsRecord = serde_json::from_str(line).ok()?;
            Some(ContainerFacts {
                name: record.names,
                id: record.id.chars().take(12).collect(),
                status: record.status,
                cpu_percent: 0.0,
                mem_mb: 0.0,
            })
        })
        .collect()
}

fn join_stats(containers: &mut [ContainerFacts], text: &str) {
    for line in text.lines() {
        let Ok(record) = serde_json::from_str::<StatsRecord>(line) else {
            continue;
        };
        if let Some(container) = containers.iter_mut().find(|c| c.name == record.name) {
            container.cpu_percent = parse_percent(&record.cpu_perc);
            container.mem_mb = parse_mem_mb(&record.mem_usage);
        }
    }
}

fn parse_percent(text: &str) -> f64 {
    text.trim().trim_end_matches('%').parse().unwrap_or(0.0)
}

/// Parses the used side of a stats memory column ("10.5MiB / 1.944GiB")
/// into megabytes.
fn parse_mem_mb(text: &str) -> f64 {
    let used = text.split('/').next().unwrap_or("").trim();
    let unit_start = used
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(used.len());
    let value: f64 = used[..unit_start].parse().unwrap_or(0.0);
    match used[unit_start..].trim() {
        "GiB" | "GB" => value * 1024.0,
        "KiB" | "kB" => value / 1024.0,
        "B" => value / (1024.0 * 1024.0),
        _ => value,
    }
}

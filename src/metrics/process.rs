//! Per-process CPU attribution and the sortable process table.

use indexmap::IndexMap;

/// Raw facts about one process from a single enumeration pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessEntry {
    pub pid: i32,
    pub name: String,
    /// Cumulative utime + stime, in USER_HZ ticks.
    pub cpu_ticks: u64,
    pub mem_percent: f64,
}

/// One ranked row of the table.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessRow {
    pub pid: i32,
    pub name: String,
    pub cpu_percent: f64,
    pub mem_percent: f64,
}

/// Orderings selectable from the key dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Cpu,
    Memory,
    Pid,
}

impl SortMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Memory => "mem",
            Self::Pid => "pid",
        }
    }
}

/// Rows below this on both axes are hidden from the ranked view.
const VISIBILITY_EPSILON: f64 = 0.05;

/// Hard cap on the per-tick enumeration; anything past it is silently
/// dropped.
pub const MAX_PROCESSES: usize = 1024;

/// Rebuilds the process set every tick, attributing CPU time against the
/// previous tick's snapshot.
///
/// Matching is keyed by pid. A pid absent from the new enumeration is
/// forgotten entirely; a pid never seen before gets 0% CPU on its first
/// appearance.
#[derive(Debug, Default)]
pub struct ProcessTable {
    prev_ticks: IndexMap<i32, u64>,
    prev_system_ticks: Option<u64>,
    rows: Vec<ProcessRow>,
}

impl ProcessTable {
    /// Replaces the retained snapshot with `entries` and computes each
    /// row's CPU share of the elapsed system time.
    ///
    /// `system_ticks` is sampled once per tick and shared by every row; a
    /// process pinned to one core tops out at 100% while multi-threaded
    /// ones can reach `core_count * 100`.
    pub fn rebuild(&mut self, entries: Vec<ProcessEntry>, system_ticks: u64, core_count: usize) {
        let delta_system = match self.prev_system_ticks {
            Some(prev) if system_ticks > prev => system_ticks - prev,
            _ => 0,
        };

        let mut next_ticks = IndexMap::with_capacity(entries.len().min(MAX_PROCESSES));
        let mut rows = Vec::with_capacity(entries.len().min(MAX_PROCESSES));
        for entry in entries.into_iter().take(MAX_PROCESSES) {
            let cpu_percent = match self.prev_ticks.get(&entry.pid) {
                Some(&prev) if delta_system > 0 && entry.cpu_ticks >= prev => {
                    (entry.cpu_ticks - prev) as f64 / delta_system as f64
                        * 100.0
                        * core_count as f64
                }
                _ => 0.0,
            };
            next_ticks.insert(entry.pid, entry.cpu_ticks);
            rows.push(ProcessRow {
                pid: entry.pid,
                name: entry.name,
                cpu_percent,
                mem_percent: entry.mem_percent,
            });
        }

        self.prev_ticks = next_ticks;
        self.prev_system_ticks = Some(system_ticks);
        self.rows = rows;
    }

    /// Every row from the latest rebuild, unranked and unfiltered.
    pub fn rows(&self) -> &[ProcessRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The ranked view: ordered by `sort`, with idle rows (both CPU and
    /// memory under the visibility epsilon) hidden. Hidden rows still
    /// participate in next-tick matching. Tie order is unspecified.
    pub fn ranked(&self, sort: SortMode) -> Vec<&ProcessRow> {
        let mut view: Vec<&ProcessRow> = self
            .rows
            .iter()
            .filter(|row| {
                row.cpu_percent >= VISIBILITY_EPSILON || row.mem_percent >= VISIBILITY_EPSILON
            })
            .collect();
        match sort {
            SortMode::Cpu => {
                view.sort_unstable_by(|a, b| b.cpu_percent.total_cmp(&a.cpu_percent));
            }
            SortMode::Memory => {
                view.sort_unstable_by(|a, b| b.mem_percent.total_cmp(&a.mem_percent));
            }
            SortMode::Pid => view.sort_unstable_by(|a, b| b.pid.cmp(&a.pid)),
        }
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(pid: i32, cpu_ticks: u64, mem_percent: f64) -> ProcessEntry {
        ProcessEntry {
            pid,
            name: format!("proc{pid}"),
            cpu_ticks,
            mem_percent,
        }
    }

    #[test]
    fn matched_pid_gets_scaled_cpu_share() {
        let mut table = ProcessTable::default();
        table.rebuild(vec![entry(42, 100, 1.0)], 5_000, 4);
        table.rebuild(vec![entry(42, 110, 1.0)], 5_100, 4);
        // (110-100)/(5100-5000) * 100 * 4 cores = 40%.
        assert_eq!(table.rows()[0].cpu_percent, 40.0);
    }

    #[test]
    fn new_pid_starts_at_zero_cpu() {
        let mut table = ProcessTable::default();
        table.rebuild(vec![entry(1, 500, 1.0)], 1_000, 4);
        table.rebuild(vec![entry(1, 510, 1.0), entry(99, 9_000, 1.0)], 1_100, 4);
        let by_pid: IndexMap<i32, f64> = table
            .rows()
            .iter()
            .map(|r| (r.pid, r.cpu_percent))
            .collect();
        assert_eq!(by_pid[&99], 0.0);
        assert!(by_pid[&1] > 0.0);
    }

    #[test]
    fn exited_pid_vanishes_from_the_table() {
        let mut table = ProcessTable::default();
        table.rebuild(vec![entry(1, 10, 1.0), entry(2, 10, 1.0)], 1_000, 1);
        table.rebuild(vec![entry(1, 20, 1.0)], 1_100, 1);
        assert!(table.rows().iter().all(|r| r.pid != 2));
        assert!(table.ranked(SortMode::Pid).iter().all(|r| r.pid != 2));
    }

    #[test]
    fn restarted_pid_with_regressed_ticks_reads_zero() {
        let mut table = ProcessTable::default();
        table.rebuild(vec![entry(7, 9_000, 1.0)], 1_000, 1);
        table.rebuild(vec![entry(7, 5, 1.0)], 1_100, 1);
        assert_eq!(table.rows()[0].cpu_percent, 0.0);
    }

    #[test]
    fn idle_rows_hide_from_view_but_still_match_next_tick() {
        let mut table = ProcessTable::default();
        table.rebuild(vec![entry(3, 100, 0.01)], 1_000, 1);
        table.rebuild(vec![entry(3, 100, 0.01)], 1_100, 1);
        assert!(table.ranked(SortMode::Cpu).is_empty());
        assert_eq!(table.len(), 1);

        // The retained snapshot still carries pid 3, so a burst of CPU
        // time on the next tick is attributed against it.
        table.rebuild(vec![entry(3, 200, 0.01)], 1_200, 1);
        assert_eq!(table.rows()[0].cpu_percent, 100.0);
        assert_eq!(table.ranked(SortMode::Cpu).len(), 1);
    }

    #[test]
    fn orderings_rank_by_their_key_descending() {
        let mut table = ProcessTable::default();
        table.rebuild(
            vec![entry(10, 0, 5.0), entry(20, 0, 9.0), entry(30, 0, 1.0)],
            1_000,
            1,
        );

        let by_mem: Vec<i32> = table.ranked(SortMode::Memory).iter().map(|r| r.pid).collect();
        assert_eq!(by_mem, vec![20, 10, 30]);

        let by_pid: Vec<i32> = table.ranked(SortMode::Pid).iter().map(|r| r.pid).collect();
        assert_eq!(by_pid, vec![30, 20, 10]);

        // All CPU shares tie at zero here; any order is acceptable.
        assert_eq!(table.ranked(SortMode::Cpu).len(), 3);
    }

    #[test]
    fn enumeration_truncates_at_capacity() {
        let entries: Vec<ProcessEntry> = (0..(MAX_PROCESSES as i32 + 50))
            .map(|pid| entry(pid, 0, 1.0))
            .collect();
        let mut table = ProcessTable::default();
        table.rebuild(entries, 1_000, 1);
        assert_eq!(table.len(), MAX_PROCESSES);
    }
}

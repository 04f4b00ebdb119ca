//! The sampling-and-derivation engine: everything that turns raw
//! cumulative counters into rates, bounded histories, and ranked tables.

pub mod history;
pub mod process;
pub mod rate;
pub mod throttle;

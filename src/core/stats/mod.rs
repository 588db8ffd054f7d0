//! Host statistics for the `server.stats` section of a notice.
//!
//! Collection is best-effort: each half of the snapshot is dropped
//! independently when its source is unavailable.

mod collector;
mod metrics;

pub use collector::{collect, collect_from, StatsSource, SystemStatsSource};
pub use metrics::{bytes_to_kb, HostStats, LoadReading, LoadStats, MemoryReading, MemoryStats};

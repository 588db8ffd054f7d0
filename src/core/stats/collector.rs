use log::debug;
use sysinfo::{MemoryRefreshKind, RefreshKind, System};

use crate::platform::meminfo::{self, CacheUsage};

use super::metrics::*;

/// Point-in-time host readings. `None` means the source is unavailable.
pub trait StatsSource {
    fn memory(&self) -> Option<MemoryReading>;
    fn load_average(&self) -> Option<LoadReading>;
}

/// Reads the real host through sysinfo and, on Linux, `/proc/meminfo`.
#[derive(Debug, Clone, Copy)]
pub struct SystemStatsSource {
    read_cache: fn() -> Option<CacheUsage>,
}

impl SystemStatsSource {
    pub fn new() -> Self {
        Self::with_cache_reader(meminfo::read_cache_usage)
    }

    /// Use `read_cache` for buffer and page-cache figures.
    pub fn with_cache_reader(read_cache: fn() -> Option<CacheUsage>) -> Self {
        Self { read_cache }
    }
}

impl Default for SystemStatsSource {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsSource for SystemStatsSource {
    fn memory(&self) -> Option<MemoryReading> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return None;
        }

        let refresh = RefreshKind::nothing().with_memory(MemoryRefreshKind::nothing().with_ram());
        let sys = System::new_with_specifics(refresh);
        let total = sys.total_memory();
        if total == 0 {
            return None;
        }

        #[cfg(target_os = "linux")]
        let cache = (self.read_cache)()?;
        #[cfg(not(target_os = "linux"))]
        let cache = (self.read_cache)().unwrap_or_default();

        Some(MemoryReading {
            total_bytes: total,
            free_bytes: sys.free_memory(),
            buffers_bytes: cache.buffers,
            cached_bytes: cache.cached,
        })
    }

    fn load_average(&self) -> Option<LoadReading> {
        // sysinfo reports zeros on Windows, which has no load average
        if cfg!(windows) || !sysinfo::IS_SUPPORTED_SYSTEM {
            return None;
        }

        let load = System::load_average();
        Some(LoadReading {
            one: load.one,
            five: load.five,
            fifteen: load.fifteen,
        })
    }
}

/// Collect host statistics from the running system
pub fn collect() -> HostStats {
    collect_from(&SystemStatsSource::new())
}

/// Collect host statistics from `source`, omitting unavailable halves
pub fn collect_from(source: &dyn StatsSource) -> HostStats {
    let mem = source.memory().map(MemoryStats::from);
    if mem.is_none() {
        debug!("Memory statistics unavailable");
    }

    let load = source.load_average().map(LoadStats::from);
    if load.is_none() {
        debug!("Load average unavailable");
    }

    HostStats { mem, load }
}

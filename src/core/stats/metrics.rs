use serde::{Deserialize, Serialize};

/// Host statistics attached to a notice at serialization time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostStats {
    pub mem: Option<MemoryStats>,
    pub load: Option<LoadStats>,
}

/// Memory usage in kilobytes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryStats {
    pub total: f64,
    pub free: f64,
    pub buffers: f64,
    pub cached: f64,
    pub free_total: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadStats {
    pub one: f64,
    pub five: f64,
    pub fifteen: f64,
}

/// Raw memory figures in bytes, as reported by a [`super::StatsSource`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryReading {
    pub total_bytes: u64,
    pub free_bytes: u64,
    pub buffers_bytes: u64,
    pub cached_bytes: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoadReading {
    pub one: f64,
    pub five: f64,
    pub fifteen: f64,
}

pub fn bytes_to_kb(bytes: u64) -> f64 {
    bytes as f64 / 1024.0
}

impl From<MemoryReading> for MemoryStats {
    fn from(reading: MemoryReading) -> Self {
        let free_total = reading
            .free_bytes
            .saturating_add(reading.buffers_bytes)
            .saturating_add(reading.cached_bytes);

        Self {
            total: bytes_to_kb(reading.total_bytes),
            free: bytes_to_kb(reading.free_bytes),
            buffers: bytes_to_kb(reading.buffers_bytes),
            cached: bytes_to_kb(reading.cached_bytes),
            free_total: bytes_to_kb(free_total),
        }
    }
}

impl From<LoadReading> for LoadStats {
    fn from(reading: LoadReading) -> Self {
        Self {
            one: reading.one,
            five: reading.five,
            fifteen: reading.fifteen,
        }
    }
}

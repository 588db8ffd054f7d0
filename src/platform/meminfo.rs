// Buffer and page-cache sizes, which sysinfo does not expose.

use std::collections::HashMap;

#[cfg(target_os = "linux")]
const MEMINFO_PATH: &str = "/proc/meminfo";

/// Kernel buffer and page-cache usage, in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheUsage {
    pub buffers: u64,
    pub cached: u64,
}

/// Read buffer/cache usage for the current host.
///
/// Returns `None` when the information is not available on this platform.
#[cfg(target_os = "linux")]
pub fn read_cache_usage() -> Option<CacheUsage> {
    let content = std::fs::read_to_string(MEMINFO_PATH).ok()?;
    parse_cache_usage(&content)
}

#[cfg(not(target_os = "linux"))]
pub fn read_cache_usage() -> Option<CacheUsage> {
    None
}

/// Parse `Buffers:` and `Cached:` out of `/proc/meminfo` content.
pub fn parse_cache_usage(content: &str) -> Option<CacheUsage> {
    let fields = parse_meminfo(content);
    let buffers = *fields.get("Buffers")?;
    let cached = *fields.get("Cached")?;
    Some(CacheUsage { buffers, cached })
}

fn parse_meminfo(content: &str) -> HashMap<&str, u64> {
    let mut fields = HashMap::new();
    for line in content.lines() {
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        let mut parts = rest.split_whitespace();
        let Some(value) = parts.next().and_then(|v| v.parse::<u64>().ok()) else {
            continue;
        };
        let bytes = match parts.next() {
            Some("kB") => value * 1024,
            _ => value,
        };
        fields.insert(key.trim(), bytes);
    }
    fields
}

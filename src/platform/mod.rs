// Platform-specific code module

pub mod host;
pub mod meminfo;

// Re-exports for cleaner imports
pub use host::{HostEnvironment, StaticEnvironment, SystemEnvironment};

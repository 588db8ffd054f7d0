// Core notice-building logic

pub mod backend;
pub mod backtrace;
pub mod client;
pub mod config;
pub mod logger;
pub mod notice;
pub mod payload;
pub mod stats;
pub mod token;

// Re-export commonly used items
pub use backend::{Backend, Feature, NullBackend, ServerBackend};
pub use backtrace::{scrub, Frame, PROJECT_ROOT_TOKEN};
pub use client::Client;
pub use config::Configuration;
pub use logger::{LogCrateLogger, Logger, StderrLogger};
pub use notice::{CgiData, Context, Error, Extra, Hash, Notice, NoticeBuilder, Params};
pub use stats::{HostStats, StatsSource, SystemStatsSource};
pub use token::{TokenGenerator, UuidTokenGenerator};

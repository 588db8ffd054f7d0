// Honeybadger Library - Public API

// Re-export error types
pub mod error;
pub use error::{HoneybadgerError, Result};

// Module declarations
pub mod core;
pub mod platform;

// Re-export commonly used types
pub use crate::core::{
    CgiData, Client, Configuration, Context, Error, Extra, Frame, Notice, Params,
};

// Initialize logging
pub fn init_logging() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
}

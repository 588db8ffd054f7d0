//! Diagnostic output sinks handed to the client through its configuration.

use std::fmt;
use std::io::Write;

/// Prefix written in front of every line by [`StderrLogger`]
pub const DEFAULT_PREFIX: &str = "[honeybadger] ";

/// A formatted-write sink for best-effort diagnostics.
pub trait Logger: Send + Sync {
    fn log(&self, args: fmt::Arguments<'_>);
}

/// Writes prefixed lines to standard error.
#[derive(Debug, Clone)]
pub struct StderrLogger {
    prefix: String,
}

impl StderrLogger {
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_PREFIX)
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for StderrLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for StderrLogger {
    fn log(&self, args: fmt::Arguments<'_>) {
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "{}{}", self.prefix, args);
    }
}

/// Forwards to the `log` facade under the `honeybadger` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogCrateLogger;

impl Logger for LogCrateLogger {
    fn log(&self, args: fmt::Arguments<'_>) {
        log::info!(target: "honeybadger", "{}", args);
    }
}

//! Process environment and host identity lookups.
//!
//! Configuration resolution only reads from the host through
//! [`HostEnvironment`], so fallback behaviour can be exercised without
//! touching real environment variables.

use std::collections::HashMap;
use sysinfo::System;

/// Read-only view of the process environment and host identity.
pub trait HostEnvironment: Send + Sync {
    /// Value of an environment variable, empty when unset or not unicode.
    fn var(&self, key: &str) -> String;

    /// Host name as reported by the operating system.
    fn hostname(&self) -> Option<String>;

    /// Current working directory of the process.
    fn current_dir(&self) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemEnvironment;

impl HostEnvironment for SystemEnvironment {
    fn var(&self, key: &str) -> String {
        std::env::var(key).unwrap_or_default()
    }

    fn hostname(&self) -> Option<String> {
        System::host_name().filter(|name| !name.is_empty())
    }

    fn current_dir(&self) -> Option<String> {
        std::env::current_dir()
            .ok()
            .map(|path| path.to_string_lossy().into_owned())
    }
}

/// Fixed environment backed by a map, for embedding and tests.
#[derive(Debug, Default, Clone)]
pub struct StaticEnvironment {
    pub vars: HashMap<String, String>,
    pub hostname: Option<String>,
    pub current_dir: Option<String>,
}

impl StaticEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_hostname(mut self, hostname: &str) -> Self {
        self.hostname = Some(hostname.to_string());
        self
    }

    pub fn with_current_dir(mut self, dir: &str) -> Self {
        self.current_dir = Some(dir.to_string());
        self
    }
}

impl HostEnvironment for StaticEnvironment {
    fn var(&self, key: &str) -> String {
        self.vars.get(key).cloned().unwrap_or_default()
    }

    fn hostname(&self) -> Option<String> {
        self.hostname.clone()
    }

    fn current_dir(&self) -> Option<String> {
        self.current_dir.clone()
    }
}

//! Client configuration and its resolution against the host environment.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use log::debug;

use crate::core::backend::{Backend, ServerBackend};
use crate::core::logger::{Logger, StderrLogger};
use crate::platform::{HostEnvironment, SystemEnvironment};

pub const DEFAULT_ENDPOINT: &str = "https://api.honeybadger.io";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

pub const ENV_API_KEY: &str = "HONEYBADGER_API_KEY";
pub const ENV_ENV: &str = "HONEYBADGER_ENV";
pub const ENV_HOSTNAME: &str = "HONEYBADGER_HOSTNAME";
pub const ENV_ROOT: &str = "HONEYBADGER_ROOT";

/// Client settings.
///
/// Empty strings, a zero timeout and `None` capabilities mean "not set",
/// so the same type serves as both overrides and resolved snapshot.
#[derive(Clone, Default)]
pub struct Configuration {
    pub api_key: String,
    /// Absolute project path, scrubbed from backtraces
    pub root: String,
    pub env: String,
    pub hostname: String,
    pub endpoint: String,
    /// Passed to the backend; nothing in notice construction waits on it
    pub timeout: Duration,
    pub logger: Option<Arc<dyn Logger>>,
    pub backend: Option<Arc<dyn Backend>>,
}

impl Configuration {
    /// Overlay `other` onto `self`. Set fields in `other` win.
    pub fn merge(mut self, other: Configuration) -> Self {
        if !other.api_key.is_empty() {
            self.api_key = other.api_key;
        }
        if !other.root.is_empty() {
            self.root = other.root;
        }
        if !other.env.is_empty() {
            self.env = other.env;
        }
        if !other.hostname.is_empty() {
            self.hostname = other.hostname;
        }
        if !other.endpoint.is_empty() {
            self.endpoint = other.endpoint;
        }
        if !other.timeout.is_zero() {
            self.timeout = other.timeout;
        }
        if other.logger.is_some() {
            self.logger = other.logger;
        }
        if other.backend.is_some() {
            self.backend = other.backend;
        }
        self
    }

    /// Defaults derived from the environment, before any overrides.
    pub fn defaults(host: &dyn HostEnvironment) -> Self {
        Self {
            api_key: host.var(ENV_API_KEY),
            root: env_or(host, ENV_ROOT, || host.current_dir()),
            env: host.var(ENV_ENV),
            hostname: env_or(host, ENV_HOSTNAME, || host.hostname()),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            logger: Some(Arc::new(StderrLogger::new())),
            backend: None,
        }
    }

    /// Resolve `overrides` against the process environment.
    pub fn resolve(overrides: Configuration) -> Self {
        Self::resolve_with(&SystemEnvironment, overrides)
    }

    /// Resolve `overrides` against `host`, installing a server backend if
    /// none was supplied.
    pub fn resolve_with(host: &dyn HostEnvironment, overrides: Configuration) -> Self {
        let mut config = Self::defaults(host).merge(overrides);

        if config.backend.is_none() {
            debug!("No backend configured, using server backend for {}", config.endpoint);
            config.backend = Some(Arc::new(ServerBackend::new()));
        }

        config
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_env(mut self, env: impl Into<String>) -> Self {
        self.env = env.into();
        self
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = hostname.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_backend(mut self, backend: Arc<dyn Backend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Write a diagnostic line through the configured logger, if any.
    pub fn log(&self, args: fmt::Arguments<'_>) {
        if let Some(logger) = &self.logger {
            logger.log(args);
        }
    }
}

fn env_or(host: &dyn HostEnvironment, key: &str, fallback: impl FnOnce() -> Option<String>) -> String {
    let value = host.var(key);
    if !value.is_empty() {
        return value;
    }
    fallback().unwrap_or_default()
}

fn redact(api_key: &str) -> String {
    let count = api_key.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = api_key.chars().skip(count - 4).collect();
    format!("****{}", tail)
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("api_key", &redact(&self.api_key))
            .field("root", &self.root)
            .field("env", &self.env)
            .field("hostname", &self.hostname)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .field("logger", &self.logger.is_some())
            .field("backend", &self.backend.is_some())
            .finish()
    }
}

//! Delivery of serialized notices.

use log::{debug, warn};
use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::core::config::Configuration;
use crate::core::notice::Notice;
use crate::core::payload::NOTIFIER_VERSION;
use crate::error::{HoneybadgerError, Result};

/// Kind of payload being delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Notices,
}

impl Feature {
    pub fn endpoint(&self) -> &'static str {
        match self {
            Feature::Notices => "/v1/notices",
        }
    }
}

/// Delivers notices to wherever they are collected.
///
/// `config` is the snapshot the notice was built from; delivery settings
/// are read from it on every call.
pub trait Backend: Send + Sync {
    fn notify(&self, feature: Feature, notice: &Notice, config: &Configuration) -> Result<()>;
}

/// Posts notices to the Honeybadger API over HTTPS.
#[derive(Debug)]
pub struct ServerBackend {
    client: Option<Client>,
}

impl ServerBackend {
    pub fn new() -> Self {
        let user_agent = format!("honeybadger-rust/{}", NOTIFIER_VERSION);
        let client = match Client::builder().user_agent(user_agent).build() {
            Ok(client) => Some(client),
            Err(e) => {
                warn!("Failed to build HTTP client: {}", e);
                None
            }
        };

        Self { client }
    }

    pub fn url(feature: Feature, config: &Configuration) -> String {
        format!("{}{}", config.endpoint.trim_end_matches('/'), feature.endpoint())
    }
}

impl Default for ServerBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for ServerBackend {
    fn notify(&self, feature: Feature, notice: &Notice, config: &Configuration) -> Result<()> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| HoneybadgerError::transport("HTTP client unavailable"))?;

        let body = notice.to_json()?;
        let url = Self::url(feature, config);

        let mut request = client
            .post(&url)
            .header("X-API-Key", &config.api_key)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .body(body);
        if !config.timeout.is_zero() {
            request = request.timeout(config.timeout);
        }

        let response = request.send()?;

        let status = response.status();
        debug!("Notice {} delivered to {} with status {}", notice.token, url, status);

        if status.is_success() {
            return Ok(());
        }

        Err(status_error(status))
    }
}

fn status_error(status: StatusCode) -> HoneybadgerError {
    match status {
        StatusCode::FORBIDDEN => HoneybadgerError::transport("the API key is invalid"),
        StatusCode::PAYLOAD_TOO_LARGE => HoneybadgerError::transport("the payload is too large"),
        StatusCode::TOO_MANY_REQUESTS => {
            HoneybadgerError::transport("the project is rate limited")
        }
        other => HoneybadgerError::transport(format!("unexpected response status {}", other)),
    }
}

/// Discards every notice.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBackend;

impl Backend for NullBackend {
    fn notify(&self, feature: Feature, notice: &Notice, _config: &Configuration) -> Result<()> {
        debug!("Dropping {:?} payload {}", feature, notice.token);
        Ok(())
    }
}

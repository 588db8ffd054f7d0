//! Wire format of a notice.
//!
//! `server.time` and `server.stats` are taken when the payload is built,
//! so serializing the same notice twice can produce different values.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::backtrace::Frame;
use crate::core::notice::{CgiData, Context, Notice, Params};
use crate::core::stats::{self, HostStats, StatsSource, SystemStatsSource};
use crate::error::Result;

pub const NOTIFIER_NAME: &str = "honeybadger";
pub const NOTIFIER_URL: &str = "https://github.com/honeybadger-io/honeybadger-rust";
pub const NOTIFIER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Serialize)]
struct Payload<'a> {
    api_key: &'a str,
    notifier: Notifier,
    error: ErrorSection<'a>,
    request: RequestSection<'a>,
    server: ServerSection<'a>,
}

#[derive(Debug, Serialize)]
struct Notifier {
    name: &'static str,
    url: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorSection<'a> {
    token: &'a str,
    message: &'a str,
    class: &'a str,
    backtrace: &'a [Frame],
}

#[derive(Debug, Serialize)]
struct RequestSection<'a> {
    context: &'a Context,
    params: Option<&'a Params>,
    cgi_data: Option<&'a CgiData>,
    url: &'a str,
}

#[derive(Debug, Serialize)]
struct ServerSection<'a> {
    project_root: &'a str,
    environment_name: &'a str,
    hostname: &'a str,
    time: DateTime<Utc>,
    pid: u32,
    stats: HostStats,
}

impl Notice {
    fn payload(&self, source: &dyn StatsSource) -> Payload<'_> {
        Payload {
            api_key: &self.api_key,
            notifier: Notifier {
                name: NOTIFIER_NAME,
                url: NOTIFIER_URL,
                version: NOTIFIER_VERSION,
            },
            error: ErrorSection {
                token: &self.token,
                message: &self.error_message,
                class: &self.error_class,
                backtrace: &self.backtrace,
            },
            request: RequestSection {
                context: &self.context,
                params: self.params.as_ref(),
                cgi_data: self.cgi_data.as_ref(),
                url: &self.url,
            },
            server: ServerSection {
                project_root: &self.project_root,
                environment_name: &self.env,
                hostname: &self.hostname,
                time: Utc::now(),
                pid: std::process::id(),
                stats: stats::collect_from(source),
            },
        }
    }

    /// Encode the notice for the notices API, with live host statistics.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        self.to_json_with(&SystemStatsSource::new())
    }

    /// Encode the notice, reading host statistics from `source`.
    pub fn to_json_with(&self, source: &dyn StatsSource) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.payload(source))?)
    }

    /// The payload as a JSON value, with live host statistics.
    pub fn as_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self.payload(&SystemStatsSource::new()))?)
    }
}

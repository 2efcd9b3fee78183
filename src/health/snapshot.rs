//! Point-in-time health record.

use std::path::Path;
use std::time::Instant;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::config::AppIdentityConfig;
use crate::health::uptime::format_uptime;

/// Marker file present inside Docker containers.
const DOCKER_ENV_FILE: &str = "/.dockerenv";

/// When the process started, on both the wall and the monotonic clock.
#[derive(Debug, Clone, Copy)]
pub struct StartTime {
    wall: DateTime<Utc>,
    mono: Instant,
}

impl StartTime {
    /// Capture the current instant as the process start.
    pub fn now() -> Self {
        Self {
            wall: Utc::now(),
            mono: Instant::now(),
        }
    }

    pub fn wall(&self) -> DateTime<Utc> {
        self.wall
    }
}

/// Identity fields that do not change for the life of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceIdentity {
    pub name: String,
    pub build: String,
    pub is_docker: bool,
}

impl ServiceIdentity {
    pub fn from_config(config: &AppIdentityConfig) -> Self {
        Self {
            name: config.name.clone(),
            build: config.build_id(),
            is_docker: config.docker.unwrap_or_else(running_in_docker),
        }
    }
}

fn running_in_docker() -> bool {
    Path::new(DOCKER_ENV_FILE).exists()
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSnapshot {
    pub name: String,
    pub build: String,
    pub is_docker: bool,
    pub database_ping: bool,
    /// Server time, RFC 3339 in UTC.
    pub time: String,
    pub uptime: String,
}

impl HealthSnapshot {
    /// Build a snapshot for the current instant.
    pub fn capture(identity: &ServiceIdentity, start: &StartTime, database_ping: bool) -> Self {
        let wall = Utc::now();
        let mono = Instant::now();
        Self::capture_at(identity, start, database_ping, wall, mono)
    }

    /// Build a snapshot from a wall/monotonic pair read back to back.
    ///
    /// `time` is the wall reading as is. `uptime` comes from the monotonic
    /// pair only, so a wall clock step never makes it shrink.
    pub fn capture_at(
        identity: &ServiceIdentity,
        start: &StartTime,
        database_ping: bool,
        wall: DateTime<Utc>,
        mono: Instant,
    ) -> Self {
        let uptime = mono.saturating_duration_since(start.mono);

        Self {
            name: identity.name.clone(),
            build: identity.build.clone(),
            is_docker: identity.is_docker,
            database_ping,
            time: wall.to_rfc3339_opts(SecondsFormat::Secs, true),
            uptime: format_uptime(uptime),
        }
    }
}

// ── Per-device and polling configuration ──

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for one purifier device.
///
/// Only `host` is required. The display metadata is optional; when absent,
/// name and model are taken from the device's own status snapshot (see
/// [`StatusSnapshot::device_info`](crate::StatusSnapshot::device_info)).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Host address (`name-or-ip[:port]`) the device listens on.
    pub host: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

impl DeviceConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            name: None,
            icon: None,
            model: None,
        }
    }
}

/// Polling cadence and I/O deadlines, shared by all devices.
///
/// Timeouts are explicit here rather than inherited from transport-library
/// defaults: every suspension point in the session layer (connect, each
/// status query) is bounded by one of these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollSettings {
    /// Seconds between periodic status refreshes.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Deadline for the single connection attempt during setup.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Deadline for each status query (first refresh and periodic ticks).
    #[serde(default = "default_refresh_timeout_secs")]
    pub refresh_timeout_secs: u64,
}

impl PollSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn refresh_timeout(&self) -> Duration {
        Duration::from_secs(self.refresh_timeout_secs)
    }
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            refresh_timeout_secs: default_refresh_timeout_secs(),
        }
    }
}

fn default_poll_interval_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_refresh_timeout_secs() -> u64 {
    10
}

//! Configuration for the vigil monitor daemon.

use serde::Deserialize;

/// Monitor configuration.
///
/// Loaded from the `vigil.toml` `[monitor]` section or
/// `VIGIL_MONITOR__` environment variables, with CLI overrides on top.
/// No process-wide mutable state: the loaded value is handed to the
/// monitor at construction.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    /// Subnet prefix to retain, matched literally against entry
    /// addresses (e.g., "192.168.1.").
    #[serde(default)]
    pub subnet_prefix: String,

    /// Webhook endpoint for alert delivery.
    #[serde(default)]
    pub webhook_url: String,

    /// Path of the persisted snapshot file.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,

    /// Seconds between scan cycles.
    #[serde(default = "default_interval")]
    pub interval_secs: u64,

    /// Path to the arp binary used for acquisition.
    #[serde(default = "default_arp_path")]
    pub arp_path: String,

    /// Send a "status normal" heartbeat on cycles with no findings.
    #[serde(default = "default_true")]
    pub heartbeat: bool,
}

fn default_snapshot_path() -> String {
    "./previous_devices.json".to_string()
}

fn default_interval() -> u64 {
    60
}

fn default_arp_path() -> String {
    "arp".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            subnet_prefix: String::new(),
            webhook_url: String::new(),
            snapshot_path: default_snapshot_path(),
            interval_secs: default_interval(),
            arp_path: default_arp_path(),
            heartbeat: default_true(),
        }
    }
}

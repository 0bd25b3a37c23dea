//! Error types for the vigil-monitor crate.
//!
//! None of these are fatal to the daemon: acquisition failures skip the
//! cycle, notification failures are logged, and corrupt persisted state
//! degrades to an empty history.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Neighbor table acquisition failed: {0}")]
    Acquisition(String),

    #[error("Notification delivery failed: {0}")]
    Notification(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MonitorError>;

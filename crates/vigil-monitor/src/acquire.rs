//! Neighbor-table acquisition.
//!
//! The pipeline only needs raw line-oriented table text; where it comes
//! from is a collaborator concern. The default implementation reads the
//! OS ARP cache by invoking the system `arp` command as a child process
//! under `tokio::process::Command`.

use tokio::process::Command;

use crate::error::{MonitorError, Result};

/// Source of raw neighbor-table text.
#[allow(async_fn_in_trait)]
pub trait NeighborSource {
    async fn neighbor_table(&self) -> Result<String>;
}

/// Reads the local ARP cache via the `arp -a` command.
pub struct ArpCommandSource {
    arp_path: String,
}

impl ArpCommandSource {
    pub fn new(arp_path: &str) -> Self {
        Self {
            arp_path: arp_path.to_string(),
        }
    }
}

impl NeighborSource for ArpCommandSource {
    async fn neighbor_table(&self) -> Result<String> {
        let output = Command::new(&self.arp_path)
            .arg("-a")
            .output()
            .await
            .map_err(|e| MonitorError::Acquisition(format!("{}: {e}", self.arp_path)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MonitorError::Acquisition(format!(
                "{} exited with code {}: {}",
                self.arp_path,
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

//! vigil-monitor: ARP neighbor-table monitor daemon.
//!
//! Periodically reads the OS neighbor table, flags newly-seen devices and
//! physical addresses claiming multiple network addresses (a classic ARP
//! spoofing signature, most dangerous when the gateway is the victim),
//! and reports findings to a webhook.

pub mod acquire;
pub mod config;
pub mod error;
pub mod notify;
pub mod persist;
pub mod report;
pub mod scheduler;

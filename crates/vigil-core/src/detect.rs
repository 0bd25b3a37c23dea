//! Spoof detection: physical addresses claiming multiple network addresses.
//!
//! Groups are recomputed from scratch every cycle. There is no memory of
//! previously reported offenders; the persisted snapshot is only used for
//! new-device diffing, never for detection.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::{normalize_physical, Entry};

/// A physical address observed claiming two or more distinct network
/// addresses within one snapshot. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuspiciousGroup {
    pub physical_address: String,
    /// The distinct claimed addresses, sorted for deterministic output.
    pub addresses: Vec<String>,
}

impl SuspiciousGroup {
    /// Heuristically pick the gateway-like address out of the group: the
    /// one whose final dotted component equals 1, if any.
    pub fn gateway_like(&self) -> Option<&str> {
        self.addresses
            .iter()
            .map(String::as_str)
            .find(|a| a.rsplit('.').next() == Some("1"))
    }
}

/// Heuristic guard against broadcast reflections, carried over from the
/// original monitor: any address whose text contains "255" is treated as
/// a broadcast/multicast artifact and suppresses its whole group.
///
/// Known imprecision: this is a substring test, not a broadcast-address
/// test. A legitimate host such as 10.1.255.7 is excluded too. Replacing
/// it with a proper range check is a deliberate, separate decision.
pub fn is_broadcast_artifact(address: &str) -> bool {
    address.contains("255")
}

/// Group entries by normalized physical address and return the groups
/// claiming at least two distinct network addresses.
///
/// Duplicate observations of the same (address, physical address) pair do
/// not inflate a group; only distinct addresses count.
pub fn find_suspicious(entries: &[Entry]) -> Vec<SuspiciousGroup> {
    let mut by_physical: BTreeMap<String, BTreeSet<&str>> = BTreeMap::new();
    for entry in entries {
        by_physical
            .entry(normalize_physical(&entry.physical_address))
            .or_default()
            .insert(entry.address.as_str());
    }

    by_physical
        .into_iter()
        .filter(|(_, addresses)| addresses.len() >= 2)
        .filter(|(_, addresses)| !addresses.iter().any(|a| is_broadcast_artifact(a)))
        .map(|(physical_address, addresses)| SuspiciousGroup {
            physical_address,
            addresses: addresses.into_iter().map(str::to_string).collect(),
        })
        .collect()
}

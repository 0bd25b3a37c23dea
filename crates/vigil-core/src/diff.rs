//! Change detection against the previously persisted snapshot.

use std::collections::HashSet;

use crate::types::{normalize_physical, Entry};

/// Return the current entries whose physical address does not appear
/// anywhere in the previous snapshot.
///
/// Membership is keyed by physical address alone: a host that kept its
/// hardware address but moved to a different network address is not new.
/// An empty `previous` set means no history, so every current entry is
/// reported. Pure and idempotent.
pub fn new_entries(current: &[Entry], previous: &[Entry]) -> Vec<Entry> {
    let known: HashSet<String> = previous
        .iter()
        .map(|e| normalize_physical(&e.physical_address))
        .collect();

    current
        .iter()
        .filter(|e| !known.contains(&normalize_physical(&e.physical_address)))
        .cloned()
        .collect()
}

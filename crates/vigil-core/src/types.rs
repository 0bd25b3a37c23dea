//! Core domain types for the vigil monitor.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Provenance hint from the source neighbor table.
///
/// Informational only; entries are never filtered or grouped by kind.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Static,
    Dynamic,
    #[default]
    Unknown,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static => write!(f, "static"),
            Self::Dynamic => write!(f, "dynamic"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// One neighbor-table row: a network address paired with the physical
/// address currently claiming it.
///
/// Two entries describe the same physical endpoint iff their normalized
/// `physical_address` strings are byte-equal; they describe the same
/// observation iff both `address` and `physical_address` match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entry {
    /// Network-layer address in dotted-quad text form.
    pub address: String,

    /// Link-layer address, held in normalized form (see [`normalize_physical`]).
    pub physical_address: String,

    #[serde(default)]
    pub kind: EntryKind,
}

impl Entry {
    /// Build an entry, normalizing the physical address.
    pub fn new(address: &str, physical_address: &str, kind: EntryKind) -> Self {
        Self {
            address: address.to_string(),
            physical_address: normalize_physical(physical_address),
            kind,
        }
    }
}

/// Normalize a link-layer address to lowercase with colon separators.
///
/// Source tables emit either colon- or hyphen-delimited octets in mixed
/// case; equality comparisons across the pipeline rely on this single
/// canonical form.
pub fn normalize_physical(raw: &str) -> String {
    raw.to_ascii_lowercase().replace('-', ":")
}

/// The entries observed in one scan cycle.
///
/// Persisted whole at the end of each cycle and read back whole at the
/// start of the next; never merged or partially updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub captured_at: Option<DateTime<Utc>>,
    pub entries: Vec<Entry>,
}

impl Snapshot {
    /// Snapshot of the given entries, stamped with the current time.
    pub fn new(entries: Vec<Entry>) -> Self {
        Self {
            captured_at: Some(Utc::now()),
            entries,
        }
    }

    /// The "no history" snapshot: first run, or missing/corrupt persisted state.
    pub fn empty() -> Self {
        Self::default()
    }
}

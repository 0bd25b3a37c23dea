//! vigil-core: Neighbor-table parsing, spoof detection, and snapshot diffing.
//!
//! Pure pipeline stages, no network or disk I/O:
//! - Entry and Snapshot types shared across the vigil components
//! - Parsing of raw neighbor-table text into entries
//! - Grouping of physical addresses claiming multiple network addresses
//! - Diffing a scan cycle against the previously persisted snapshot
//!
//! The vigil-monitor daemon wires these between its acquisition,
//! notification, and persistence collaborators.

pub mod detect;
pub mod diff;
pub mod parse;
pub mod types;

//! Neighbor-table text parser.
//!
//! Turns the raw line-oriented output of the acquisition layer (e.g.,
//! `arp -a` on any platform) into [`Entry`] values. The parser is
//! deliberately forgiving: header lines, interface banners, and anything
//! else without both an IPv4-shaped token and a 6-octet hex token is
//! silently dropped. Malformed input is noise, never an error.

use crate::types::{normalize_physical, Entry, EntryKind};

/// Parse raw neighbor-table text, retaining entries whose network address
/// starts with `subnet_prefix` (literal prefix match, not CIDR).
///
/// Empty or unrecognizable input yields an empty vector; callers must
/// treat "no entries" as a valid, reportable state.
pub fn parse_table(raw: &str, subnet_prefix: &str) -> Vec<Entry> {
    raw.lines()
        .filter_map(|line| parse_line(line, subnet_prefix))
        .collect()
}

fn parse_line(line: &str, subnet_prefix: &str) -> Option<Entry> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    let address = tokens.iter().find_map(|t| ipv4_token(t))?;
    let physical = tokens.iter().copied().find(|t| is_physical_token(t))?;

    if !address.starts_with(subnet_prefix) {
        tracing::trace!(address, "Entry outside subnet prefix, skipped");
        return None;
    }

    Some(Entry {
        address: address.to_string(),
        physical_address: normalize_physical(physical),
        kind: kind_marker(&tokens),
    })
}

/// Extract a dotted-quad IPv4 token, tolerating the parentheses that
/// BSD-style `arp -a` wraps around addresses.
fn ipv4_token(token: &str) -> Option<&str> {
    let t = token.trim_matches(|c| c == '(' || c == ')' || c == ',');
    let octets: Vec<&str> = t.split('.').collect();
    if octets.len() == 4 && octets.iter().all(|o| !o.is_empty() && o.parse::<u8>().is_ok()) {
        Some(t)
    } else {
        None
    }
}

/// A 6-octet hex token delimited by colons or hyphens (but not a mix).
fn is_physical_token(token: &str) -> bool {
    let sep = if token.contains(':') {
        ':'
    } else if token.contains('-') {
        '-'
    } else {
        return false;
    };

    let octets: Vec<&str> = token.split(sep).collect();
    octets.len() == 6
        && octets
            .iter()
            .all(|o| (1..=2).contains(&o.len()) && o.chars().all(|c| c.is_ascii_hexdigit()))
}

fn kind_marker(tokens: &[&str]) -> EntryKind {
    for t in tokens {
        if t.eq_ignore_ascii_case("static") {
            return EntryKind::Static;
        }
        if t.eq_ignore_ascii_case("dynamic") {
            return EntryKind::Dynamic;
        }
    }
    EntryKind::Unknown
}

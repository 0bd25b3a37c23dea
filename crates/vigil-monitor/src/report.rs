//! Alert message rendering. Pure string formatting, no I/O.

use vigil_core::detect::SuspiciousGroup;
use vigil_core::types::Entry;

/// Message for a physical address never seen in the previous snapshot.
pub fn new_device_message(entry: &Entry) -> String {
    format!(
        "🔔 New device detected: `{}` at `{}`",
        entry.address, entry.physical_address
    )
}

/// Message for a suspicious group.
///
/// When one of the claimed addresses looks like the gateway it is named
/// separately, since gateway impersonation is the dangerous case; other
/// groups are reported symmetrically.
pub fn suspicious_group_message(group: &SuspiciousGroup) -> String {
    match group.gateway_like() {
        Some(gateway) => {
            let others: Vec<&str> = group
                .addresses
                .iter()
                .map(String::as_str)
                .filter(|a| *a != gateway)
                .collect();
            format!(
                "⚠️ Possible ARP spoofing: gateway `{}` is also claimed by `{}` (physical address `{}`)",
                gateway,
                others.join("`, `"),
                group.physical_address
            )
        }
        None => format!(
            "⚠️ Possible ARP spoofing: physical address `{}` claims addresses `{}`",
            group.physical_address,
            group.addresses.join("`, `")
        ),
    }
}

/// Message for a failed acquisition: the cycle was skipped and the
/// persisted snapshot left untouched.
pub fn retrieval_failure_message(subnet_prefix: &str, detail: &str) -> String {
    format!(
        "⚠️ Could not retrieve neighbor table for subnet {subnet_prefix}: {detail}"
    )
}

/// Steady-state heartbeat for a quiet cycle, with the full filtered table
/// so operators can see the monitor is alive and what it saw.
pub fn status_normal_message(subnet_prefix: &str, entries: &[Entry]) -> String {
    if entries.is_empty() {
        return format!("No entries found for subnet {subnet_prefix}");
    }

    format!(
        "✅ Status normal for subnet {subnet_prefix}: {} entries, nothing suspicious\n```\n{}```",
        entries.len(),
        render_table(entries)
    )
}

/// Render entries as an aligned three-column table.
pub fn render_table(entries: &[Entry]) -> String {
    const ADDRESS: &str = "address";
    const PHYSICAL: &str = "physical address";

    let addr_width = entries
        .iter()
        .map(|e| e.address.len())
        .chain([ADDRESS.len()])
        .max()
        .unwrap_or(0);
    let phys_width = entries
        .iter()
        .map(|e| e.physical_address.len())
        .chain([PHYSICAL.len()])
        .max()
        .unwrap_or(0);

    let mut out = format!("{ADDRESS:addr_width$}  {PHYSICAL:phys_width$}  kind\n");
    for entry in entries {
        out.push_str(&format!(
            "{:addr_width$}  {:phys_width$}  {}\n",
            entry.address, entry.physical_address, entry.kind
        ));
    }
    out
}

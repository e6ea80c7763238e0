//! Snapshot diff engine
//!
//! Compares a freshly fetched record set against the previously persisted
//! snapshot and reports, per host, the newly observed ports and vulnerability
//! identifiers.
//!
//! Classification rules:
//!
//! - A host absent from the old snapshot is *first-seen* and is reported
//!   wholesale (its full record), never as a keyed diff entry.
//! - A host present in both snapshots contributes a diff entry only when the
//!   set difference of its ports or vulnerabilities is non-empty. Absence
//!   from the result means "no change"; there are no empty entries.
//! - Hosts present only in the old snapshot are not reported. Disappearance
//!   detection is deliberately out of scope.
//!
//! Comparison is pure set membership over the set views of the record
//! fields, so listing order and duplicates in the underlying sequences never
//! affect the outcome.
//!
//! # Example
//!
//! ```
//! use idbwatch_core::diff;
//! use idbwatch_core::types::{HostRecord, Snapshot};
//!
//! let mut old = Snapshot::new();
//! old.insert("10.0.0.1".to_string(), HostRecord {
//!     ip: "10.0.0.1".to_string(),
//!     ports: vec![22],
//!     ..Default::default()
//! });
//!
//! let new = vec![HostRecord {
//!     ip: "10.0.0.1".to_string(),
//!     ports: vec![22, 80],
//!     ..Default::default()
//! }];
//!
//! let report = diff::diff(&old, &new);
//! assert!(report.changed["10.0.0.1"].new_ports.contains(&80));
//! ```

use crate::types::{HostRecord, Snapshot};
use std::collections::{BTreeMap, BTreeSet};

/// Newly observed items for one host present in both snapshots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostDiff {
    /// Ports in the new record absent from the old
    pub new_ports: BTreeSet<u16>,
    /// Vulnerability identifiers in the new record absent from the old
    pub new_vulns: BTreeSet<String>,
}

impl HostDiff {
    /// Returns true when neither ports nor vulnerabilities changed
    pub fn is_empty(&self) -> bool {
        self.new_ports.is_empty() && self.new_vulns.is_empty()
    }
}

/// Result of comparing a new record set against an old snapshot
///
/// Both maps are ordered by host identifier so presentation is stable
/// across runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiffReport {
    /// Hosts present in both snapshots with a non-empty difference
    pub changed: BTreeMap<String, HostDiff>,
    /// Hosts absent from the old snapshot, reported wholesale
    pub first_seen: BTreeMap<String, HostRecord>,
}

impl DiffReport {
    /// Returns true when no changes were observed at all
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty() && self.first_seen.is_empty()
    }
}

/// Computes per-host differences between `old` and `new`.
///
/// `new` must contain only valid (non-sentinel) records; sentinels are
/// filtered upstream by the worker pool.
pub fn diff(old: &Snapshot, new: &[HostRecord]) -> DiffReport {
    let mut report = DiffReport::default();

    for record in new {
        match old.get(&record.ip) {
            None => {
                report
                    .first_seen
                    .insert(record.ip.clone(), record.clone());
            }
            Some(prior) => {
                let host_diff = HostDiff {
                    new_ports: record
                        .port_set()
                        .difference(&prior.port_set())
                        .copied()
                        .collect(),
                    new_vulns: record
                        .vuln_set()
                        .difference(&prior.vuln_set())
                        .cloned()
                        .collect(),
                };
                if !host_diff.is_empty() {
                    report.changed.insert(record.ip.clone(), host_diff);
                }
            }
        }
    }

    report
}

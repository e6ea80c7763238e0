//! Core data types for host intelligence records
//!
//! This module defines [`HostRecord`], the structured result of looking up one
//! network address, and the [`Snapshot`] mapping persisted between runs.
//!
//! A record with an empty `ip` is the *sentinel* for "lookup failed or
//! returned nothing". Sentinels exist only inside the fetch phase and are
//! filtered before any output or persistence.
//!
//! # Examples
//!
//! ```
//! use idbwatch_core::types::HostRecord;
//!
//! let record = HostRecord {
//!     ip: "192.168.1.1".to_string(),
//!     ports: vec![22, 80],
//!     cpes: vec!["cpe:/a:openbsd:openssh".to_string()],
//!     hostnames: vec!["example.com".to_string()],
//!     tags: vec!["cloud".to_string()],
//!     vulns: vec![],
//! };
//! assert!(record.is_present());
//! assert!(!HostRecord::empty().is_present());
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Snapshot of world state at one point in time: host identifier to record.
pub type Snapshot = HashMap<String, HostRecord>;

/// Intelligence record for a single host
///
/// Matches the JSON shape of the InternetDB API response and of the persisted
/// snapshot file. Every field defaults to empty so that field absence on the
/// wire or at rest reads as an empty collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HostRecord {
    /// Canonical host address; empty for the sentinel record
    #[serde(default)]
    pub ip: String,

    /// Open ports; logically a set, kept in source order for display
    #[serde(default)]
    pub ports: Vec<u16>,

    /// CPE (Common Platform Enumeration) identifiers
    #[serde(default)]
    pub cpes: Vec<String>,

    /// Hostnames associated with this IP
    #[serde(default)]
    pub hostnames: Vec<String>,

    /// Tags (e.g., "cloud", "self-signed")
    #[serde(default)]
    pub tags: Vec<String>,

    /// Vulnerability identifiers (CVEs); logically a set
    #[serde(default)]
    pub vulns: Vec<String>,
}

impl HostRecord {
    /// Returns the sentinel record for a failed or empty lookup
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if this record carries a valid lookup result
    pub fn is_present(&self) -> bool {
        !self.ip.is_empty()
    }

    /// Returns true if the host has any open ports
    pub fn has_open_ports(&self) -> bool {
        !self.ports.is_empty()
    }

    /// Returns true if any vulnerabilities were reported
    pub fn has_vulns(&self) -> bool {
        !self.vulns.is_empty()
    }

    /// Port numbers as a proper set, collapsing duplicates and ordering
    ///
    /// Diffing compares these set views so the listing order of the
    /// underlying sequences never affects the result.
    pub fn port_set(&self) -> BTreeSet<u16> {
        self.ports.iter().copied().collect()
    }

    /// Vulnerability identifiers as a proper set
    pub fn vuln_set(&self) -> BTreeSet<String> {
        self.vulns.iter().cloned().collect()
    }
}

/// Builds a snapshot from a collection of records, keyed by identifier.
///
/// Sentinel records must already be filtered out by the caller.
pub fn to_snapshot(records: &[HostRecord]) -> Snapshot {
    records
        .iter()
        .map(|r| (r.ip.clone(), r.clone()))
        .collect()
}

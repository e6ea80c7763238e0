//! Durable snapshot store
//!
//! Persists the full record set of a run as a JSON array and loads it back as
//! a [`Snapshot`] keyed by host identifier. A missing, empty, or malformed
//! file degrades to an empty snapshot rather than aborting the run, which
//! makes every record in the next run classify as first-seen.

use crate::error::Result;
use crate::types::{to_snapshot, HostRecord, Snapshot};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Loads the previously persisted snapshot.
///
/// Returns an empty snapshot when the file is absent, empty, or fails
/// structural validation; a corrupt prior snapshot never aborts a run.
pub fn load(path: impl AsRef<Path>) -> Snapshot {
    let path = path.as_ref();

    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "no prior snapshot");
            return Snapshot::new();
        }
    };

    match serde_json::from_str::<Vec<HostRecord>>(&raw) {
        Ok(records) => to_snapshot(&records),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "malformed snapshot, treating as empty");
            Snapshot::new()
        }
    }
}

/// Persists the complete record set, overwriting any prior file.
///
/// Saving is a no-op on an empty collection so that a run which found
/// nothing never erases a pre-existing snapshot.
pub fn save(path: impl AsRef<Path>, records: &[HostRecord]) -> Result<()> {
    if records.is_empty() {
        return Ok(());
    }

    let json = serde_json::to_string(records)?;
    fs::write(path.as_ref(), json)?;
    Ok(())
}

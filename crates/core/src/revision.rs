//! Revision snapshot validation and block-level diffing.
//!
//! Snapshots are the article's structured JSONB content. Comparison works
//! key-by-key over the snapshot's top-level fields; array-valued fields
//! (e.g. editor blocks) are compared per index so clients can highlight
//! individual blocks. The diff is deterministic (keys are visited in sorted
//! order) and inverse under argument swap: comparing (A, B) and (B, A)
//! yields the same set of differing blocks with inverse tags.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

/// Maximum serialized size of a revision snapshot, in bytes.
pub const MAX_SNAPSHOT_BYTES: usize = 1_000_000;

/// Maximum length for a revision's change summary.
pub const MAX_CHANGE_SUMMARY_LENGTH: usize = 1_000;

/// The status of one block in a snapshot comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffStatus {
    Added,
    Removed,
    Changed,
}

impl DiffStatus {
    /// String representation for display and logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Changed => "changed",
        }
    }

    /// The tag produced for the same block when the comparison arguments
    /// are swapped.
    pub fn inverse(&self) -> Self {
        match self {
            Self::Added => Self::Removed,
            Self::Removed => Self::Added,
            Self::Changed => Self::Changed,
        }
    }
}

impl std::fmt::Display for DiffStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One differing block between two snapshots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockDiff {
    /// The block's key: a top-level field name, or `field[index]` for
    /// array-valued fields.
    pub key: String,
    pub status: DiffStatus,
    /// Value on the `from` side (absent for `added`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Value>,
    /// Value on the `to` side (absent for `removed`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Value>,
}

/// Validate a revision snapshot before storing it.
///
/// Snapshots must be JSON objects (the block editor's document format) and
/// are size-capped to keep revision history storage bounded.
pub fn validate_snapshot(snapshot: &Value) -> Result<(), CoreError> {
    if !snapshot.is_object() {
        return Err(CoreError::Validation(
            "Revision data must be a JSON object".to_string(),
        ));
    }

    let size = serde_json::to_vec(snapshot)
        .map_err(|e| CoreError::Internal(format!("Failed to serialize snapshot: {e}")))?
        .len();
    if size > MAX_SNAPSHOT_BYTES {
        return Err(CoreError::Validation(format!(
            "Revision data exceeds maximum size of {MAX_SNAPSHOT_BYTES} bytes"
        )));
    }

    Ok(())
}

/// Validate an optional change summary.
pub fn validate_change_summary(summary: Option<&str>) -> Result<(), CoreError> {
    if let Some(s) = summary {
        if s.len() > MAX_CHANGE_SUMMARY_LENGTH {
            return Err(CoreError::Validation(format!(
                "Change summary exceeds maximum length of {MAX_CHANGE_SUMMARY_LENGTH} characters"
            )));
        }
    }
    Ok(())
}

/// Compare two snapshots block by block, returning only differing blocks.
pub fn compare_snapshots(from: &Value, to: &Value) -> Vec<BlockDiff> {
    let empty = serde_json::Map::new();
    let from_map = from.as_object().unwrap_or(&empty);
    let to_map = to.as_object().unwrap_or(&empty);

    // Sorted union of keys keeps the output deterministic.
    let mut keys: Vec<&String> = from_map.keys().chain(to_map.keys()).collect();
    keys.sort();
    keys.dedup();

    let mut diffs = Vec::new();
    for key in keys {
        match (from_map.get(key.as_str()), to_map.get(key.as_str())) {
            (Some(Value::Array(a)), Some(Value::Array(b))) => {
                diff_arrays(key, a, b, &mut diffs);
            }
            (Some(a), Some(b)) if a != b => diffs.push(BlockDiff {
                key: key.clone(),
                status: DiffStatus::Changed,
                from: Some(a.clone()),
                to: Some(b.clone()),
            }),
            (Some(_), Some(_)) => {}
            (Some(a), None) => diffs.push(BlockDiff {
                key: key.clone(),
                status: DiffStatus::Removed,
                from: Some(a.clone()),
                to: None,
            }),
            (None, Some(b)) => diffs.push(BlockDiff {
                key: key.clone(),
                status: DiffStatus::Added,
                from: None,
                to: Some(b.clone()),
            }),
            (None, None) => unreachable!("key came from one of the maps"),
        }
    }
    diffs
}

/// Per-index comparison of an array-valued field.
fn diff_arrays(field: &str, from: &[Value], to: &[Value], diffs: &mut Vec<BlockDiff>) {
    let longest = from.len().max(to.len());
    for i in 0..longest {
        let key = format!("{field}[{i}]");
        match (from.get(i), to.get(i)) {
            (Some(a), Some(b)) if a != b => diffs.push(BlockDiff {
                key,
                status: DiffStatus::Changed,
                from: Some(a.clone()),
                to: Some(b.clone()),
            }),
            (Some(_), Some(_)) => {}
            (Some(a), None) => diffs.push(BlockDiff {
                key,
                status: DiffStatus::Removed,
                from: Some(a.clone()),
                to: None,
            }),
            (None, Some(b)) => diffs.push(BlockDiff {
                key,
                status: DiffStatus::Added,
                from: None,
                to: Some(b.clone()),
            }),
            (None, None) => {}
        }
    }
}

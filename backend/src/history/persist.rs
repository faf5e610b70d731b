//! History persistence - save/load the run log as JSON
//!
//! The file holds the runs plus a SHA-256 hash of their canonical JSON.
//! Loading recomputes the hash and refuses a file that was edited.

use super::{HistoryError, HistoryStore};
use crate::models::SimulationRun;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// On-disk history document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryFile {
    /// Runs in chronological order
    pub runs: Vec<SimulationRun>,

    /// SHA-256 of the canonical JSON of `runs`
    pub integrity_hash: String,
}

/// Compute deterministic SHA256 hash of any serializable value
///
/// Uses canonical JSON serialization with sorted keys so the hash does not
/// depend on map iteration order.
pub fn compute_canonical_hash<T: Serialize>(value: &T) -> Result<String, HistoryError> {
    use serde_json::Value;
    use std::collections::BTreeMap;

    let value = serde_json::to_value(value)
        .map_err(|e| HistoryError::Serialization(format!("Serialization failed: {}", e)))?;

    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let json = serde_json::to_string(&canonicalize(value))
        .map_err(|e| HistoryError::Serialization(format!("Serialization failed: {}", e)))?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

impl HistoryStore {
    /// Serialize the store to a JSON string
    pub fn to_json(&self) -> Result<String, HistoryError> {
        let file = HistoryFile {
            runs: self.runs().to_vec(),
            integrity_hash: compute_canonical_hash(&self.runs())?,
        };

        serde_json::to_string_pretty(&file)
            .map_err(|e| HistoryError::Serialization(format!("History serialization failed: {}", e)))
    }

    /// Parse a store from JSON, checking the integrity hash
    pub fn from_json(json: &str) -> Result<Self, HistoryError> {
        let file: HistoryFile = serde_json::from_str(json)
            .map_err(|e| HistoryError::Serialization(format!("History parse failed: {}", e)))?;

        let actual = compute_canonical_hash(&file.runs)?;
        if actual != file.integrity_hash {
            return Err(HistoryError::IntegrityMismatch {
                expected: file.integrity_hash,
                actual,
            });
        }

        Ok(HistoryStore::from_runs(file.runs))
    }

    /// Write the store to `path`
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), HistoryError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?).map_err(|e| io_error(path, e))
    }

    /// Load a store from `path`; a missing file yields an empty store
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, HistoryError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HistoryStore::new()),
            Err(e) => Err(io_error(path, e)),
        }
    }
}

fn io_error(path: &Path, e: std::io::Error) -> HistoryError {
    HistoryError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

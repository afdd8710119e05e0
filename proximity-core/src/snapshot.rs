//! Storage snapshot used to seed the engine at startup.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use proximity_types::{SearchConfig, UserRecord};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::SearchEngine;

/// Errors that can occur while loading a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// Users with their friendship rows, as exported from storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub users: Vec<UserRecord>,
}

impl Snapshot {
    /// Parses a JSON snapshot.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Reads and parses a JSON snapshot file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Builds an engine holding every user in this snapshot.
    pub fn build_engine(&self, config: SearchConfig) -> SearchEngine {
        SearchEngine::from_records(&self.users, config)
    }
}

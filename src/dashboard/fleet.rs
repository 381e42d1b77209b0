//! Fleet Sources
//!
//! None of the backend feeds carry vessels, so the fleet monitor reads from
//! an injected [`FleetSource`]. The default is an empty fleet.

use std::path::{Path, PathBuf};
use thiserror::Error;

use super::types::Vessel;

/// Supplies the vessels shown in the fleet monitor
pub trait FleetSource: Send + Sync {
    fn vessels(&self) -> Vec<Vessel>;
}

/// A fleet with no vessels
#[derive(Debug, Default, Clone)]
pub struct EmptyFleet;

impl FleetSource for EmptyFleet {
    fn vessels(&self) -> Vec<Vessel> {
        Vec::new()
    }
}

/// A fixed list of vessels, typically loaded from a JSON file
#[derive(Debug, Default, Clone)]
pub struct StaticFleet {
    vessels: Vec<Vessel>,
}

impl StaticFleet {
    pub fn new(vessels: Vec<Vessel>) -> Self {
        Self { vessels }
    }

    /// Parse a JSON array of vessels
    pub fn from_json(json: &str) -> Result<Self, FleetError> {
        let vessels: Vec<Vessel> =
            serde_json::from_str(json).map_err(|e| FleetError::Parse {
                path: None,
                error: e.to_string(),
            })?;
        Ok(Self::new(vessels))
    }

    /// Load a JSON array of vessels from disk
    pub fn from_file(path: &Path) -> Result<Self, FleetError> {
        let content = std::fs::read_to_string(path).map_err(|e| FleetError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let vessels: Vec<Vessel> =
            serde_json::from_str(&content).map_err(|e| FleetError::Parse {
                path: Some(path.to_path_buf()),
                error: e.to_string(),
            })?;

        tracing::info!(count = vessels.len(), "Loaded fleet from {:?}", path);
        Ok(Self::new(vessels))
    }
}

impl FleetSource for StaticFleet {
    fn vessels(&self) -> Vec<Vessel> {
        self.vessels.clone()
    }
}

/// Fleet loading errors
#[derive(Debug, Error)]
pub enum FleetError {
    #[error("Failed to read fleet file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse fleet {path:?}: {error}")]
    Parse {
        path: Option<PathBuf>,
        error: String,
    },
}

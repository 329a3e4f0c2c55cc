//! Engine configuration.
//!
//! Everything the engine needs before a search starts: grid dimensions, the
//! landscape card and the pruning rule. Can be built in code or loaded from
//! JSON; `validate` rejects shapes the engine cannot handle.

use std::{fs, io, path::Path, path::PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::score::PruneRule;
use crate::types::{GridShape, LandscapeKind};

/// Largest grid the engine accepts. The search is exponential long before
/// this, and partial states are packed 2 bits per cell into a `u128`.
pub const MAX_CELLS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rows: usize,
    pub cols: usize,
    pub landscape: LandscapeKind,
    pub prune: PruneRule,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rows: 3,
            cols: 3,
            landscape: LandscapeKind::Meadow,
            prune: PruneRule::Neighborhood,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid must have at least one row and one column (got {rows}x{cols})")]
    EmptyDimension { rows: usize, cols: usize },
    #[error("grid of {cells} cells exceeds the limit of {max}")]
    TooManyCells { cells: usize, max: usize },
    #[error("failed to read engine config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse engine config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl EngineConfig {
    pub fn new(rows: usize, cols: usize, landscape: LandscapeKind) -> Self {
        Self {
            rows,
            cols,
            landscape,
            ..Self::default()
        }
    }

    pub fn with_prune(mut self, prune: PruneRule) -> Self {
        self.prune = prune;
        self
    }

    pub fn shape(&self) -> GridShape {
        GridShape::new(self.rows, self.cols)
    }

    /// Returns the grid shape if the engine can run on it.
    pub fn validate(&self) -> Result<GridShape, ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyDimension {
                rows: self.rows,
                cols: self.cols,
            });
        }
        let cells = self.rows.saturating_mul(self.cols);
        if cells > MAX_CELLS {
            return Err(ConfigError::TooManyCells {
                cells,
                max: MAX_CELLS,
            });
        }
        Ok(self.shape())
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }
}

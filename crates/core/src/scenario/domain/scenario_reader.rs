use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::reconcile_error::ReconcileError;
use crate::tracking::domain::hypothesis::Hypothesis;
use crate::tracking::domain::tracklet_store::TrackletStore;

use super::scenario::Scenario;

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("failed to read scenario {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scenario {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Store(#[from] ReconcileError),
}

/// Loads the tracklets and hypotheses for a pass from some source.
pub trait ScenarioReader: Send {
    fn read(&self, path: &Path) -> Result<Scenario, ScenarioError>;

    /// Read and build the store in one step.
    fn load(&self, path: &Path) -> Result<(TrackletStore, Vec<Hypothesis>), ScenarioError> {
        Ok(self.read(path)?.into_parts()?)
    }
}

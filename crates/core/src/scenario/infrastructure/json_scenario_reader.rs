use std::fs;
use std::path::Path;

use crate::scenario::domain::scenario::Scenario;
use crate::scenario::domain::scenario_reader::{ScenarioError, ScenarioReader};

/// Reads a scenario from a JSON document.
///
/// ```json
/// {
///   "tracklets": [{ "id": 1, "observations": [{ "id": 10, "t": 0 }] }],
///   "hypotheses": [{ "kind": "link", "source": 1, "target": 2 }]
/// }
/// ```
pub struct JsonScenarioReader;

impl JsonScenarioReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonScenarioReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioReader for JsonScenarioReader {
    fn read(&self, path: &Path) -> Result<Scenario, ScenarioError> {
        let text = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ScenarioError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

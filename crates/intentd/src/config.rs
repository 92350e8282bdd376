//! Controller configuration.
//!
//! A small JSON file overrides the defaults; every field is optional and
//! absent files are fine (defaults apply).

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{IntentError, IntentResult};

/// Tunables for the controller daemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Depth of the inbound event queue. Backpressure beyond this is the
    /// transport's problem.
    pub event_queue_depth: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            event_queue_depth: 1024,
        }
    }
}

impl ControllerConfig {
    /// Loads configuration from a JSON file.
    pub fn load(path: &Path) -> IntentResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| IntentError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| IntentError::ConfigParse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Loads from `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> IntentResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

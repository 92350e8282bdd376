//! Error types for intentd operations.

use sdn_types::SwitchId;
use thiserror::Error;
use uuid::Uuid;

/// Result type alias for intentd operations.
pub type IntentResult<T> = Result<T, IntentError>;

/// Errors surfaced by the controller core.
#[derive(Debug, Error)]
pub enum IntentError {
    /// The intent's target switch is not in the current topology snapshot.
    /// Compilation is aborted and the intent is not stored.
    #[error("target switch {0} is not present in the topology")]
    InvalidTarget(SwitchId),

    /// No stored intent under the given uuid.
    #[error("no intent with uuid {0}")]
    NotFound(Uuid),

    /// Failed to read the configuration file.
    #[error("failed to read config file '{path}': {source}")]
    ConfigRead {
        /// Path of the file that could not be read.
        path: String,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file did not parse as JSON.
    #[error("failed to parse config file '{path}': {source}")]
    ConfigParse {
        /// Path of the offending file.
        path: String,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}

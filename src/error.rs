// Error types for unitstat

use std::time::Duration;
use thiserror::Error;

/// Result type alias using anyhow::Error
pub type Result<T> = anyhow::Result<T>;

/// Outcome of parsing or resolving a single line of systemctl output
pub type LineResult<T> = std::result::Result<T, UnitsError>;

/// Unitstat-specific error types
#[derive(Error, Debug)]
pub enum UnitsError {
    #[error("Failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} exited with {status}: {stderr}")]
    NonZeroExit {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("{command} timed out after {timeout:?}")]
    Timeout { command: String, timeout: Duration },

    #[error("Error parsing line (expected at least {expected} fields): {line}")]
    MalformedLine { expected: usize, line: String },

    #[error("Error parsing field '{field}' of unit '{unit}', value not in map: {value}")]
    UnknownState {
        field: &'static str,
        value: String,
        unit: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl UnitsError {
    /// True for errors that abort a whole collection pass
    pub fn is_invocation_failure(&self) -> bool {
        matches!(
            self,
            UnitsError::Spawn { .. } | UnitsError::NonZeroExit { .. } | UnitsError::Timeout { .. }
        )
    }
}

//! Error type shared by the engine and the `montyhall-simulate` harness.
//!
//! The round simulator itself is total and never fails. Only argument
//! validation at the aggregator boundary and harness I/O produce errors.

use std::io;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SimulationError>;

#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("no valid input after {attempts} attempts")]
    PromptExhausted { attempts: usize },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SimulationError {
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// True for [`SimulationError::InvalidArgument`].
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

/// Validate a signed trial count coming from user input.
///
/// Zero and negative counts are rejected before any round runs.
pub fn validate_trials(raw: i64) -> Result<u64> {
    if raw <= 0 {
        return Err(SimulationError::invalid_argument(format!(
            "trials must be a positive integer, got {raw}"
        )));
    }
    Ok(raw as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_trials_rejects_non_positive() {
        assert!(validate_trials(0).unwrap_err().is_invalid_argument());
        assert!(validate_trials(-5).unwrap_err().is_invalid_argument());
        assert_eq!(validate_trials(1).unwrap(), 1);
        assert_eq!(validate_trials(10_000).unwrap(), 10_000);
    }

    #[test]
    fn test_error_messages() {
        let err = SimulationError::invalid_argument("trials must be positive");
        assert_eq!(err.to_string(), "invalid argument: trials must be positive");
        let err = SimulationError::PromptExhausted { attempts: 5 };
        assert_eq!(err.to_string(), "no valid input after 5 attempts");
    }
}

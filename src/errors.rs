//! Top-level error type for harness assembly

use action_facade::ActionError;
use thiserror::Error;

/// Failures surfaced by the harness layer itself.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Configuration could not be loaded or deserialized
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// A facade operation failed
    #[error(transparent)]
    Action(#[from] ActionError),

    /// The session provider could not establish or refresh auth state
    #[error("session error: {0}")]
    Session(String),
}

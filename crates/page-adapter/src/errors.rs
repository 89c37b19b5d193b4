//! Error types for the page driver port

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Broad classification of driver failures.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize, Error)]
pub enum AdapterErrorKind {
    /// Selector or expression the driver could not parse
    #[error("invalid selector")]
    InvalidSelector,

    /// Element handle no longer attached to the page
    #[error("target element not found")]
    TargetNotFound,

    /// Navigation timed out
    #[error("navigation timed out")]
    NavTimeout,

    /// Bounded wait elapsed without the condition holding
    #[error("wait timed out")]
    WaitTimeout,

    /// Transport-level driver failure
    #[error("driver i/o failure")]
    Io,

    /// Everything else
    #[error("internal error")]
    Internal,
}

/// Enriched error metadata passed back to higher layers.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AdapterError {
    pub kind: AdapterErrorKind,
    pub hint: Option<String>,
    pub retriable: bool,
}

impl fmt::Display for AdapterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(hint) = &self.hint {
            write!(f, ": {}", hint)?;
        }
        Ok(())
    }
}

impl std::error::Error for AdapterError {}

impl AdapterError {
    pub fn new(kind: AdapterErrorKind) -> Self {
        Self {
            kind,
            hint: None,
            retriable: false,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn retriable(mut self, flag: bool) -> Self {
        self.retriable = flag;
        self
    }
}

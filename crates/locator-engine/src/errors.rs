//! Error types for locator resolution

use thiserror::Error;

/// Locator resolution failure.
///
/// Probe-level driver failures never surface here; they are swallowed at
/// probe scope and count as zero matches. The only failure a caller sees is
/// the terminal no-match case.
#[derive(Debug, Error, Clone)]
pub enum LocatorError {
    /// No exact strategy matched and the fuzzy fallback was disabled,
    /// inapplicable, or below threshold.
    #[error("no locator found for \"{0}\"")]
    NotFound(String),
}

impl LocatorError {
    pub fn not_found(name: impl Into<String>) -> Self {
        LocatorError::NotFound(name.into())
    }
}

//! Error types for facade operations

use locator_engine::LocatorError;
use page_adapter::AdapterError;
use thiserror::Error;

/// Failure of a facade operation.
///
/// Resolution failures pass through unchanged; action failures on an
/// already-resolved handle carry the driver error unmodified. The facade
/// never retries an action and never substitutes an element.
#[derive(Debug, Error, Clone)]
pub enum ActionError {
    /// Resolution failed; no element to act on
    #[error(transparent)]
    Locator(#[from] LocatorError),

    /// The driver rejected the action on a resolved handle
    #[error("driver error: {0}")]
    Driver(#[from] AdapterError),
}

impl ActionError {
    /// Whether this failure is the terminal no-locator case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ActionError::Locator(LocatorError::NotFound(_)))
    }
}

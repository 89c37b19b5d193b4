//! The page driver trait consumed by the locator core

use crate::errors::AdapterError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Opaque reference to a live element on the page.
///
/// The id is only meaningful to the driver that issued it and only for as
/// long as the element stays attached. Handles are never persisted; the
/// cache stores the selector payload that produced them instead.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ElementHandle(pub u64);

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element-{}", self.0)
    }
}

/// Driver contract for a single live page.
///
/// Query methods return matches in document order. All element-level
/// operations may fail with `TargetNotFound` if the handle went stale
/// between resolution and the action.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Query elements by CSS selector.
    async fn query_css(&self, selector: &str) -> Result<Vec<ElementHandle>, AdapterError>;

    /// Query elements by XPath expression.
    async fn query_xpath(&self, expression: &str) -> Result<Vec<ElementHandle>, AdapterError>;

    /// Query elements by accessibility role, optionally narrowed by
    /// accessible name.
    async fn query_role(
        &self,
        role: &str,
        name: Option<&str>,
    ) -> Result<Vec<ElementHandle>, AdapterError>;

    /// Query elements whose trimmed visible text equals `text`.
    async fn query_text(&self, text: &str) -> Result<Vec<ElementHandle>, AdapterError>;

    /// Whether the element is currently visible.
    async fn is_visible(&self, element: ElementHandle) -> Result<bool, AdapterError>;

    /// Text content of the element, untrimmed, `None` when empty.
    async fn text_content(&self, element: ElementHandle) -> Result<Option<String>, AdapterError>;

    /// Click the element.
    async fn click(&self, element: ElementHandle, deadline: Duration) -> Result<(), AdapterError>;

    /// Fill a text input with `value`, replacing prior content.
    async fn fill(
        &self,
        element: ElementHandle,
        value: &str,
        deadline: Duration,
    ) -> Result<(), AdapterError>;

    /// Wait until the element is visible, bounded by `timeout`.
    async fn wait_visible(
        &self,
        element: ElementHandle,
        timeout: Duration,
    ) -> Result<(), AdapterError>;

    /// Navigate the page to `url`.
    async fn navigate(&self, url: &str, deadline: Duration) -> Result<(), AdapterError>;

    /// Wait until the page URL matches `pattern`, bounded by `timeout`.
    /// Pattern semantics (glob, regex, literal) are the driver's choice.
    async fn wait_for_url(&self, pattern: &str, timeout: Duration) -> Result<(), AdapterError>;

    /// Current page URL.
    async fn current_url(&self) -> Result<String, AdapterError>;
}

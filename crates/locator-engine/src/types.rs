//! Core types for the locator system

use page_adapter::ElementHandle;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Locator strategy enumeration.
///
/// The four exact strategies plus the fuzzy-text fallback. Exact strategies
/// are probed in the fixed order returned by [`LocatorStrategy::probe_chain`];
/// `FuzzyText` only ever appears as resolution provenance, never as a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocatorStrategy {
    /// CSS selector strategy
    Css,

    /// XPath expression strategy
    #[serde(rename = "xpath")]
    XPath,

    /// Accessibility role + accessible name strategy
    Role,

    /// Literal visible-text strategy
    Text,

    /// Approximate-text fallback
    FuzzyText,
}

impl LocatorStrategy {
    /// Get strategy name as string
    pub fn name(&self) -> &'static str {
        match self {
            LocatorStrategy::Css => "css",
            LocatorStrategy::XPath => "xpath",
            LocatorStrategy::Role => "role",
            LocatorStrategy::Text => "text",
            LocatorStrategy::FuzzyText => "fuzzy-text",
        }
    }

    /// Exact strategies in probe priority order.
    pub fn probe_chain() -> Vec<LocatorStrategy> {
        vec![
            LocatorStrategy::Css,
            LocatorStrategy::XPath,
            LocatorStrategy::Role,
            LocatorStrategy::Text,
        ]
    }
}

/// Accessibility role query: role plus optional accessible name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleQuery {
    pub role: String,
    pub name: Option<String>,
}

/// Declarative, multi-strategy element description.
///
/// Every field is independently optional; at least one should be present for
/// resolution to have anything to try. Specs are not tied to a single
/// element and are reusable across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocatorSpec {
    /// CSS selector
    pub css: Option<String>,

    /// XPath expression
    pub xpath: Option<String>,

    /// Accessibility role query
    pub role: Option<RoleQuery>,

    /// Literal visible text; also the fuzzy-fallback target
    pub text: Option<String>,

    /// Per-spec fuzzy threshold override
    pub fuzzy_threshold: Option<f64>,
}

impl LocatorSpec {
    /// Spec with only a CSS selector.
    pub fn css(selector: impl Into<String>) -> Self {
        Self {
            css: Some(selector.into()),
            ..Self::default()
        }
    }

    /// Spec with only an XPath expression.
    pub fn xpath(expression: impl Into<String>) -> Self {
        Self {
            xpath: Some(expression.into()),
            ..Self::default()
        }
    }

    /// Spec with only a visible-text query.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Spec with only a role query.
    pub fn role(role: impl Into<String>, name: Option<String>) -> Self {
        Self {
            role: Some(RoleQuery {
                role: role.into(),
                name,
            }),
            ..Self::default()
        }
    }

    pub fn with_css(mut self, selector: impl Into<String>) -> Self {
        self.css = Some(selector.into());
        self
    }

    pub fn with_xpath(mut self, expression: impl Into<String>) -> Self {
        self.xpath = Some(expression.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>, name: Option<String>) -> Self {
        self.role = Some(RoleQuery {
            role: role.into(),
            name,
        });
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_fuzzy_threshold(mut self, threshold: f64) -> Self {
        self.fuzzy_threshold = Some(threshold);
        self
    }

    /// Whether no strategy field is set at all.
    pub fn is_empty(&self) -> bool {
        self.css.is_none() && self.xpath.is_none() && self.role.is_none() && self.text.is_none()
    }

    /// Stable digest over the strategy fields, used to compose cache keys so
    /// the same element name used with different specs never collides.
    ///
    /// The fuzzy threshold is excluded: it tunes the fallback, it does not
    /// describe the element.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(b"css=");
        if let Some(css) = &self.css {
            hasher.update(css.as_bytes());
        }
        hasher.update(b"|xpath=");
        if let Some(xpath) = &self.xpath {
            hasher.update(xpath.as_bytes());
        }
        hasher.update(b"|role=");
        if let Some(role) = &self.role {
            hasher.update(role.role.as_bytes());
            hasher.update(b":");
            if let Some(name) = &role.name {
                hasher.update(name.as_bytes());
            }
        }
        hasher.update(b"|text=");
        if let Some(text) = &self.text {
            hasher.update(text.as_bytes());
        }
        let digest = hasher.finalize();
        digest[..8].iter().map(|b| format!("{:02x}", b)).collect()
    }
}

/// The concrete selector or text that produced a hit.
///
/// This is what the cache persists and what a liveness re-probe executes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum SelectorPayload {
    Css(String),
    #[serde(rename = "xpath")]
    XPath(String),
    Role { role: String, name: Option<String> },
    Text(String),
}

impl fmt::Display for SelectorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorPayload::Css(selector) => write!(f, "css:{}", selector),
            SelectorPayload::XPath(expression) => write!(f, "xpath:{}", expression),
            SelectorPayload::Role { role, name } => match name {
                Some(name) => write!(f, "role:{}[name={}]", role, name),
                None => write!(f, "role:{}", role),
            },
            SelectorPayload::Text(text) => write!(f, "text:{}", text),
        }
    }
}

/// A resolved, actionable element with provenance.
///
/// Owned transiently by the caller for the duration of one action; never
/// persisted. Provenance lives here rather than being bolted onto the
/// underlying element reference.
#[derive(Debug, Clone)]
pub struct ResolvedHandle {
    /// Live element reference
    pub element: ElementHandle,

    /// Strategy that produced the hit
    pub strategy: LocatorStrategy,

    /// Concrete payload that produced the hit (cache write-back material)
    pub payload: SelectorPayload,

    /// Whether the fuzzy fallback produced this handle
    pub is_fuzzy: bool,

    /// Text of the matched element, for fuzzy hits
    pub matched_text: Option<String>,

    /// Similarity score, for fuzzy hits
    pub similarity: Option<f64>,
}

impl ResolvedHandle {
    /// Handle produced by an exact strategy.
    pub fn exact(
        element: ElementHandle,
        strategy: LocatorStrategy,
        payload: SelectorPayload,
    ) -> Self {
        Self {
            element,
            strategy,
            payload,
            is_fuzzy: false,
            matched_text: None,
            similarity: None,
        }
    }

    /// Handle produced by the fuzzy fallback. The payload is the matched
    /// text itself so a later liveness probe is an exact-text query.
    pub fn fuzzy(element: ElementHandle, matched_text: String, similarity: f64) -> Self {
        Self {
            element,
            strategy: LocatorStrategy::FuzzyText,
            payload: SelectorPayload::Text(matched_text.clone()),
            is_fuzzy: true,
            matched_text: Some(matched_text),
            similarity: Some(similarity),
        }
    }
}

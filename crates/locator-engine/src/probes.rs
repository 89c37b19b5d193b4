//! Per-strategy probes
//!
//! One probe per exact strategy, tried in the fixed priority order
//! css -> xpath -> role -> text. A probe reports a match-count outcome;
//! driver-level failures (invalid selector syntax, transient driver errors)
//! are swallowed at probe scope and reported as zero matches so one broken
//! strategy never aborts its siblings.

use crate::types::{LocatorSpec, LocatorStrategy, SelectorPayload};
use async_trait::async_trait;
use page_adapter::{ElementHandle, PageDriver};
use tracing::debug;

/// Outcome of probing one strategy against the live page.
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    /// Strategy that ran
    pub strategy: LocatorStrategy,

    /// Payload the probe executed; `None` when the spec has no field for
    /// this strategy
    pub payload: Option<SelectorPayload>,

    /// Matches in document order
    pub matches: Vec<ElementHandle>,
}

impl ProbeOutcome {
    /// Outcome for a strategy the spec does not describe.
    pub fn skipped(strategy: LocatorStrategy) -> Self {
        Self {
            strategy,
            payload: None,
            matches: Vec::new(),
        }
    }

    /// First match in document order, paired with the payload that found it.
    pub fn first_match(&self) -> Option<(ElementHandle, &SelectorPayload)> {
        match (&self.payload, self.matches.first()) {
            (Some(payload), Some(element)) => Some((*element, payload)),
            _ => None,
        }
    }
}

/// Execute any payload query against the driver, swallowing driver failures
/// as zero matches. Also used for cache liveness re-probes.
pub async fn run_payload(driver: &dyn PageDriver, payload: &SelectorPayload) -> Vec<ElementHandle> {
    let result = match payload {
        SelectorPayload::Css(selector) => driver.query_css(selector).await,
        SelectorPayload::XPath(expression) => driver.query_xpath(expression).await,
        SelectorPayload::Role { role, name } => driver.query_role(role, name.as_deref()).await,
        SelectorPayload::Text(text) => driver.query_text(text).await,
    };

    match result {
        Ok(matches) => matches,
        Err(err) => {
            debug!(payload = %payload, error = %err, "probe query failed, treating as no match");
            Vec::new()
        }
    }
}

/// One locator strategy, probed against a live page.
#[async_trait]
pub trait StrategyProbe: Send + Sync {
    /// Which strategy this probe implements.
    fn strategy(&self) -> LocatorStrategy;

    /// Extract this strategy's payload from a spec, if present.
    fn payload_from(&self, spec: &LocatorSpec) -> Option<SelectorPayload>;

    /// Probe the page. Never fails; driver errors count as zero matches.
    async fn probe(&self, driver: &dyn PageDriver, spec: &LocatorSpec) -> ProbeOutcome {
        let Some(payload) = self.payload_from(spec) else {
            return ProbeOutcome::skipped(self.strategy());
        };

        let matches = run_payload(driver, &payload).await;
        debug!(
            strategy = self.strategy().name(),
            payload = %payload,
            matches = matches.len(),
            "probe finished"
        );

        ProbeOutcome {
            strategy: self.strategy(),
            payload: Some(payload),
            matches,
        }
    }
}

/// CSS selector probe
pub struct CssProbe;

#[async_trait]
impl StrategyProbe for CssProbe {
    fn strategy(&self) -> LocatorStrategy {
        LocatorStrategy::Css
    }

    fn payload_from(&self, spec: &LocatorSpec) -> Option<SelectorPayload> {
        spec.css.clone().map(SelectorPayload::Css)
    }
}

/// XPath expression probe
pub struct XPathProbe;

#[async_trait]
impl StrategyProbe for XPathProbe {
    fn strategy(&self) -> LocatorStrategy {
        LocatorStrategy::XPath
    }

    fn payload_from(&self, spec: &LocatorSpec) -> Option<SelectorPayload> {
        spec.xpath.clone().map(SelectorPayload::XPath)
    }
}

/// Accessibility role probe
pub struct RoleProbe;

#[async_trait]
impl StrategyProbe for RoleProbe {
    fn strategy(&self) -> LocatorStrategy {
        LocatorStrategy::Role
    }

    fn payload_from(&self, spec: &LocatorSpec) -> Option<SelectorPayload> {
        spec.role.clone().map(|query| SelectorPayload::Role {
            role: query.role,
            name: query.name,
        })
    }
}

/// Literal visible-text probe
pub struct TextProbe;

#[async_trait]
impl StrategyProbe for TextProbe {
    fn strategy(&self) -> LocatorStrategy {
        LocatorStrategy::Text
    }

    fn payload_from(&self, spec: &LocatorSpec) -> Option<SelectorPayload> {
        spec.text.clone().map(SelectorPayload::Text)
    }
}

/// The full probe set in priority order.
pub fn probe_chain() -> Vec<Box<dyn StrategyProbe>> {
    vec![
        Box::new(CssProbe),
        Box::new(XPathProbe),
        Box::new(RoleProbe),
        Box::new(TextProbe),
    ]
}

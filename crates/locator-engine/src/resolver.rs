//! Element resolver with probe-chain orchestration and fuzzy fallback

use crate::errors::LocatorError;
use crate::probes::{probe_chain, run_payload, StrategyProbe};
use crate::similarity::{length_within_slack, similarity};
use crate::types::{LocatorSpec, ResolvedHandle, SelectorPayload};
use async_trait::async_trait;
use page_adapter::{ElementHandle, PageDriver};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Resolver tuning knobs.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Global switch for the approximate-text fallback
    pub fuzzy_enabled: bool,

    /// Threshold used when the spec carries no override
    pub default_threshold: f64,

    /// Maximum character-count difference a fuzzy candidate may have
    pub length_slack: usize,

    /// Selector enumerating the interactive elements the fuzzy scan walks
    pub interactive_selector: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            fuzzy_enabled: true,
            default_threshold: 0.8,
            length_slack: 15,
            interactive_selector: "a, button, span, div".to_string(),
        }
    }
}

/// Element resolver trait
#[async_trait]
pub trait ElementResolver: Send + Sync {
    /// Resolve a spec to one concrete handle, or fail with
    /// [`LocatorError::NotFound`].
    async fn resolve(&self, spec: &LocatorSpec, name: &str)
        -> Result<ResolvedHandle, LocatorError>;
}

/// Default element resolver implementation.
///
/// Probes exact strategies in priority order and returns on the first hit;
/// the fuzzy scan runs only after every exact strategy came up empty.
/// Priority ordering trusts author-intended selectors over textual
/// heuristics.
pub struct DefaultElementResolver {
    driver: Arc<dyn PageDriver>,
    probes: Vec<Box<dyn StrategyProbe>>,
    config: ResolverConfig,
}

impl DefaultElementResolver {
    /// Create a resolver with the standard probe chain.
    pub fn new(driver: Arc<dyn PageDriver>, config: ResolverConfig) -> Self {
        Self {
            driver,
            probes: probe_chain(),
            config,
        }
    }

    async fn fuzzy_fallback(
        &self,
        target: &str,
        threshold: f64,
        name: &str,
    ) -> Result<ResolvedHandle, LocatorError> {
        let candidates = run_payload(
            &*self.driver,
            &SelectorPayload::Css(self.config.interactive_selector.clone()),
        )
        .await;
        debug!(
            element = name,
            candidates = candidates.len(),
            "starting fuzzy scan"
        );

        let mut seen_texts: HashSet<String> = HashSet::new();
        let mut best: Option<(ElementHandle, String, f64)> = None;

        for candidate in candidates {
            // Candidate-level failures skip this candidate only.
            let visible = match self.driver.is_visible(candidate).await {
                Ok(visible) => visible,
                Err(err) => {
                    debug!(%candidate, error = %err, "visibility check failed, skipping");
                    continue;
                }
            };
            if !visible {
                continue;
            }

            let text = match self.driver.text_content(candidate).await {
                Ok(Some(text)) => text,
                Ok(None) => continue,
                Err(err) => {
                    debug!(%candidate, error = %err, "text read failed, skipping");
                    continue;
                }
            };
            let text = text.trim();
            if text.is_empty() {
                continue;
            }

            // Dedup by exact text value; first occurrence wins.
            if !seen_texts.insert(text.to_string()) {
                continue;
            }

            if !length_within_slack(text, target, self.config.length_slack) {
                continue;
            }

            let score = similarity(text, target);
            debug!(%candidate, candidate_text = text, score, "fuzzy candidate scored");

            // Strict comparison keeps the earlier candidate on equal scores.
            if best.as_ref().map_or(true, |(_, _, s)| score > *s) {
                best = Some((candidate, text.to_string(), score));
            }
        }

        match best {
            Some((element, matched_text, score)) if score >= threshold => {
                info!(
                    element = name,
                    matched_text = %matched_text,
                    similarity = %format!("{:.3}", score),
                    "fuzzy match selected"
                );
                Ok(ResolvedHandle::fuzzy(element, matched_text, score))
            }
            _ => Err(LocatorError::not_found(name)),
        }
    }
}

#[async_trait]
impl ElementResolver for DefaultElementResolver {
    async fn resolve(
        &self,
        spec: &LocatorSpec,
        name: &str,
    ) -> Result<ResolvedHandle, LocatorError> {
        // Exact strategies first, in priority order. First hit wins; lower
        // strategies and the fuzzy path are not evaluated after a hit.
        for probe in &self.probes {
            let outcome = probe.probe(&*self.driver, spec).await;
            if let Some((element, payload)) = outcome.first_match() {
                info!(
                    element = name,
                    strategy = outcome.strategy.name(),
                    payload = %payload,
                    "locator resolved"
                );
                return Ok(ResolvedHandle::exact(
                    element,
                    outcome.strategy,
                    payload.clone(),
                ));
            }
        }

        if !self.config.fuzzy_enabled {
            debug!(element = name, "exact strategies exhausted, fuzzy disabled");
            return Err(LocatorError::not_found(name));
        }

        let Some(target) = spec.text.as_deref() else {
            debug!(
                element = name,
                "exact strategies exhausted, no text to fuzzy-match"
            );
            return Err(LocatorError::not_found(name));
        };

        let threshold = spec.fuzzy_threshold.unwrap_or(self.config.default_threshold);
        self.fuzzy_fallback(target, threshold, name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = ResolverConfig::default();
        assert!(config.fuzzy_enabled);
        assert_eq!(config.default_threshold, 0.8);
        assert_eq!(config.length_slack, 15);
        assert_eq!(config.interactive_selector, "a, button, span, div");
    }
}

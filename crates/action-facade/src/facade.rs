//! High-level element operations

use crate::errors::ActionError;
use locator_cache::{CacheEntry, CacheKey, CacheStore};
use locator_engine::{ElementResolver, LocatorSpec, LocatorStrategy, ResolvedHandle};
use locator_engine::probes::run_payload;
use page_adapter::PageDriver;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Timeouts for facade operations.
#[derive(Debug, Clone)]
pub struct FacadeConfig {
    /// Bounded wait for `wait_for_visible`
    pub visible_timeout: Duration,

    /// Visibility wait preceding a text read
    pub text_timeout: Duration,

    /// Deadline handed to the driver for click/fill
    pub action_timeout: Duration,

    /// Navigation deadline
    pub nav_timeout: Duration,

    /// Default bound for `wait_for_url` when the caller passes none
    pub url_timeout: Duration,
}

impl Default for FacadeConfig {
    fn default() -> Self {
        Self {
            visible_timeout: Duration::from_secs(15),
            text_timeout: Duration::from_secs(5),
            action_timeout: Duration::from_secs(30),
            nav_timeout: Duration::from_secs(30),
            url_timeout: Duration::from_secs(5),
        }
    }
}

/// The facade flow code drives.
///
/// Owns the cache store for its lifetime; the durable variant's load/flush
/// is scoped to construction/teardown of this facade, never a module-wide
/// singleton.
pub struct ActionFacade {
    driver: Arc<dyn PageDriver>,
    resolver: Arc<dyn ElementResolver>,
    cache: Arc<dyn CacheStore>,
    config: FacadeConfig,
}

impl ActionFacade {
    pub fn new(
        driver: Arc<dyn PageDriver>,
        resolver: Arc<dyn ElementResolver>,
        cache: Arc<dyn CacheStore>,
        config: FacadeConfig,
    ) -> Self {
        Self {
            driver,
            resolver,
            cache,
            config,
        }
    }

    /// Resolve through the cache, falling back to full resolution.
    ///
    /// A cache hit is only trusted after a fresh liveness probe of the
    /// cached payload; zero matches invalidates the entry and is treated
    /// exactly like a miss.
    async fn acquire(
        &self,
        spec: &LocatorSpec,
        name: &str,
    ) -> Result<ResolvedHandle, ActionError> {
        let key = CacheKey::new(name, spec.fingerprint());

        if let Some(entry) = self.cache.lookup(&key) {
            let matches = run_payload(&*self.driver, &entry.payload).await;
            if let Some(element) = matches.first() {
                debug!(
                    element = name,
                    strategy = entry.strategy.name(),
                    payload = %entry.payload,
                    "cache hit validated live"
                );
                return Ok(rehydrate(*element, &entry));
            }
            warn!(
                element = name,
                payload = %entry.payload,
                "cached locator is stale, re-resolving"
            );
            self.cache.invalidate(&key);
        }

        let handle = self.resolver.resolve(spec, name).await?;
        self.cache.record(
            key,
            CacheEntry::new(name, handle.strategy, handle.payload.clone()),
        );
        Ok(handle)
    }

    /// Click the element described by `spec`.
    pub async fn click(&self, spec: &LocatorSpec, name: &str) -> Result<(), ActionError> {
        let action_id = Uuid::new_v4();
        let started = Instant::now();
        let handle = self.acquire(spec, name).await?;

        self.driver
            .click(handle.element, self.config.action_timeout)
            .await?;

        info!(
            %action_id,
            element = name,
            strategy = handle.strategy.name(),
            latency_ms = started.elapsed().as_millis() as u64,
            "clicked"
        );
        Ok(())
    }

    /// Fill the element described by `spec` with `value`.
    pub async fn fill(
        &self,
        spec: &LocatorSpec,
        value: &str,
        name: &str,
    ) -> Result<(), ActionError> {
        let action_id = Uuid::new_v4();
        let started = Instant::now();
        let handle = self.acquire(spec, name).await?;

        self.driver
            .fill(handle.element, value, self.config.action_timeout)
            .await?;

        info!(
            %action_id,
            element = name,
            strategy = handle.strategy.name(),
            latency_ms = started.elapsed().as_millis() as u64,
            "filled"
        );
        Ok(())
    }

    /// Read the element's trimmed text, waiting briefly for visibility.
    pub async fn get_text(&self, spec: &LocatorSpec, name: &str) -> Result<String, ActionError> {
        let action_id = Uuid::new_v4();
        let handle = self.acquire(spec, name).await?;

        self.driver
            .wait_visible(handle.element, self.config.text_timeout)
            .await?;
        let text = self
            .driver
            .text_content(handle.element)
            .await?
            .unwrap_or_default();
        let text = text.trim().to_string();

        info!(
            %action_id,
            element = name,
            strategy = handle.strategy.name(),
            text = %text,
            "text retrieved"
        );
        Ok(text)
    }

    /// Wait until the element described by `spec` is visible.
    pub async fn wait_for_visible(&self, spec: &LocatorSpec, name: &str) -> Result<(), ActionError> {
        let handle = self.acquire(spec, name).await?;
        self.driver
            .wait_visible(handle.element, self.config.visible_timeout)
            .await?;
        info!(element = name, strategy = handle.strategy.name(), "visible");
        Ok(())
    }

    /// Navigate the page. Not resolution-related; a thin pass-through.
    pub async fn navigate(&self, url: &str) -> Result<(), ActionError> {
        self.driver.navigate(url, self.config.nav_timeout).await?;
        info!(%url, "navigated");
        Ok(())
    }

    /// Wait for the page URL to match `pattern`. Thin pass-through.
    pub async fn wait_for_url(
        &self,
        pattern: &str,
        timeout: Option<Duration>,
    ) -> Result<(), ActionError> {
        let timeout = timeout.unwrap_or(self.config.url_timeout);
        self.driver.wait_for_url(pattern, timeout).await?;
        info!(%pattern, "url matched");
        Ok(())
    }
}

/// Rebuild a handle from a validated cache entry.
fn rehydrate(element: page_adapter::ElementHandle, entry: &CacheEntry) -> ResolvedHandle {
    let mut handle = ResolvedHandle::exact(element, entry.strategy, entry.payload.clone());
    if entry.strategy == LocatorStrategy::FuzzyText {
        handle.is_fuzzy = true;
        if let locator_engine::SelectorPayload::Text(text) = &entry.payload {
            handle.matched_text = Some(text.clone());
        }
    }
    handle
}

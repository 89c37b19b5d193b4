//! PagePilot - self-healing locator resolution core for web test harnesses
//!
//! Flow code (page objects) describes elements declaratively and drives them
//! through [`ActionFacade`]; this crate assembles the resolution engine,
//! cache, and facade from configuration and exposes the session port the
//! surrounding harness plugs into.

pub mod config;
pub mod errors;
pub mod session;

pub use action_facade::{ActionError, ActionFacade, FacadeConfig};
pub use config::{CacheBackend, HarnessConfig};
pub use errors::HarnessError;
pub use locator_cache::{CacheEntry, CacheKey, CacheStore, FileStore, MemoryStore};
pub use locator_engine::{
    DefaultElementResolver, ElementResolver, LocatorError, LocatorSpec, LocatorStrategy,
    ResolvedHandle, ResolverConfig, RoleQuery, SelectorPayload,
};
pub use page_adapter::{AdapterError, AdapterErrorKind, ElementHandle, PageDriver};
pub use session::{ensure_session, SessionProvider};

use std::sync::Arc;

/// Initialize tracing with an env-filterable subscriber. Safe to call more
/// than once; later calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Assembled harness: one driver, one cache store, one facade.
///
/// The cache store's lifetime is tied to this value; dropping the harness
/// releases the durable store with it.
pub struct Harness {
    facade: ActionFacade,
}

impl Harness {
    /// Wire cache, resolver, and facade from configuration.
    pub fn from_config(config: &HarnessConfig, driver: Arc<dyn PageDriver>) -> Self {
        let cache: Arc<dyn CacheStore> = match config.cache.backend {
            CacheBackend::Memory => Arc::new(MemoryStore::new()),
            CacheBackend::File => Arc::new(FileStore::open(&config.cache.path)),
        };

        let resolver = Arc::new(DefaultElementResolver::new(
            driver.clone(),
            config.resolver_config(),
        ));

        let facade = ActionFacade::new(driver, resolver, cache, config.facade_config());
        Self { facade }
    }

    /// The action surface handed to page objects.
    pub fn actions(&self) -> &ActionFacade {
        &self.facade
    }
}

//! Session/auth port
//!
//! The harness never mints or persists authentication state itself; it
//! consumes a provider that guarantees valid persisted state before a
//! browser context is created and can re-login when a session expires
//! mid-run.

use crate::errors::HarnessError;
use async_trait::async_trait;
use page_adapter::PageDriver;
use std::path::PathBuf;
use tracing::{info, warn};

/// Session/auth collaborator contract.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Guarantee a valid persisted authentication state exists; returns the
    /// storage-state path to create browser contexts from.
    async fn ensure_auth(&self) -> Result<PathBuf, HarnessError>;

    /// Re-establish an expired session on the live page.
    async fn refresh_login(&self, driver: &dyn PageDriver) -> Result<(), HarnessError>;
}

/// Check a logged-in marker on the live page and refresh the session if it
/// is absent. `marker` is a selector that only matches when authenticated
/// (e.g. the logout link).
pub async fn ensure_session(
    driver: &dyn PageDriver,
    provider: &dyn SessionProvider,
    marker: &str,
) -> Result<(), HarnessError> {
    let logged_in = driver
        .query_css(marker)
        .await
        .map(|matches| !matches.is_empty())
        .unwrap_or(false);

    if logged_in {
        info!("session is valid");
        return Ok(());
    }

    warn!("session not valid, refreshing login");
    provider.refresh_login(driver).await
}

//! Cache key and entry types

use chrono::{DateTime, Utc};
use locator_engine::{LocatorStrategy, SelectorPayload};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cache key: element name composed with the spec fingerprint.
///
/// The fingerprint keeps two flows that reuse the same element name with
/// different specs from colliding in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub name: String,
    pub fingerprint: String,
}

impl CacheKey {
    pub fn new(name: impl Into<String>, fingerprint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fingerprint: fingerprint.into(),
        }
    }

    /// Flat-document key, `name#fingerprint`.
    pub fn storage_key(&self) -> String {
        format!("{}#{}", self.name, self.fingerprint)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.fingerprint)
    }
}

/// One memoized resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Element name the entry was recorded under
    pub element_name: String,

    /// Strategy that produced the hit
    pub strategy: LocatorStrategy,

    /// Concrete selector or text that produced the hit
    pub payload: SelectorPayload,

    /// When the resolution was recorded
    pub recorded_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(
        element_name: impl Into<String>,
        strategy: LocatorStrategy,
        payload: SelectorPayload,
    ) -> Self {
        Self {
            element_name: element_name.into(),
            strategy,
            payload,
            recorded_at: Utc::now(),
        }
    }
}

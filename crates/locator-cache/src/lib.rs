//! Locator cache - memoized name-to-strategy resolutions
//!
//! Maps a logical element name (plus a spec fingerprint) to the strategy and
//! payload that last resolved it. Entries are only trusted after a fresh
//! liveness probe by the caller; a probe that comes back empty invalidates
//! the entry and falls through to full resolution.
//!
//! Two backing stores, selected by configuration:
//! - in-memory, lifetime of the current run
//! - durable, a flat JSON document loaded at construction and rewritten
//!   after every mutation, surviving process restarts

pub mod model;
pub mod store;

pub use model::*;
pub use store::*;

//! Proxy Events Module
//!
//! Hookable diagnostics for the request path: connection, cache hit and
//! miss, admission, and eviction notifications, plus the per-connection
//! cache manifest dump.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::cache::CacheStore;

// == Proxy Event ==
/// Diagnostic events emitted on the request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyEvent {
    /// A client connection was accepted
    Connected { peer: String },
    /// A request was served from the cache
    CacheHit { key: String, size: usize },
    /// A request had to be fetched from its origin
    CacheMiss { key: String },
    /// A fetched body was admitted to the cache
    Stored { key: String, size: usize },
    /// An entry was evicted to satisfy the byte budget
    Evicted { key: String, size: usize },
}

// == Event Hook ==
/// Callback invoked for every ProxyEvent.
pub type EventHook = Arc<dyn Fn(&ProxyEvent) + Send + Sync>;

// == Tracing Hook ==
/// The default hook: logs each event through tracing.
pub fn tracing_hook() -> EventHook {
    Arc::new(|event: &ProxyEvent| match event {
        ProxyEvent::Connected { peer } => debug!(%peer, "connection accepted"),
        ProxyEvent::CacheHit { key, size } => info!(%key, size, "cache hit"),
        ProxyEvent::CacheMiss { key } => info!(%key, "cache miss"),
        ProxyEvent::Stored { key, size } => info!(%key, size, "cached response body"),
        ProxyEvent::Evicted { key, size } => info!(%key, size, "evicted cache entry"),
    })
}

// == Manifest ==
/// Snapshot of the cache contents from most- to least-recently-used.
#[derive(Debug, Serialize)]
struct Manifest {
    total_size: usize,
    entries: Vec<ManifestEntry>,
}

#[derive(Debug, Serialize)]
struct ManifestEntry {
    key: String,
    size: usize,
}

// == Manifest Dump ==
/// Logs the cache manifest as a single JSON debug line.
pub fn log_manifest(store: &CacheStore) {
    let manifest = Manifest {
        total_size: store.total_size(),
        entries: store
            .manifest()
            .into_iter()
            .map(|(key, size)| ManifestEntry { key, size })
            .collect(),
    };
    if let Ok(json) = serde_json::to_string(&manifest) {
        debug!(manifest = %json, "cache manifest");
    }
}

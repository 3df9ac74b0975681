//! View cache invalidation
//!
//! Mutations do not know who caches rendered views. They call
//! [`ViewCache::revalidate`] with the path of the stale view and move on.
//!
//! [`BroadcastViewCache`] fans the signal out over `tokio::sync::broadcast`
//! so renderers can subscribe, and counts revisions per path.
//!
//! ```text
//! create/update/delete ──▶ ViewCache::revalidate(path) ──▶ broadcast ──▶ renderers
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Capability to mark a cached view stale
pub trait ViewCache: Send + Sync {
    /// Mark the view rendered at `path` as stale
    fn revalidate(&self, path: &str);
}

/// Signal published when a view is revalidated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEvent {
    pub id: Uuid,
    pub path: String,
    pub revision: u64,
    pub timestamp: DateTime<Utc>,
}

/// Broadcast-backed view cache
///
/// Cheap to clone; clones share the channel and the revision table.
#[derive(Debug, Clone)]
pub struct BroadcastViewCache {
    sender: broadcast::Sender<CacheEvent>,
    revisions: Arc<RwLock<HashMap<String, u64>>>,
}

impl BroadcastViewCache {
    /// Create a cache whose channel buffers `capacity` events per subscriber
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            revisions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Subscribe to future revalidations
    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.sender.subscribe()
    }

    /// Number of times `path` has been revalidated
    pub fn revision(&self, path: &str) -> u64 {
        let revisions = match self.revisions.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        revisions.get(path).copied().unwrap_or(0)
    }

    fn bump(&self, path: &str) -> u64 {
        let mut revisions = match self.revisions.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let revision = revisions.entry(path.to_string()).or_insert(0);
        *revision += 1;
        *revision
    }
}

impl Default for BroadcastViewCache {
    fn default() -> Self {
        Self::new(256)
    }
}

impl ViewCache for BroadcastViewCache {
    fn revalidate(&self, path: &str) {
        let revision = self.bump(path);
        let event = CacheEvent {
            id: Uuid::new_v4(),
            path: path.to_string(),
            revision,
            timestamp: Utc::now(),
        };

        // Err only means nobody is listening
        let receivers = self.sender.send(event).unwrap_or(0);
        tracing::debug!(path, revision, receivers, "view revalidated");
    }
}

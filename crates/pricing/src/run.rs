//! Bulk-run state: the cached item snapshot shared by a run's batch steps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::types::ItemRef;

/// Unique bulk-run identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One logical bulk update: a snapshot of the scanned item list, sliced by
/// successive `(offset, limit)` steps.
///
/// The snapshot is taken once when the run begins and is never refreshed, so
/// repeated slices are stable and non-overlapping even while the catalog is
/// edited underneath. The caller holds no other server-side state; resuming
/// is just re-supplying the next offset.
#[derive(Debug, Clone)]
pub struct BulkRun {
    id: RunId,
    items: Vec<ItemRef>,
    started_at: DateTime<Utc>,
}

impl BulkRun {
    pub fn new(items: Vec<ItemRef>) -> Self {
        Self {
            id: RunId::new(),
            items,
            started_at: Utc::now(),
        }
    }

    pub fn id(&self) -> RunId {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Total number of items in the snapshot.
    pub fn total(&self) -> usize {
        self.items.len()
    }

    /// The `[offset, offset + limit)` window, clamped to the snapshot bounds.
    pub fn slice(&self, offset: usize, limit: usize) -> &[ItemRef] {
        let start = offset.min(self.items.len());
        let end = offset.saturating_add(limit).min(self.items.len());
        &self.items[start..end]
    }
}

/// Holds the in-flight run so successive batch steps reuse one snapshot.
///
/// Process-local and deliberately uncoordinated: two operators starting runs
/// concurrently race on `begin`, and the loser's steps continue against a
/// snapshot that is no longer registered. Writes stay idempotent for
/// unchanged inputs, so the race cannot corrupt prices.
#[derive(Debug, Default)]
pub struct RunRegistry {
    current: RwLock<Option<Arc<BulkRun>>>,
}

impl RunRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly started run, replacing any previous one.
    pub fn begin(&self, run: BulkRun) -> Arc<BulkRun> {
        let run = Arc::new(run);
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        *current = Some(Arc::clone(&run));
        run
    }

    pub fn current(&self) -> Option<Arc<BulkRun>> {
        let current = self.current.read().unwrap_or_else(|e| e.into_inner());
        current.clone()
    }

    pub fn clear(&self) {
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        *current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fxsync_core::ProductId;

    fn refs(n: u64) -> Vec<ItemRef> {
        (1..=n).map(|i| ItemRef::product(ProductId::new(i))).collect()
    }

    #[test]
    fn slice_windows_do_not_overlap() {
        let run = BulkRun::new(refs(23));
        assert_eq!(run.slice(0, 10).len(), 10);
        assert_eq!(run.slice(10, 10).len(), 10);
        assert_eq!(run.slice(20, 10).len(), 3);
        assert_eq!(run.slice(30, 10).len(), 0);
        assert_ne!(run.slice(0, 10)[9], run.slice(10, 10)[0]);
    }

    #[test]
    fn slice_clamps_past_the_end() {
        let run = BulkRun::new(refs(3));
        assert!(run.slice(usize::MAX, 10).is_empty());
        assert_eq!(run.slice(2, usize::MAX).len(), 1);
    }

    #[test]
    fn registry_replaces_the_current_run() {
        let registry = RunRegistry::new();
        assert!(registry.current().is_none());

        let first = registry.begin(BulkRun::new(refs(2)));
        let second = registry.begin(BulkRun::new(refs(5)));
        assert_ne!(first.id(), second.id());

        let current = registry.current().unwrap();
        assert_eq!(current.id(), second.id());
        assert_eq!(current.total(), 5);

        registry.clear();
        assert!(registry.current().is_none());
    }
}

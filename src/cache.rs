//! # Snapshot Cache
//! Per-resource memoization of parsed snapshots with an absolute TTL.
//!
//! Expiry is checked lazily on access; nothing sweeps in the background.
//! Each resource owns an async mutex held across check → fetch → store, so
//! concurrent misses for one resource result in a single fetch while other
//! resources proceed independently. Failed fetches hand back the resource
//! default and leave the slot untouched, so the next access retries.

use std::time::Duration;

use metrics::counter;
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::fetch::{record_failure, FailureKind, SnapshotFetcher};
use crate::snapshot::{Resource, Snapshot};

/// Default time-to-live (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug)]
struct CacheEntry {
    snapshot: Snapshot,
    fetched_at: Instant,
}

/// Where a returned snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Cached,
    Fresh,
    Fallback(FailureKind),
}

#[derive(Debug, Clone)]
pub struct Fetched {
    pub snapshot: Snapshot,
    pub origin: Origin,
}

pub struct SnapshotCache {
    fetcher: SnapshotFetcher,
    ttl: Duration,
    slots: [Mutex<Option<CacheEntry>>; Resource::COUNT],
}

impl SnapshotCache {
    pub fn new(fetcher: SnapshotFetcher, ttl: Duration) -> Self {
        Self {
            fetcher,
            ttl,
            slots: std::array::from_fn(|_| Mutex::new(None)),
        }
    }

    pub fn with_default_ttl(fetcher: SnapshotFetcher) -> Self {
        Self::new(fetcher, DEFAULT_TTL)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn fetcher(&self) -> &SnapshotFetcher {
        &self.fetcher
    }

    /// Snapshot for `resource`: cached copy while fresh, otherwise refetched.
    pub async fn get(&self, resource: Resource) -> Snapshot {
        self.get_outcome(resource).await.snapshot
    }

    pub async fn get_outcome(&self, resource: Resource) -> Fetched {
        let mut slot = self.slots[resource.index()].lock().await;

        if let Some(entry) = slot.as_ref() {
            if entry.fetched_at.elapsed() < self.ttl {
                counter!("snapshot_cache_hits_total", "resource" => resource.name()).increment(1);
                tracing::debug!(target: "cache", resource = resource.name(), "hit");
                return Fetched {
                    snapshot: entry.snapshot.clone(),
                    origin: Origin::Cached,
                };
            }
        }

        counter!("snapshot_cache_misses_total", "resource" => resource.name()).increment(1);
        match self.fetcher.try_fetch(resource).await {
            Ok(snapshot) => {
                tracing::debug!(target: "cache", resource = resource.name(), "stored fresh snapshot");
                *slot = Some(CacheEntry {
                    snapshot: snapshot.clone(),
                    fetched_at: Instant::now(),
                });
                Fetched {
                    snapshot,
                    origin: Origin::Fresh,
                }
            }
            Err(e) => {
                record_failure(resource, &e);
                Fetched {
                    snapshot: Snapshot::empty(resource),
                    origin: Origin::Fallback(e.kind()),
                }
            }
        }
    }

    /// Drop every entry unconditionally.
    pub async fn clear(&self) {
        for slot in &self.slots {
            *slot.lock().await = None;
        }
        tracing::debug!(target: "cache", "cleared");
    }

    /// Number of resources currently holding an entry (fresh or stale).
    pub async fn len(&self) -> usize {
        let mut n = 0;
        for slot in &self.slots {
            if slot.lock().await.is_some() {
                n += 1;
            }
        }
        n
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

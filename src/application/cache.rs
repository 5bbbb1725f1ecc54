//! Time-to-live cache for the last pipeline snapshot.
//!
//! One global slot: any access within the TTL reuses the stored snapshot,
//! the first access after it re-runs the pipeline. Failed refreshes are not
//! cached.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::application::pipeline::PipelineSnapshot;
use crate::domain::error::DomainError;

struct CachedSnapshot {
    stored_at: Instant,
    snapshot: Arc<PipelineSnapshot>,
}

pub struct SnapshotCache {
    ttl: Duration,
    slot: Mutex<Option<CachedSnapshot>>,
}

impl SnapshotCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// Return the cached snapshot while fresh, otherwise store and return
    /// the result of `refresh`. Concurrent callers wait for the same refresh.
    pub async fn get_or_refresh<F, Fut>(&self, refresh: F) -> Result<Arc<PipelineSnapshot>, DomainError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<PipelineSnapshot, DomainError>>,
    {
        let mut slot = self.slot.lock().await;
        if let Some(cached) = slot.as_ref() {
            if cached.stored_at.elapsed() < self.ttl {
                return Ok(cached.snapshot.clone());
            }
        }

        let snapshot = Arc::new(refresh().await?);
        *slot = Some(CachedSnapshot {
            stored_at: Instant::now(),
            snapshot: snapshot.clone(),
        });
        Ok(snapshot)
    }

    pub fn clear(&mut self) {
        *self.slot.get_mut() = None;
    }
}

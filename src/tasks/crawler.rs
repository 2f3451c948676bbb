//! Crawler Task
//!
//! Runs an active-expiration crawler against a shared engine.
//!
//! The crawler's scan strategy belongs to the embedding server. This module
//! only fixes its contract and drives it on an interval under the engine's
//! write lock, so crawler runs serialize with client calls.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{CacheEngine, Cacheable};

/// Engine shared between client handlers and background tasks.
pub type SharedEngine<V> = Arc<RwLock<CacheEngine<V>>>;

/// Wraps an engine for sharing.
pub fn shared<V>(engine: CacheEngine<V>) -> SharedEngine<V> {
    Arc::new(RwLock::new(engine))
}

// == Crawler ==
/// Active-expiration sweeper.
///
/// An implementation may read [`CacheEngine::oldest_timestamp`],
/// [`CacheEngine::now`] and [`CacheEngine::iter_lru`] to pick victims, and
/// must remove them with [`CacheEngine::reclaim`] so they are counted as
/// crawler-reclaimed rather than evicted.
pub trait Crawler<V>: Send + 'static {
    /// Runs one pass and returns the number of entries reclaimed.
    fn crawl(&mut self, engine: &mut CacheEngine<V>) -> usize;
}

/// Spawns a task that runs `crawler` every `interval`.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during shutdown.
///
/// # Example
/// ```ignore
/// let engine = shared(CacheEngine::<RawBytes>::new(1 << 20)?);
/// let handle = spawn_crawler_task(engine.clone(), my_crawler, Duration::from_secs(1));
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_crawler_task<V, C>(
    engine: SharedEngine<V>,
    mut crawler: C,
    interval: Duration,
) -> JoinHandle<()>
where
    V: Cacheable + Send + Sync + 'static,
    C: Crawler<V>,
{
    tokio::spawn(async move {
        info!("Starting crawler task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let (reclaimed, oldest) = {
                let mut guard = engine.write().await;
                let reclaimed = crawler.crawl(&mut guard);
                (reclaimed, guard.oldest_timestamp())
            };

            if reclaimed > 0 {
                info!(reclaimed, oldest, "crawler reclaimed expired entries");
            } else {
                debug!(oldest, "crawler found nothing to reclaim");
            }
        }
    })
}

//! Integration Tests for the Cache Engine
//!
//! Drives the public API through the documented store/read/evict scenarios.

use std::sync::Arc;
use std::time::Duration;

use memcache_lru::cache::{ManualClock, NO_EXPIRATION};
use memcache_lru::{
    shared, spawn_crawler_task, CacheEngine, CacheError, Cacheable, Crawler, RawBytes,
};

const NOW: i64 = 1_700_000_000;

// == Helper Functions ==

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("memcache_lru=debug"))
        .with_test_writer()
        .try_init();
}

fn create_test_engine(capacity: i64) -> (CacheEngine<RawBytes>, ManualClock) {
    init_tracing();
    let clock = ManualClock::new(NOW);
    let engine = CacheEngine::with_clock(capacity, Arc::new(clock.clone())).unwrap();
    (engine, clock)
}

fn sized(key: &str, size: usize) -> RawBytes {
    RawBytes::new(key, vec![b'v'; size])
}

// == Store / Read / Evict Walkthrough ==

#[test]
fn test_store_read_evict_walkthrough() {
    let (mut engine, _) = create_test_engine(100);

    // Store within budget
    engine.set(sized("a", 10), 0, NO_EXPIRATION, 1).unwrap();
    assert_eq!(engine.remaining_budget(), 90);
    assert_eq!(engine.stats().current_items, 1);

    // Read marks the entry touched
    let entry = engine.get("a").expect("a should be stored");
    assert!(entry.touched());

    // 95 bytes do not fit in 90: "a" is evicted to make room
    engine.set(sized("b", 95), 0, NO_EXPIRATION, 1).unwrap();
    let stats = engine.stats();
    assert_eq!(stats.evictions, 1);
    assert_eq!(stats.evicted_unfetched, 0);
    assert_eq!(stats.out_of_memory, 1);
    assert_eq!(engine.remaining_budget(), 5);

    // The evicted key is gone
    assert!(engine.get("a").is_none());
    assert_eq!(engine.stats().total_items, 2);
}

#[test]
fn test_expired_on_arrival_counts_unfetched() {
    let (mut engine, _) = create_test_engine(100);

    engine.set(sized("c", 1), 0, NOW - 10, 1).unwrap();
    assert!(engine.get("c").is_none());

    let stats = engine.stats();
    assert_eq!(stats.expired_unfetched, 1);
    assert_eq!(stats.current_items, 0);
    assert_eq!(engine.remaining_budget(), 100);
}

#[test]
fn test_flush_all_resets_budget_not_evictions() {
    let (mut engine, _) = create_test_engine(100);

    engine.set(sized("a", 60), 0, NO_EXPIRATION, 1).unwrap();
    engine.set(sized("b", 60), 0, NO_EXPIRATION, 1).unwrap();
    for key in ["c", "d", "e"] {
        engine.set(sized(key, 5), 0, NO_EXPIRATION, 1).unwrap();
    }
    let evictions = engine.stats().evictions;
    assert_eq!(evictions, 1);

    engine.flush_all();

    let stats = engine.stats();
    assert_eq!(stats.current_items, 0);
    assert_eq!(engine.remaining_budget(), stats.total_capacity);
    assert_eq!(stats.evictions, evictions);
}

#[test]
fn test_invalid_capacity() {
    let result = CacheEngine::<RawBytes>::new(0);
    assert!(matches!(result, Err(CacheError::InvalidConfiguration(_))));
}

#[test]
fn test_oversized_value_rejected() {
    let (mut engine, _) = create_test_engine(100);

    let err = engine.set(sized("huge", 101), 0, NO_EXPIRATION, 1).unwrap_err();
    assert_eq!(
        err,
        CacheError::OutOfMemory {
            requested: 101,
            remaining: 100
        }
    );
    assert_eq!(engine.stats().out_of_memory, 1);
    assert_eq!(engine.stats().total_items, 0);
}

#[test]
fn test_cas_token_round_trip() {
    let (mut engine, _) = create_test_engine(100);

    engine.set(sized("k", 3), 5, NO_EXPIRATION, 10).unwrap();
    assert!(engine.set_version_token("k", 11));

    let entry = engine.get("k").unwrap();
    assert_eq!(entry.version_token, 11);
    assert_eq!(entry.flags, 5);
    assert!(!engine.set_version_token("absent", 1));
}

#[test]
fn test_stats_snapshot_serializes() {
    let (mut engine, _) = create_test_engine(100);

    engine.set(sized("a", 10), 0, NO_EXPIRATION, 1).unwrap();
    let json = serde_json::to_value(engine.stats()).unwrap();

    assert_eq!(json["total_capacity"], 100);
    assert_eq!(json["current_items"], 1);
    assert_eq!(json["total_items"], 1);
    assert_eq!(json["evictions"], 0);
}

// == Crawler ==

/// Reclaims expired entries from the LRU tail, oldest first.
struct TailCrawler {
    max_per_run: usize,
}

impl<V: Cacheable> Crawler<V> for TailCrawler {
    fn crawl(&mut self, engine: &mut CacheEngine<V>) -> usize {
        let now = engine.now();
        if engine.oldest_timestamp() >= now {
            return 0;
        }
        let victims: Vec<String> = engine
            .iter_lru()
            .filter(|(_, entry)| entry.is_expired(now))
            .take(self.max_per_run)
            .map(|(key, _)| key.to_owned())
            .collect();
        victims.iter().filter(|key| engine.reclaim(key)).count()
    }
}

#[tokio::test]
async fn test_crawler_reclaims_in_background() {
    let (engine, clock) = create_test_engine(1000);
    let engine = shared(engine);

    {
        let mut guard = engine.write().await;
        for i in 0..5 {
            guard
                .set(sized(&format!("short{}", i), 10), 0, NOW + 1, 1)
                .unwrap();
        }
        guard.set(sized("keep", 10), 0, NO_EXPIRATION, 1).unwrap();
    }
    clock.advance(5);

    let handle = spawn_crawler_task(
        engine.clone(),
        TailCrawler { max_per_run: 2 },
        Duration::from_millis(10),
    );
    tokio::time::sleep(Duration::from_millis(300)).await;
    handle.abort();

    let guard = engine.read().await;
    let stats = guard.stats();
    assert_eq!(stats.crawler_reclaimed, 5);
    assert_eq!(stats.evictions, 0);
    assert_eq!(stats.current_items, 1);
    assert!(guard.contains("keep"));
    assert_eq!(guard.remaining_budget(), 990);
}

//! Background Sweeper Tests
//!
//! These run against the system clock with short intervals.

use std::thread;
use std::time::{Duration, Instant};

use pastebin::config::Config;
use pastebin::store::BlobStore;

fn fast_config() -> Config {
    Config::builder()
        .ttl(Duration::from_millis(50))
        .sweep_interval(Duration::from_millis(20))
        .build()
}

/// Poll until `cond` holds or `timeout` passes
fn wait_for(timeout: Duration, cond: impl Fn() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    cond()
}

#[test]
fn test_sweeper_removes_abandoned_entries() {
    let store = BlobStore::open(fast_config()).unwrap();

    for i in 0..10 {
        store.insert(format!("abandoned{}", i)).unwrap();
    }
    assert_eq!(store.len(), 10);

    assert!(wait_for(Duration::from_secs(5), || store.is_empty()));
}

#[test]
fn test_shutdown_stops_sweeper() {
    let store = BlobStore::open(fast_config()).unwrap();
    store.shutdown();
    assert!(!store.is_sweeping());

    let id = store.insert("left behind").unwrap();
    thread::sleep(Duration::from_millis(200));

    // Nobody sweeps any more, but lazy expiry still hides it
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(&id), None);

    assert_eq!(store.sweep(), 1);
    assert!(store.is_empty());
}

#[test]
fn test_shutdown_is_idempotent() {
    let store = BlobStore::open(fast_config()).unwrap();
    store.shutdown();
    store.shutdown();
    assert!(!store.is_sweeping());
}

#[test]
fn test_drop_joins_sweeper() {
    let started = Instant::now();
    {
        let store = BlobStore::open(
            Config::builder()
                .sweep_interval(Duration::from_secs(3600))
                .build(),
        )
        .unwrap();
        store.insert("bye").unwrap();
    }
    // Dropping must not wait for the next tick
    assert!(started.elapsed() < Duration::from_secs(5));
}

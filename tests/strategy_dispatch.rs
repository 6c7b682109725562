//! Dispatch assertions over a call-recording store
//!
//! Each scenario pins down which store commands a strategy resolves to,
//! and that configuration errors fire before any store interaction.

use bucketcache::testing::{FailingStore, RecordingStore};
use bucketcache::{
    CacheDriver, CacheParams, ConfigurationError, DelimiterConfig, Error, MemoryStore,
};
use std::sync::atomic::Ordering;

fn driver() -> CacheDriver<RecordingStore<MemoryStore>> {
    CacheDriver::new(
        RecordingStore::new(MemoryStore::new()),
        DelimiterConfig::default(),
    )
}

fn hash() -> CacheParams {
    CacheParams::new().with_strategy("hash")
}

#[test]
fn bogus_strategy_fails_with_zero_store_calls_on_every_entry_point() {
    let driver = driver();
    let counters = driver.store().counters();
    let params = CacheParams::new().with_strategy("bogus");

    let err = driver.get::<String>("k", &params).unwrap_err();
    assert!(matches!(
        err,
        Error::Configuration(ConfigurationError::UnknownStrategy { ref name }) if name == "bogus"
    ));
    assert!(driver.set("k", &"v", 0, &params).is_err());
    assert!(driver.delete("k", &params).is_err());

    assert_eq!(counters.total(), 0);
}

#[test]
fn chunking_splits_120_fields_into_50_50_20() {
    let driver = driver();
    let counters = driver.store().counters();

    let fields: Vec<String> = (0..120).map(|i| i.to_string()).collect();
    let params = CacheParams::new().with_strategy("hash").with_fields(fields);
    let cached: Vec<String> = driver.get("bucket", &params).unwrap();

    // Nothing stored: all fields absent, output empty, still 3 round trips
    assert!(cached.is_empty());
    assert_eq!(counters.hmget.load(Ordering::SeqCst), 3);
    assert_eq!(counters.total(), 3);
}

#[test]
fn exactly_50_fields_is_a_single_chunk() {
    let driver = driver();
    let counters = driver.store().counters();
    let fields: Vec<String> = (0..50).map(|i| i.to_string()).collect();
    let params = CacheParams::new().with_strategy("hash").with_fields(fields);
    let _: Vec<String> = driver.get("bucket", &params).unwrap();
    assert_eq!(counters.hmget.load(Ordering::SeqCst), 1);
}

#[test]
fn fifty_one_fields_spill_into_a_second_chunk() {
    let driver = driver();
    let counters = driver.store().counters();
    let fields: Vec<String> = (0..51).map(|i| i.to_string()).collect();
    let params = CacheParams::new().with_strategy("hash").with_fields(fields);
    let _: Vec<String> = driver.get("bucket", &params).unwrap();
    assert_eq!(counters.hmget.load(Ordering::SeqCst), 2);
}

#[test]
fn string_strategy_reads_flat_even_for_compound_keys() {
    let driver = driver();
    let counters = driver.store().counters();
    let params = CacheParams::new().with_strategy("string");
    let _: Vec<String> = driver.get("users#123", &params).unwrap();
    assert_eq!(counters.get.load(Ordering::SeqCst), 1);
    assert_eq!(counters.hget.load(Ordering::SeqCst), 0);
}

#[test]
fn hash_strategy_without_signals_reads_the_whole_bucket() {
    let driver = driver();
    let counters = driver.store().counters();
    let _: Vec<String> = driver.get("users", &hash()).unwrap();
    assert_eq!(counters.hvals.load(Ordering::SeqCst), 1);
}

#[test]
fn fields_win_over_key_shape_for_the_hash_strategy() {
    let driver = driver();
    let counters = driver.store().counters();
    let params = CacheParams::new()
        .with_strategy("hash")
        .with_fields(["1", "2"]);
    let _: Vec<String> = driver.get("users#123", &params).unwrap();
    assert_eq!(counters.hmget.load(Ordering::SeqCst), 1);
    assert_eq!(counters.hget.load(Ordering::SeqCst), 0);
}

#[test]
fn force_strategy_beats_everything_else() {
    let driver = driver();
    let counters = driver.store().counters();
    let params = CacheParams::new()
        .with_strategy("string")
        .with_fields(["1", "2"])
        .with_force_strategy("getAllHash");
    let _: Vec<String> = driver.get("users#123", &params).unwrap();
    assert_eq!(counters.hvals.load(Ordering::SeqCst), 1);
    assert_eq!(counters.total(), 1);
}

#[test]
fn zero_ttl_hash_write_never_touches_expiry() {
    let driver = driver();
    let counters = driver.store().counters();
    driver.set("users#1", &"v", 0, &hash()).unwrap();
    assert_eq!(counters.hset.load(Ordering::SeqCst), 1);
    assert_eq!(counters.expire.load(Ordering::SeqCst), 0);
}

#[test]
fn positive_ttl_hash_write_refreshes_the_bucket() {
    let driver = driver();
    let counters = driver.store().counters();
    driver.set("users#1", &"v", 60, &hash()).unwrap();
    assert_eq!(counters.hset.load(Ordering::SeqCst), 1);
    assert_eq!(counters.expire.load(Ordering::SeqCst), 1);
}

#[test]
fn wildcard_delete_issues_del_not_hdel() {
    let driver = driver();
    let counters = driver.store().counters();
    driver.delete("users#*", &hash()).unwrap();
    assert_eq!(counters.del.load(Ordering::SeqCst), 1);
    assert_eq!(counters.hdel.load(Ordering::SeqCst), 0);
}

#[test]
fn chunk_failure_discards_earlier_chunks() {
    let driver = CacheDriver::new(FailingStore::failing_after(2), DelimiterConfig::default());
    let fields: Vec<String> = (0..150).map(|i| i.to_string()).collect();
    let params = CacheParams::new().with_strategy("hash").with_fields(fields);

    let err = driver.get::<String>("bucket", &params).unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
    // Chunks one and two went out; the third failed and nothing leaked
    assert_eq!(driver.store().calls(), 3);
}

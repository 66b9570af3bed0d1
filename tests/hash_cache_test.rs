//! Integration tests for hash cache operations
//!
//! Runs the facade through the CacheHaus registry against the in-memory store.

use cachehaus::prelude::*;
use std::collections::HashMap;
use std::time::Duration;

fn registry() -> CacheHaus {
    let mut cachehaus = CacheHaus::new();
    cachehaus
        .register_provider("users".to_string(), HashCache::in_memory("users"))
        .expect("Failed to register provider");
    cachehaus
}

#[tokio::test]
async fn test_user_profile_scenario() {
    let cachehaus = registry();
    let users = cachehaus.get_provider("users").unwrap();

    assert!(users.set_field("u1", "name", "Alice").await.unwrap());
    assert_eq!(users.get_field("u1", "name").await.unwrap().unwrap(), "Alice");

    let mut batch = HashMap::new();
    batch.insert("age", "30");
    batch.insert("city", "NY");
    assert!(users
        .set_fields("u1", batch, Some(Duration::from_secs(60)))
        .await
        .unwrap());

    assert_eq!(users.field_count("u1").await.unwrap(), 3);
    let mut names = users.field_names("u1").await.unwrap();
    assert_eq!(names.remove(0), "name");
    names.sort();
    assert_eq!(names, vec!["age", "city"]);

    assert_eq!(users.delete_fields("u1", &["age"]).await.unwrap(), 1);
    assert_eq!(users.field_count("u1").await.unwrap(), 2);
}

#[tokio::test]
async fn test_set_fields_then_get_all_fields() {
    let cache = HashCache::in_memory("roundtrip");
    let written = [
        ("title", CacheValue::from("Rust")),
        ("pages", CacheValue::from(552)),
        ("cover", CacheValue::bytes(vec![0xff, 0xd8, 0xff])),
    ];

    cache.set_fields("book:1", written.clone(), None).await.unwrap();

    let read = cache.get_all_fields("book:1").await.unwrap();
    let expected: HashMap<String, CacheValue> = written
        .into_iter()
        .map(|(field, value)| (field.to_string(), value))
        .collect();
    assert_eq!(read, expected);
    // scalars come back as their text form
    assert_eq!(read["pages"], "552");
}

#[tokio::test]
async fn test_delete_without_fields_removes_key() {
    let cache = HashCache::in_memory("delete");
    cache
        .set_fields("k", [("f1", "a"), ("f2", "b")], None)
        .await
        .unwrap();

    assert_eq!(cache.delete_fields("k", &["f1"]).await.unwrap(), 1);
    assert!(cache.field_exists("k", "f2").await.unwrap());

    assert_eq!(cache.delete_fields("k", &[]).await.unwrap(), 1);
    assert!(cache.get_all_fields("k").await.unwrap().is_empty());
    assert_eq!(cache.delete_fields("k", &[]).await.unwrap(), 0);
}

#[tokio::test]
async fn test_increment_starts_from_zero() {
    let cache = HashCache::in_memory("counters");

    assert_eq!(cache.increment_field("fresh", "c").await.unwrap(), 1);
    assert_eq!(cache.increment_field_by("fresh", "c", 9).await.unwrap(), 10);
    assert_eq!(cache.increment_field_by("fresh", "d", -3).await.unwrap(), -3);
    assert_eq!(cache.get_field("fresh", "c").await.unwrap().unwrap(), "10");
}

#[tokio::test]
async fn test_increment_non_integer_propagates_store_error() {
    let cache = HashCache::in_memory("counters");
    cache.set_field("k", "name", "Alice").await.unwrap();

    let err = cache.increment_field("k", "name").await.unwrap_err();
    assert!(!err.is_invalid_argument());
    assert!(matches!(err, CacheError::Store(_)));
}

#[tokio::test]
async fn test_get_fields_reports_missing_fields() {
    let cache = HashCache::in_memory("mget");
    cache.set_field("k", "a", "1").await.unwrap();

    let values = cache.get_fields("k", &["a", "missing"]).await.unwrap();
    assert_eq!(values.len(), 2);
    assert_eq!(values["a"], Some(CacheValue::from("1")));
    assert_eq!(values["missing"], None);

    let absent_key = cache.get_fields("nope", &["a"]).await.unwrap();
    assert_eq!(absent_key["a"], None);
}

#[tokio::test]
async fn test_field_values_follow_store_order() {
    let cache = HashCache::in_memory("vals");
    cache
        .set_fields("k", vec![("z", "last"), ("a", "first")], None)
        .await
        .unwrap();

    let values = cache.field_values("k").await.unwrap();
    assert_eq!(values, vec![CacheValue::from("last"), CacheValue::from("first")]);
}

#[tokio::test]
async fn test_expiration_applies_to_whole_hash() {
    let cache = HashCache::in_memory("ttl");
    cache.set_field("k", "a", "1").await.unwrap();
    assert!(cache
        .set_fields("k", [("b", "2")], Some(Duration::from_millis(30)))
        .await
        .unwrap());

    tokio::time::sleep(Duration::from_millis(60)).await;

    assert_eq!(cache.field_count("k").await.unwrap(), 0);
    assert!(!cache.field_exists("k", "a").await.unwrap());
}

#[tokio::test]
async fn test_json_values() {
    let cache = HashCache::in_memory("json");
    let tags = vec!["rust", "cache"];

    cache
        .set_field("post:1", "tags", CacheValue::json(&tags).unwrap())
        .await
        .unwrap();

    let stored = cache.get_field("post:1", "tags").await.unwrap().unwrap();
    assert_eq!(stored, r#"["rust","cache"]"#);
    assert_eq!(stored.to_json::<Vec<String>>().unwrap(), tags);
}

#[tokio::test]
async fn test_invalid_arguments() {
    let cache = HashCache::in_memory("invalid");

    assert!(cache.set_field("", "f", "v").await.unwrap_err().is_invalid_argument());
    assert!(cache.get_fields("k", &[]).await.unwrap_err().is_invalid_argument());
    assert!(cache.field_names("   ").await.unwrap_err().is_invalid_argument());
    // validation failure leaves nothing behind
    assert_eq!(cache.field_count("k").await.unwrap(), 0);
}

#[tokio::test]
async fn test_clones_share_the_store() {
    let cache = HashCache::in_memory("shared");
    let clone = cache.clone();

    let handle = tokio::spawn(async move { clone.increment_field("k", "hits").await });
    handle.await.unwrap().unwrap();
    cache.increment_field("k", "hits").await.unwrap();

    assert_eq!(cache.get_field("k", "hits").await.unwrap().unwrap(), "2");
}

//! # Blocking Hash Cache
//!
//! The same hash operations from synchronous code. The blocking adapter owns
//! its own runtime, so this demo has no `#[tokio::main]`.

use cachehaus::prelude::*;
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    println!("🚀 CacheHaus Blocking Hash Cache");
    println!("================================");

    let config = CacheConfig::default().with_name("blocking-demo");
    let cache = BlockingHashCache::connect(&config)?;

    if let Err(e) = cache.ping() {
        println!("❌ Redis connection failed: {e}");
        return Ok(());
    }

    let key = "demo:counters";
    cache.set_fields(key, [("page_views", 0), ("signups", 0)], Some(Duration::from_secs(300)))?;

    for _ in 0..3 {
        cache.increment_field(key, "page_views")?;
    }
    cache.increment_field_by(key, "signups", 2)?;

    let mut counters: Vec<_> = cache.get_all_fields(key)?.into_iter().collect();
    counters.sort_by(|a, b| a.0.cmp(&b.0));
    for (field, value) in counters {
        println!("   • {field} = {value}");
    }

    // Invalid keys never reach Redis
    match cache.get_field("  ", "page_views") {
        Err(e) if e.is_invalid_argument() => println!("✅ rejected blank key: {e}"),
        other => println!("❌ unexpected: {other:?}"),
    }

    cache.delete_fields(key, &[])?;
    Ok(())
}

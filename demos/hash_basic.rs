//! # Hash Cache Basics
//!
//! This demo walks through the async hash operations against a local Redis:
//! - Loading configuration and registering the provider
//! - Writing single fields and batches with a TTL
//! - Reading fields, counters and whole hashes
//! - Scoped and whole-key deletes

use cachehaus::prelude::*;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    println!("🚀 CacheHaus Hash Basics");
    println!("========================");

    // 1. Configuration: cachehaus.toml / CACHEHAUS_CONFIG, else local defaults
    let config = AppConfig::load().unwrap_or_else(|err| {
        println!("⚠️  {err}; using redis://localhost:6379");
        AppConfig::default()
    });

    let cachehaus = CacheHaus::connect(&config)?;
    if let Err(e) = cachehaus.health_check().await {
        println!("❌ Redis connection failed: {e}");
        println!("💡 Please start Redis: docker run -d --name redis -p 6379:6379 redis:7-alpine");
        return Ok(());
    }
    println!("✅ Redis connection healthy");

    let users = cachehaus.get_provider(&config.cache.name)?;
    let key = "demo:user:1";
    users.delete_fields(key, &[]).await?;

    // 2. Writes
    println!("\n✍️  Writing fields");
    users.set_field(key, "name", "Alice").await?;
    let expiry_set = users
        .set_fields(
            key,
            [("age", CacheValue::from(30)), ("city", "NY".into())],
            Some(Duration::from_secs(60)),
        )
        .await?;
    println!("   • batch written, expiry applied: {expiry_set}");
    users
        .set_field(key, "avatar", CacheValue::bytes(vec![0x89, 0x50, 0x4e, 0x47]))
        .await?;

    // 3. Reads
    println!("\n📖 Reading fields");
    if let Some(name) = users.get_field(key, "name").await? {
        println!("   • name = {name}");
    }
    println!("   • {} fields: {:?}", users.field_count(key).await?, users.field_names(key).await?);

    let picked = users.get_fields(key, &["city", "nickname"]).await?;
    for (field, value) in &picked {
        match value {
            Some(value) => println!("   • {field} = {value}"),
            None => println!("   • {field} is not set"),
        }
    }

    // 4. Counters
    println!("\n🔢 Counters");
    users.increment_field(key, "logins").await?;
    let logins = users.increment_field_by(key, "logins", 4).await?;
    println!("   • logins = {logins}");

    // 5. Deletes
    println!("\n🗑️  Deleting");
    println!("   • removed {} field(s)", users.delete_fields(key, &["age"]).await?);
    println!("   • {} fields left", users.field_count(key).await?);
    println!("   • whole key removed: {}", users.delete_fields(key, &[]).await? == 1);

    Ok(())
}

mod memory;
mod redis;

pub use self::memory::MemoryStore;
pub use self::redis::RedisListStore;

use async_trait::async_trait;
use log::info;
use std::error::Error;
use std::sync::Arc;
use thiserror::Error as ThisError;
use crate::cli::Args;

#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("redis error: {0}")]
    Redis(#[from] ::redis::RedisError),
}

/// List operations the message board needs from its backing store.
///
/// Each call maps to exactly one store command and is atomic at the store level;
/// callers get no cross-command guarantees.
#[async_trait]
pub trait ListStore: Send + Sync {
    /// Pushes `value` to the head of the list at `key`, returning the new length.
    async fn append(&self, key: &str, value: &str) -> Result<i64, StoreError>;

    /// Elements between the inclusive bounds. Negative indices count from the tail,
    /// out-of-range bounds are clamped and an empty range yields an empty vec.
    async fn range_read(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>, StoreError>;

    async fn length(&self, key: &str) -> Result<i64, StoreError>;

    /// Removes `key`, returning how many keys were removed.
    async fn delete_key(&self, key: &str) -> Result<i64, StoreError>;

    /// Removes every key in the store.
    async fn flush_all(&self) -> Result<(), StoreError>;
}

pub fn create_store(args: &Args) -> Result<Arc<dyn ListStore>, Box<dyn Error + Send + Sync>> {
    match args.store_type.to_lowercase().as_str() {
        "redis" => {
            let store = RedisListStore::new(&args.redis_url)?;
            Ok(Arc::new(store))
        }
        "memory" => Ok(Arc::new(MemoryStore::new())),
        _ =>
            Err(
                Box::new(
                    std::io::Error::new(
                        std::io::ErrorKind::InvalidInput,
                        format!("Unsupported store type: {}", args.store_type)
                    )
                )
            ),
    }
}

pub fn initialize_store(args: &Args) -> Result<Arc<dyn ListStore>, Box<dyn Error + Send + Sync>> {
    match args.store_type.to_lowercase().as_str() {
        "redis" => info!("Messages will be stored in redis at {}", args.redis_url),
        other => info!("Messages will be stored in: {}", other),
    }
    create_store(args)
}

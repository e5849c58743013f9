use async_trait::async_trait;
use crate::store::{ ListStore, StoreError };
use log::{ debug, warn };
use redis::{ Client, AsyncCommands, RedisResult };
use redis::aio::MultiplexedConnection;
use tokio::sync::Mutex;

pub struct RedisListStore {
    client: Client,
    conn: Mutex<Option<MultiplexedConnection>>,
}

impl RedisListStore {
    /// Parses the URL only; the connection is opened on first use.
    pub fn new(url: &str) -> Result<Self, StoreError> {
        Ok(Self {
            client: Client::open(url)?,
            conn: Mutex::new(None),
        })
    }

    async fn get_connection(&self) -> Result<MultiplexedConnection, StoreError> {
        let mut guard = self.conn.lock().await;
        if let Some(conn) = guard.as_ref() {
            return Ok(conn.clone());
        }
        debug!("Opening redis connection");
        let conn = self.client.get_multiplexed_async_connection().await?;
        *guard = Some(conn.clone());
        Ok(conn)
    }

    /// Drops the cached connection after a failed command so the next call reconnects.
    async fn settle<T>(&self, result: RedisResult<T>) -> Result<T, StoreError> {
        match result {
            Ok(v) => Ok(v),
            Err(e) => {
                if e.is_io_error() || e.is_connection_dropped() || e.is_connection_refusal() {
                    warn!("Redis connection lost, will reconnect: {}", e);
                    *self.conn.lock().await = None;
                }
                Err(e.into())
            }
        }
    }
}

#[async_trait]
impl ListStore for RedisListStore {
    async fn append(&self, key: &str, value: &str) -> Result<i64, StoreError> {
        let mut conn = self.get_connection().await?;
        let result = conn.lpush(key, value).await;
        self.settle(result).await
    }

    async fn range_read(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>, StoreError> {
        let mut conn = self.get_connection().await?;
        let result = conn.lrange(key, start as isize, stop as isize).await;
        self.settle(result).await
    }

    async fn length(&self, key: &str) -> Result<i64, StoreError> {
        let mut conn = self.get_connection().await?;
        let result = conn.llen(key).await;
        self.settle(result).await
    }

    async fn delete_key(&self, key: &str) -> Result<i64, StoreError> {
        let mut conn = self.get_connection().await?;
        let result = conn.del(key).await;
        self.settle(result).await
    }

    async fn flush_all(&self) -> Result<(), StoreError> {
        let mut conn = self.get_connection().await?;
        let result = redis::cmd("FLUSHALL").query_async::<_, ()>(&mut conn).await;
        self.settle(result).await
    }
}

use async_trait::async_trait;
use crate::store::{ ListStore, StoreError };
use std::collections::{ HashMap, VecDeque };
use tokio::sync::Mutex;

/// Process-local list store with the same list semantics as redis.
#[derive(Default)]
pub struct MemoryStore {
    lists: Mutex<HashMap<String, VecDeque<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Resolves redis LRANGE bounds against a list of `len` elements.
fn resolve_range(len: usize, start: i64, stop: i64) -> Option<(usize, usize)> {
    let len = len as i64;
    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop };
    if start > stop || start >= len {
        return None;
    }
    Some((start as usize, stop.min(len - 1) as usize))
}

#[async_trait]
impl ListStore for MemoryStore {
    async fn append(&self, key: &str, value: &str) -> Result<i64, StoreError> {
        let mut lists = self.lists.lock().await;
        let list = lists.entry(key.to_string()).or_default();
        list.push_front(value.to_string());
        Ok(list.len() as i64)
    }

    async fn range_read(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>, StoreError> {
        let lists = self.lists.lock().await;
        let Some(list) = lists.get(key) else {
            return Ok(Vec::new());
        };
        Ok(match resolve_range(list.len(), start, stop) {
            Some((from, to)) => list.range(from..=to).cloned().collect(),
            None => Vec::new(),
        })
    }

    async fn length(&self, key: &str) -> Result<i64, StoreError> {
        let lists = self.lists.lock().await;
        Ok(lists.get(key).map_or(0, |l| l.len() as i64))
    }

    async fn delete_key(&self, key: &str) -> Result<i64, StoreError> {
        let mut lists = self.lists.lock().await;
        Ok(if lists.remove(key).is_some() { 1 } else { 0 })
    }

    async fn flush_all(&self) -> Result<(), StoreError> {
        self.lists.lock().await.clear();
        Ok(())
    }
}

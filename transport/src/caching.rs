//! Process-scoped memoization of immutable RPC results.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::{Transport, TransportError};

/// Methods whose results cannot change for the lifetime of the process.
pub const DEFAULT_CACHED_METHODS: &[&str] = &["eth_chainId", "eth_getCode", "net_version"];

/// `(method, serialized params)`
type CacheKey = (String, String);

/// Wraps a transport and memoizes `(method, params) -> result` for the
/// configured methods.
///
/// Entries are never invalidated and failures are never stored.
pub struct CachingTransport<T> {
    inner: T,
    cacheable: HashSet<String>,
    cache: Mutex<HashMap<CacheKey, Value>>,
    hits: AtomicU64,
}

impl<T: Transport> CachingTransport<T> {
    /// Wrap `inner`, caching [`DEFAULT_CACHED_METHODS`].
    pub fn new(inner: T) -> Self {
        Self::with_methods(inner, DEFAULT_CACHED_METHODS.iter().copied())
    }

    /// Wrap `inner`, caching exactly the given methods.
    pub fn with_methods<I, S>(inner: T, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inner,
            cacheable: methods.into_iter().map(Into::into).collect(),
            cache: Mutex::new(HashMap::new()),
            hits: AtomicU64::new(0),
        }
    }

    pub fn is_cacheable(&self, method: &str) -> bool {
        self.cacheable.contains(method)
    }

    /// Number of calls answered from the cache so far.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Number of memoized entries.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<CacheKey, Value>> {
        // The map is never left half-updated, so a poisoned lock is still usable.
        self.cache.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl<T: Transport> Transport for CachingTransport<T> {
    async fn call(&self, method: &str, params: Value) -> Result<Value, TransportError> {
        if !self.is_cacheable(method) {
            return self.inner.call(method, params).await;
        }

        let key = (method.to_string(), params.to_string());
        let cached = self.entries().get(&key).cloned();
        if let Some(hit) = cached {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(method, "rpc cache hit");
            return Ok(hit);
        }

        let result = self.inner.call(method, params).await?;
        self.entries().insert(key, result.clone());
        Ok(result)
    }
}

// src/cache.rs
//! Query cache standing in for the UI's data-fetching layer: fresh entries are
//! served without refetching, failed refreshes fall back to stale data.

use metrics::counter;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use crate::api::Resource;
use crate::error::ApiError;
use crate::factor::Factor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub resource: Resource,
    pub factor: Option<Factor>,
}

impl QueryKey {
    pub fn new(resource: Resource, factor: Option<Factor>) -> Self {
        Self { resource, factor }
    }
}

struct Entry<T> {
    fetched_at: Instant,
    data: Arc<Vec<T>>,
}

/// Result of a cache lookup. `error` is set when a fetch failed; `data` then holds
/// the last good (stale) value or is empty.
#[derive(Debug)]
pub struct Fetched<T> {
    pub data: Arc<Vec<T>>,
    pub error: Option<String>,
    pub cache_hit: bool,
    pub stale: bool,
}

pub struct QueryCache<T> {
    ttl: Duration,
    entries: RwLock<HashMap<QueryKey, Entry<T>>>,
}

impl<T> QueryCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<QueryKey, Entry<T>>> {
        self.entries.read().unwrap_or_else(|p| p.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<QueryKey, Entry<T>>> {
        self.entries.write().unwrap_or_else(|p| p.into_inner())
    }

    /// Serve `key` from cache while fresh, otherwise run `fetch`.
    ///
    /// The lock is not held across the fetch; concurrent refreshes of the same key
    /// both run and the later write wins.
    pub async fn get_or_fetch<F, Fut>(&self, key: QueryKey, fetch: F) -> Fetched<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, ApiError>>,
    {
        let cached = {
            let entries = self.read();
            entries
                .get(&key)
                .map(|e| (Arc::clone(&e.data), e.fetched_at.elapsed() < self.ttl))
        };

        if let Some((data, true)) = &cached {
            counter!("feeds_cache_hits_total", "resource" => key.resource.name()).increment(1);
            return Fetched {
                data: Arc::clone(data),
                error: None,
                cache_hit: true,
                stale: false,
            };
        }

        match fetch().await {
            Ok(fresh) => {
                let data = Arc::new(fresh);
                self.write().insert(
                    key,
                    Entry {
                        fetched_at: Instant::now(),
                        data: Arc::clone(&data),
                    },
                );
                Fetched {
                    data,
                    error: None,
                    cache_hit: false,
                    stale: false,
                }
            }
            Err(e) => {
                let stale = cached.is_some();
                if stale {
                    tracing::info!(target: "feeds", resource = key.resource.name(), "serving stale data after failed refresh");
                }
                Fetched {
                    data: cached.map(|(d, _)| d).unwrap_or_default(),
                    error: Some(e.to_string()),
                    cache_hit: false,
                    stale,
                }
            }
        }
    }

    pub fn invalidate(&self, key: &QueryKey) {
        self.write().remove(key);
    }

    pub fn clear(&self) {
        self.write().clear();
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn key() -> QueryKey {
        QueryKey::new(Resource::Signals, Some(Factor::Legal))
    }

    #[tokio::test]
    async fn fresh_entry_skips_refetch() {
        let cache: QueryCache<u32> = QueryCache::new(Duration::from_secs(60));
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let out = cache
                .get_or_fetch(key(), || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(vec![1, 2, 3])
                })
                .await;
            assert_eq!(*out.data, vec![1, 2, 3]);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_refresh_serves_stale_data() {
        let cache: QueryCache<u32> = QueryCache::new(Duration::ZERO);
        cache.get_or_fetch(key(), || async { Ok(vec![9]) }).await;

        let out = cache
            .get_or_fetch(key(), || async {
                Err(ApiError::Status {
                    status: 503,
                    text: "Service Unavailable".into(),
                })
            })
            .await;
        assert!(out.stale);
        assert_eq!(*out.data, vec![9]);
        assert_eq!(
            out.error.as_deref(),
            Some("API request failed: 503 Service Unavailable")
        );
    }

    #[tokio::test]
    async fn failure_without_cache_is_empty() {
        let cache: QueryCache<u32> = QueryCache::new(Duration::from_secs(60));
        let out = cache
            .get_or_fetch(key(), || async {
                Err(ApiError::Status {
                    status: 500,
                    text: "Internal Server Error".into(),
                })
            })
            .await;
        assert!(out.data.is_empty());
        assert!(!out.stale);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn keys_are_separate_per_factor() {
        let cache: QueryCache<&'static str> = QueryCache::new(Duration::from_secs(60));
        cache
            .get_or_fetch(QueryKey::new(Resource::Reports, None), || async { Ok(vec!["all"]) })
            .await;
        let out = cache
            .get_or_fetch(QueryKey::new(Resource::Reports, Some(Factor::Social)), || async {
                Ok(vec!["social"])
            })
            .await;
        assert!(!out.cache_hit);
        assert_eq!(cache.len(), 2);
    }
}

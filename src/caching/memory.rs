//! # 인메모리 state 캐시
//!
//! 단일 프로세스 배포와 테스트에서 사용하는 [`StateCache`] 구현입니다.
//! 만료 항목은 조회 시점에 걸러지고, `put`이 일정 간격마다 만료 항목을 쓸어냅니다.
//! 쓰기가 뜸한 환경이라면 백그라운드 정리 작업을 붙일 수 있습니다.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use crate::caching::StateCache;
use crate::errors::{AuthError, AuthResult};

/// `put` 시 만료 항목 정리 최소 간격
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(1);

/// 정리 작업 최소 주기 (`tokio::time::interval`은 0을 허용하지 않음)
const MIN_REAPER_INTERVAL: Duration = Duration::from_millis(1);

type Entries = HashMap<String, CacheEntry>;

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    expires_at: DateTime<Utc>,
}

impl CacheEntry {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// `tokio::sync::RwLock`으로 보호되는 인메모리 캐시
///
/// `Clone`은 같은 저장소를 공유하는 핸들을 만듭니다.
#[derive(Debug, Clone)]
pub struct InMemoryStateCache {
    entries: Arc<RwLock<Entries>>,
    /// 마지막 정리 시각 (Unix ms)
    last_sweep: Arc<AtomicI64>,
    sweep_interval: Duration,
}

impl Default for InMemoryStateCache {
    fn default() -> Self {
        Self {
            entries: Arc::default(),
            last_sweep: Arc::default(),
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }
}

impl InMemoryStateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// `put`이 만료 항목을 정리하는 최소 간격을 바꿉니다.
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    /// 주기적으로 만료 항목을 지우는 정리 작업과 함께 생성합니다.
    ///
    /// 정리 작업은 캐시의 약한 참조만 들고 있으며, 캐시가 모두 drop되면 종료됩니다.
    /// 1ms보다 짧은 주기는 1ms로 맞춥니다. tokio 런타임 안에서 호출해야 합니다.
    pub fn with_reaper(interval: Duration) -> Self {
        let cache = Self::new();
        let weak: Weak<RwLock<Entries>> = Arc::downgrade(&cache.entries);
        let interval = interval.max(MIN_REAPER_INTERVAL);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let Some(entries) = weak.upgrade() else {
                    log::debug!("state 캐시 정리 작업 종료");
                    break;
                };
                let removed = sweep(&mut *entries.write().await, Utc::now());
                if removed > 0 {
                    log::debug!("만료된 state {}개 정리", removed);
                }
            }
        });

        cache
    }

    /// 만료된 항목을 지우고 지운 개수를 반환합니다.
    pub async fn purge_expired(&self) -> usize {
        sweep(&mut *self.entries.write().await, Utc::now())
    }

    /// 만료 여부와 관계없이 저장된 항목 수
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// 마지막 정리 후 `sweep_interval`이 지났으면 시각을 갱신하고 `true`를 반환합니다.
    /// 쓰기 락을 잡은 상태에서만 호출합니다.
    fn sweep_due(&self, now: DateTime<Utc>) -> bool {
        let now_ms = now.timestamp_millis();
        let interval_ms = i64::try_from(self.sweep_interval.as_millis()).unwrap_or(i64::MAX);

        if now_ms.saturating_sub(self.last_sweep.load(Ordering::Relaxed)) < interval_ms {
            return false;
        }
        self.last_sweep.store(now_ms, Ordering::Relaxed);
        true
    }
}

fn sweep(entries: &mut Entries, now: DateTime<Utc>) -> usize {
    let before = entries.len();
    entries.retain(|_, entry| entry.is_fresh(now));
    before - entries.len()
}

#[async_trait]
impl StateCache for InMemoryStateCache {
    async fn put(&self, key: &str, value: &str, ttl: Duration) -> AuthResult<()> {
        let now = Utc::now();
        let expires_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| AuthError::CacheError(format!("TTL 범위 초과: {:?}", ttl)))?;
        let entry = CacheEntry {
            value: value.to_string(),
            expires_at,
        };

        let mut guard = self.entries.write().await;
        if self.sweep_due(now) {
            let removed = sweep(&mut guard, now);
            if removed > 0 {
                log::debug!("만료된 state {}개 정리", removed);
            }
        }
        guard.insert(key.to_string(), entry);
        Ok(())
    }

    async fn get(&self, key: &str) -> AuthResult<Option<String>> {
        let entry = self.entries.write().await.remove(key);

        Ok(entry
            .filter(|e| e.is_fresh(Utc::now()))
            .map(|e| e.value))
    }

    async fn contains_key(&self, key: &str) -> AuthResult<bool> {
        let now = Utc::now();
        let guard = self.entries.read().await;

        Ok(guard.get(key).is_some_and(|e| e.is_fresh(now)))
    }

    async fn remove(&self, key: &str) -> AuthResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_consumes_entry() {
        let cache = InMemoryStateCache::new();
        cache.put("state:a", "a", Duration::from_secs(60)).await.unwrap();

        assert!(cache.contains_key("state:a").await.unwrap());
        assert_eq!(cache.get("state:a").await.unwrap(), Some("a".to_string()));
        assert_eq!(cache.get("state:a").await.unwrap(), None);
        assert!(!cache.contains_key("state:a").await.unwrap());
    }

    #[tokio::test]
    async fn test_expired_entry_is_absent() {
        let cache = InMemoryStateCache::new();
        cache.put("state:b", "b", Duration::from_millis(20)).await.unwrap();

        tokio::time::sleep(Duration::from_millis(60)).await;

        assert!(!cache.contains_key("state:b").await.unwrap());
        assert_eq!(cache.get("state:b").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let cache = InMemoryStateCache::new();
        cache.put("k", "first", Duration::from_secs(60)).await.unwrap();
        cache.put("k", "second", Duration::from_secs(60)).await.unwrap();

        assert_eq!(cache.get("k").await.unwrap(), Some("second".to_string()));
    }

    #[tokio::test]
    async fn test_remove_and_purge() {
        let cache = InMemoryStateCache::new();
        cache.put("keep", "1", Duration::from_secs(60)).await.unwrap();
        cache.put("drop", "2", Duration::from_secs(60)).await.unwrap();
        cache.put("stale", "3", Duration::from_millis(10)).await.unwrap();

        cache.remove("drop").await.unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;

        assert_eq!(cache.purge_expired().await, 1);
        assert_eq!(cache.len().await, 1);
        assert!(cache.contains_key("keep").await.unwrap());
    }

    #[tokio::test]
    async fn test_reaper_removes_expired_entries() {
        let cache = InMemoryStateCache::with_reaper(Duration::from_millis(20));
        cache.put("short", "x", Duration::from_millis(10)).await.unwrap();

        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_put_sweeps_expired_entries() {
        let cache = InMemoryStateCache::new().with_sweep_interval(Duration::from_millis(10));
        for i in 0..1000 {
            cache.put(&format!("state:{}", i), "v", Duration::from_millis(1)).await.unwrap();
        }

        tokio::time::sleep(Duration::from_millis(50)).await;
        cache.put("state:fresh", "v", Duration::from_secs(60)).await.unwrap();

        assert_eq!(cache.len().await, 1);
        assert!(cache.contains_key("state:fresh").await.unwrap());
    }

    #[tokio::test]
    async fn test_default_cache_sweeps_on_put() {
        let cache = InMemoryStateCache::new();
        cache.put("state:old", "v", Duration::from_millis(1)).await.unwrap();

        tokio::time::sleep(DEFAULT_SWEEP_INTERVAL + Duration::from_millis(50)).await;
        cache.put("state:new", "v", Duration::from_secs(60)).await.unwrap();

        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_sweep_keeps_fresh_entries() {
        let cache = InMemoryStateCache::new().with_sweep_interval(Duration::ZERO);
        cache.put("state:a", "a", Duration::from_secs(60)).await.unwrap();
        cache.put("state:b", "b", Duration::from_secs(60)).await.unwrap();

        assert_eq!(cache.len().await, 2);
        assert_eq!(cache.get("state:a").await.unwrap(), Some("a".to_string()));
    }

    #[tokio::test]
    async fn test_out_of_range_ttl_is_cache_error() {
        let result = InMemoryStateCache::new().put("k", "v", Duration::MAX).await;

        assert!(matches!(result, Err(AuthError::CacheError(_))));
    }

    #[tokio::test]
    async fn test_zero_reaper_interval_is_clamped() {
        let cache = InMemoryStateCache::with_reaper(Duration::ZERO);
        cache.put("short", "x", Duration::from_millis(1)).await.unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(cache.is_empty().await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_access_with_distinct_keys() {
        let cache = InMemoryStateCache::new();
        let mut handles = Vec::new();

        for i in 0..32 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move {
                let key = format!("state:{}", i);
                let value = format!("value-{}", i);
                cache.put(&key, &value, Duration::from_secs(60)).await.unwrap();
                cache.get(&key).await.unwrap()
            }));
        }

        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.await.unwrap(), Some(format!("value-{}", i)));
        }
        assert!(cache.is_empty().await);
    }
}

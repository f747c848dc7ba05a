//! state 캐시 계층 모듈
//!
//! CSRF 방지용 state 토큰을 TTL과 함께 저장하는 키-값 저장소입니다.
//! 엔진은 [`StateCache`] trait 객체만 알고 있으며, 구현체는 생성 시 주입됩니다.
//!
//! # 구현체
//!
//! - [`memory::InMemoryStateCache`] - 단일 프로세스용 인메모리 캐시
//! - [`redis::RedisStateCache`] - 여러 인스턴스가 공유하는 Redis 캐시
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use crate::caching::{StateCache, memory::InMemoryStateCache};
//!
//! let cache: Arc<dyn StateCache> = Arc::new(InMemoryStateCache::new());
//! cache.put("oauth:state:abc:xyz", "xyz", Duration::from_secs(180)).await?;
//!
//! // get은 값을 꺼내면서 삭제합니다
//! assert_eq!(cache.get("oauth:state:abc:xyz").await?, Some("xyz".to_string()));
//! assert_eq!(cache.get("oauth:state:abc:xyz").await?, None);
//! ```
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 설정 시 Redis 캐시 사용
//! ```

pub mod memory;
pub mod redis;

use std::time::Duration;
use async_trait::async_trait;
use crate::errors::AuthResult;

/// state 토큰 저장소
///
/// 모든 연산은 여러 로그인 요청이 동시에 호출해도 안전해야 합니다.
/// 만료된 항목은 `get`과 `contains_key`에서 존재하지 않는 것으로 취급됩니다.
#[async_trait]
pub trait StateCache: Send + Sync {
    /// TTL과 함께 값을 저장합니다. 같은 키가 있으면 덮어씁니다.
    async fn put(&self, key: &str, value: &str, ttl: Duration) -> AuthResult<()>;

    /// 값을 꺼내면서 삭제합니다.
    ///
    /// 같은 키로 두 번 호출하면 두 번째는 항상 `None`입니다.
    async fn get(&self, key: &str) -> AuthResult<Option<String>>;

    /// 만료되지 않은 항목이 있는지 확인합니다. 항목을 소비하지 않습니다.
    async fn contains_key(&self, key: &str) -> AuthResult<bool>;

    async fn remove(&self, key: &str) -> AuthResult<()>;
}

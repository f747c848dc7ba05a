//! OAuth 2.0 로그인 애그리게이터
//!
//! 여러 서드파티 인증 프로바이더의 Authorization Code Flow를 하나의 엔진으로 진행하고,
//! 프로바이더마다 제각각인 응답을 표준 토큰/사용자 모델로 정규화합니다.
//!
//! # Features
//!
//! - **플로우 엔진**: authorize → callback → 토큰 교환 → 사용자 정보 → 갱신
//! - **CSRF 방지**: TTL이 있는 1회용 state 캐시 (인메모리 또는 Redis)
//! - **어댑터**: 프로바이더별 요청 생성과 응답 정규화를 trait 객체로 분리
//! - **기본 제공 프로바이더**: Huawei, LinkedIn, Douyin, Meituan
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ OAuthFlowService│ ← authorize / login / refresh
//! └─────────────────┘
//!     │         │
//!     ▼         ▼
//! ┌────────┐ ┌──────────────────┐
//! │ State  │ │ ProviderAdapter  │ ← 요청 생성, 에러 판별, 정규화
//! │ Cache  │ └──────────────────┘
//! └────────┘    │
//!               ▼
//!        ┌──────────────┐
//!        │ HttpTransport│ ← 프로바이더 호출 (reqwest)
//!        └──────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use oauth_login_aggregator::caching::memory::InMemoryStateCache;
//! use oauth_login_aggregator::config::{AuthConfig, EngineConfig};
//! use oauth_login_aggregator::providers::ProviderRegistry;
//! use oauth_login_aggregator::services::auth::OAuthFlowService;
//!
//! let registry = ProviderRegistry::with_defaults();
//! let adapter = registry.get("douyin")?;
//! let config = AuthConfig::from_env("douyin")?;
//!
//! let engine = OAuthFlowService::with_reqwest(Arc::new(InMemoryStateCache::new()), EngineConfig::from_env())?;
//! let url = engine.authorize(&config, adapter.as_ref(), None).await?;
//! ```

pub mod config;
pub mod caching;
pub mod domain;
pub mod providers;
pub mod services;
pub mod utils;
pub mod errors;

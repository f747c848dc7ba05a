//! 로그인 플로우를 담당하는 서비스 계층 모듈
//!
//! 엔진과 엔진이 프로바이더를 호출하는 전송 계층을 제공합니다.
//! 모든 협력 객체는 생성 시 주입되며 전역 싱글톤은 없습니다.
//!
//! # Features
//!
//! - Authorization Code Flow 엔진 (authorize, login, refresh)
//! - CSRF 방지용 1회용 state 관리
//! - 호출별 타임아웃과 프로바이더 에러 분류
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::OAuthFlowService;
//!
//! let engine = OAuthFlowService::with_reqwest(cache, EngineConfig::from_env())?;
//! let url = engine.authorize(&config, adapter.as_ref(), None).await?;
//! ```

pub mod auth;
pub mod http_transport;

pub use http_transport::*;

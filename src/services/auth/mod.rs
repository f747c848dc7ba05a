//! 인증 플로우 서비스 모듈
//!
//! # Security
//!
//! - CSRF 방지 (1회용 OAuth state, TTL 만료)
//! - state 검증 실패 시 네트워크 호출 없음
//! - 시크릿과 토큰은 로그에 남기지 않음

pub mod oauth_flow_service;

pub use oauth_flow_service::*;

//! # Configuration Module
//!
//! 로그인 엔진의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`auth_config`] - 프로바이더별 OAuth 클라이언트 설정
//! - [`engine_config`] - state TTL, 타임아웃 등 엔진 동작 설정
//!
//! ## 설계 원칙
//!
//! - 민감한 정보는 환경 변수로만 제공
//! - 필수 설정 누락은 패닉이 아니라 `AuthError::ConfigError`로 보고
//! - 선택 설정의 파싱 실패는 경고 후 기본값 사용
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 프로바이더 클라이언트 (프로바이더마다 반복)
//! export LINKEDIN_CLIENT_ID="your-client-id"
//! export LINKEDIN_CLIENT_SECRET="your-client-secret"
//! export LINKEDIN_REDIRECT_URI="https://yourdomain.com/oauth/linkedin/callback"
//!
//! # 엔진
//! export OAUTH_STATE_TTL_SECONDS="180"
//! export OAUTH_REQUEST_TIMEOUT_SECONDS="10"
//!
//! # state 캐시 (설정 시 Redis 사용)
//! export REDIS_URL="redis://localhost:6379"
//! ```

pub mod auth_config;
pub mod engine_config;

pub use auth_config::*;
pub use engine_config::*;

//! # Domain Module
//!
//! 로그인 엔진의 도메인 계층입니다. 정규화된 토큰과 사용자 모델을 정의합니다.
//!
//! ```text
//! 프로바이더 원본 응답 ──(어댑터 정규화)──► AuthToken / AuthUser
//! ```

pub mod models;

pub use models::*;

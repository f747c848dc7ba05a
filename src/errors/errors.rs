//! 로그인 엔진 전역에서 사용하는 에러 시스템
//!
//! OAuth 2.0 로그인 플로우에서 발생할 수 있는 모든 실패를 하나의 열거형으로 분류합니다.
//! `thiserror`를 사용하여 타입 안전하고 일관된 에러 처리를 제공하며,
//! 각 에러는 [`AuthResponseStatus`]의 숫자 상태 코드로 매핑됩니다.
//!
//! ## 에러 분류
//!
//! | AuthError | 상태 코드 | 발생 시점 |
//! |-----------|-----------|-----------|
//! | `IllegalRequest` | 5007 | state 누락/불일치/만료, 인증 코드 누락 |
//! | `RequiredRefreshToken` | 5010 | 리프레시 토큰 없이 갱신 시도 |
//! | `ProviderError` | 프로바이더 코드 또는 5000 | 200 응답 본문에 담긴 프로바이더 에러 |
//! | `RequestFailed` | 5000 | 전송 실패, 타임아웃, 파싱 불가 본문 |
//! | `UnsupportedProvider` | 5004 | 등록되지 않은 프로바이더 |
//! | `CacheError` | 5000 | state 캐시 백엔드 장애 |
//! | `ConfigError` | 5002 | 잘못된 클라이언트 설정 |
//!
//! 모든 에러는 호출자가 복구 가능한 에러이며, 엔진은 자동으로 재시도하지 않습니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::{AuthError, AuthResult, ErrorContext};
//!
//! fn parse_body(body: &str) -> AuthResult<serde_json::Value> {
//!     serde_json::from_str(body).context("응답 본문 파싱 실패")
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 로그인 엔진 에러 타입
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// state 검증 실패 또는 콜백 파라미터 누락
    #[error("Illegal request: {0}")]
    IllegalRequest(String),

    /// 리프레시 토큰 없이 갱신을 시도함
    #[error("Refresh token is required for provider {0}")]
    RequiredRefreshToken(String),

    /// 프로바이더가 응답 본문으로 실패를 알림
    ///
    /// `code`는 프로바이더 고유 에러 코드이며 없을 수도 있습니다.
    #[error("Provider error from {provider}: {message}")]
    ProviderError {
        provider: String,
        code: Option<String>,
        message: String,
    },

    /// 전송 실패, 타임아웃, 해석할 수 없는 응답
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// 레지스트리에 등록되지 않은 프로바이더
    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// state 캐시 백엔드 에러
    #[error("State cache error: {0}")]
    CacheError(String),

    /// 클라이언트 설정 누락 또는 검증 실패
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AuthError {
    /// 에러를 응답 봉투에 실을 상태 코드로 변환합니다.
    pub fn status(&self) -> AuthResponseStatus {
        match self {
            AuthError::IllegalRequest(_) => AuthResponseStatus::IllegalRequest,
            AuthError::RequiredRefreshToken(_) => AuthResponseStatus::RequiredRefreshToken,
            AuthError::UnsupportedProvider(_) => AuthResponseStatus::NoAuthSource,
            AuthError::ConfigError(_) => AuthResponseStatus::ParameterIncomplete,
            AuthError::ProviderError { .. }
            | AuthError::RequestFailed(_)
            | AuthError::CacheError(_) => AuthResponseStatus::Failure,
        }
    }

    /// 응답 봉투에 실을 숫자 코드를 반환합니다.
    ///
    /// 프로바이더 에러가 숫자 코드를 가지고 있으면 그 값을 그대로 사용합니다.
    pub fn code(&self) -> i32 {
        match self {
            AuthError::ProviderError { code: Some(code), .. } => code
                .trim()
                .parse::<i32>()
                .ok()
                .filter(|c| *c != 0)
                .unwrap_or_else(|| self.status().code()),
            _ => self.status().code(),
        }
    }
}

/// 응답 상태 코드
///
/// 성공은 2000, 실패는 5xxx 대역을 사용합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthResponseStatus {
    Success,
    Failure,
    ParameterIncomplete,
    NoAuthSource,
    IllegalRequest,
    RequiredRefreshToken,
}

impl AuthResponseStatus {
    pub fn code(&self) -> i32 {
        match self {
            AuthResponseStatus::Success => 2000,
            AuthResponseStatus::Failure => 5000,
            AuthResponseStatus::ParameterIncomplete => 5002,
            AuthResponseStatus::NoAuthSource => 5004,
            AuthResponseStatus::IllegalRequest => 5007,
            AuthResponseStatus::RequiredRefreshToken => 5010,
        }
    }

    pub fn msg(&self) -> &'static str {
        match self {
            AuthResponseStatus::Success => "Success",
            AuthResponseStatus::Failure => "Failure",
            AuthResponseStatus::ParameterIncomplete => "Parameter incomplete",
            AuthResponseStatus::NoAuthSource => "AuthSource cannot be null",
            AuthResponseStatus::IllegalRequest => "Illegal request",
            AuthResponseStatus::RequiredRefreshToken => {
                "The refresh token is required; it must not be null"
            }
        }
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AuthResult<T> = Result<T, AuthError>;

/// 외부 라이브러리 에러를 AuthError로 변환하는 확장 trait
///
/// 변환된 에러는 모두 `RequestFailed`로 분류됩니다.
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AuthResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AuthResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AuthResult<T> {
        self.map_err(|e| AuthError::RequestFailed(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AuthResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AuthError::RequestFailed(format!("{}: {}", f(), e)))
    }
}

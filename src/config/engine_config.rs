//! 로그인 엔진 동작 설정
//!
//! state 토큰 TTL, 네트워크 호출 타임아웃, 캐시 키 접두사를 관리합니다.

use std::env;
use std::time::Duration;

/// 기본 state TTL (3분)
pub const DEFAULT_STATE_TTL_SECONDS: u64 = 180;
/// 기본 네트워크 호출 타임아웃
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 10;
/// 기본 state 캐시 키 접두사
pub const DEFAULT_STATE_KEY_PREFIX: &str = "oauth:state";

/// 엔진 설정
///
/// ## 환경 변수
///
/// ```bash
/// export OAUTH_STATE_TTL_SECONDS="180"
/// export OAUTH_REQUEST_TIMEOUT_SECONDS="10"
/// export OAUTH_STATE_KEY_PREFIX="oauth:state"
/// ```
///
/// 파싱에 실패하면 경고 로그를 남기고 기본값을 사용합니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// state 토큰 유효 시간
    pub state_ttl: Duration,
    /// 프로바이더 호출 1회당 최대 대기 시간
    pub request_timeout: Duration,
    /// state 캐시 키 접두사
    pub state_key_prefix: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            state_ttl: Duration::from_secs(DEFAULT_STATE_TTL_SECONDS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECONDS),
            state_key_prefix: DEFAULT_STATE_KEY_PREFIX.to_string(),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let seconds = |key: &str, default: u64| match lookup(key) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(value) if value > 0 => value,
                _ => {
                    log::warn!("{} 파싱 실패: {:?}. 기본값 {} 사용", key, raw, default);
                    default
                }
            },
            None => default,
        };

        let state_key_prefix = lookup("OAUTH_STATE_KEY_PREFIX")
            .map(|p| p.trim().trim_end_matches(':').to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_STATE_KEY_PREFIX.to_string());

        let config = Self {
            state_ttl: Duration::from_secs(seconds("OAUTH_STATE_TTL_SECONDS", DEFAULT_STATE_TTL_SECONDS)),
            request_timeout: Duration::from_secs(seconds(
                "OAUTH_REQUEST_TIMEOUT_SECONDS",
                DEFAULT_REQUEST_TIMEOUT_SECONDS,
            )),
            state_key_prefix,
        };

        log::debug!("엔진 설정 로드됨: {:?}", config);
        config
    }

    pub fn with_state_ttl(mut self, ttl: Duration) -> Self {
        self.state_ttl = ttl;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

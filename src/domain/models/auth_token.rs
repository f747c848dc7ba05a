//! 정규화된 OAuth 액세스 토큰
//!
//! 프로바이더마다 다른 토큰 응답을 하나의 구조체로 모은 결과입니다.

use std::time::Duration;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use crate::utils::string_utils::is_valid_string;

/// 프로바이더 독립 토큰 정보
///
/// 토큰 교환 또는 갱신으로 만들어지며 이후 변경되지 않습니다.
///
/// ## 만료 시간
///
/// `expire_in`은 초 단위입니다. `0`은 "프로바이더가 만료 시간을 알려주지 않음"을 뜻하며
/// 이미 만료된 토큰으로 취급하지 않습니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    /// 액세스 토큰
    pub access_token: String,
    /// 액세스 토큰 유효 기간 (초, 0 = 알 수 없음)
    pub expire_in: i64,
    /// 리프레시 토큰 (지원하지 않는 프로바이더는 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// 앱 단위 사용자 식별자
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_id: Option<String>,
    /// 개발자 계정 단위 사용자 식별자
    #[serde(skip_serializing_if = "Option::is_none")]
    pub union_id: Option<String>,
    /// 부여된 권한 범위
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// 토큰 타입 (대부분 "Bearer")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

impl AuthToken {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            ..Self::default()
        }
    }

    /// 비어 있지 않은 리프레시 토큰을 가지고 있는지 확인합니다.
    pub fn has_refresh_token(&self) -> bool {
        self.refresh_token.as_deref().is_some_and(is_valid_string)
    }

    /// 프로바이더가 알려준 유효 기간. 보고되지 않았으면 `None`입니다.
    pub fn lifetime(&self) -> Option<Duration> {
        if self.expire_in > 0 {
            Some(Duration::from_secs(self.expire_in as u64))
        } else {
            None
        }
    }

    /// `issued_at`에 발급된 토큰이 `now` 시점에 만료되었는지 확인합니다.
    ///
    /// 유효 기간이 보고되지 않았거나 만료 시각이 표현 범위를 넘는 토큰은
    /// 만료되지 않은 것으로 봅니다.
    pub fn is_expired_at(&self, issued_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        if self.lifetime().is_none() {
            return false;
        }

        TimeDelta::try_seconds(self.expire_in)
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
            .is_some_and(|expires_at| now >= expires_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_expiry_is_not_expired() {
        let token = AuthToken::new("access");
        let issued_at = Utc::now() - chrono::Duration::days(365);

        assert_eq!(token.lifetime(), None);
        assert!(!token.is_expired_at(issued_at, Utc::now()));
    }

    #[test]
    fn test_reported_expiry() {
        let token = AuthToken {
            expire_in: 3600,
            ..AuthToken::new("access")
        };
        let issued_at = Utc::now();

        assert_eq!(token.lifetime(), Some(Duration::from_secs(3600)));
        assert!(!token.is_expired_at(issued_at, issued_at + chrono::Duration::seconds(3599)));
        assert!(token.is_expired_at(issued_at, issued_at + chrono::Duration::seconds(3600)));
    }

    #[test]
    fn test_huge_expiry_never_expires() {
        let now = Utc::now();

        for expire_in in [10_000_000_000_000, i64::MAX] {
            let token = AuthToken {
                expire_in,
                ..AuthToken::new("access")
            };

            assert!(!token.is_expired_at(now, now));
        }
    }

    #[test]
    fn test_has_refresh_token() {
        let mut token = AuthToken::new("access");
        assert!(!token.has_refresh_token());

        token.refresh_token = Some("   ".to_string());
        assert!(!token.has_refresh_token());

        token.refresh_token = Some("refresh".to_string());
        assert!(token.has_refresh_token());
    }

    #[test]
    fn test_optional_fields_are_skipped_when_serialized() {
        let json = serde_json::to_value(AuthToken::new("access")).unwrap();

        assert_eq!(json, serde_json::json!({ "access_token": "access", "expire_in": 0 }));
    }
}

//! 정규화된 사용자 정보와 성별 코드
//!
//! 모든 프로바이더의 사용자 정보는 [`AuthUser`] 하나로 정규화됩니다.
//! 프로바이더별 원본 스키마는 어댑터 밖으로 새어 나오지 않으며,
//! 원본이 필요한 호출자를 위해 `raw_user_info`에 그대로 보관합니다.

use serde::{Deserialize, Serialize};
use crate::domain::models::auth_token::AuthToken;

/// 표준 성별 코드
///
/// 성별을 제공하지 않는 프로바이더는 항상 `Unknown`으로 채웁니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthUserGender {
    Male,
    Female,
    #[default]
    Unknown,
}

impl AuthUserGender {
    /// 문자열 성별 코드를 표준 코드로 변환합니다.
    ///
    /// | 입력 | 결과 |
    /// |------|------|
    /// | `1`, `m`, `male`, `男` | `Male` |
    /// | `0`, `f`, `female`, `女` | `Female` |
    /// | 그 외, 빈 값 | `Unknown` |
    ///
    /// 반전된 코드(1 = 여성)를 쓰는 프로바이더는 어댑터에서 먼저 뒤집은 뒤 호출해야 합니다.
    pub fn from_code(code: Option<&str>) -> Self {
        let Some(code) = code else {
            return AuthUserGender::Unknown;
        };

        match code.trim().to_lowercase().as_str() {
            "1" | "m" | "male" | "男" => AuthUserGender::Male,
            "0" | "f" | "female" | "女" => AuthUserGender::Female,
            _ => AuthUserGender::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthUserGender::Male => "MALE",
            AuthUserGender::Female => "FEMALE",
            AuthUserGender::Unknown => "UNKNOWN",
        }
    }
}

/// 프로바이더 독립 사용자 정보
///
/// 로그인 1회 성공당 하나 만들어지는 값 타입입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    /// 프로바이더 내 고유 사용자 ID
    pub uuid: String,
    pub username: String,
    pub nickname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub gender: AuthUserGender,
    /// 자유 형식 위치 정보 (예: "국가 지역 도시")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// 자기소개 등 부가 설명
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    /// 로그인에 사용된 토큰
    pub token: AuthToken,
    /// 정보를 제공한 프로바이더 이름
    pub source: String,
    /// 프로바이더 원본 사용자 정보
    #[serde(default)]
    pub raw_user_info: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_from_code() {
        assert_eq!(AuthUserGender::from_code(Some("1")), AuthUserGender::Male);
        assert_eq!(AuthUserGender::from_code(Some("M")), AuthUserGender::Male);
        assert_eq!(AuthUserGender::from_code(Some("male")), AuthUserGender::Male);
        assert_eq!(AuthUserGender::from_code(Some("男")), AuthUserGender::Male);

        assert_eq!(AuthUserGender::from_code(Some("0")), AuthUserGender::Female);
        assert_eq!(AuthUserGender::from_code(Some("Female")), AuthUserGender::Female);
        assert_eq!(AuthUserGender::from_code(Some("女")), AuthUserGender::Female);

        assert_eq!(AuthUserGender::from_code(Some("2")), AuthUserGender::Unknown);
        assert_eq!(AuthUserGender::from_code(Some("-1")), AuthUserGender::Unknown);
        assert_eq!(AuthUserGender::from_code(None), AuthUserGender::Unknown);
    }

    #[test]
    fn test_gender_defaults_to_unknown() {
        assert_eq!(AuthUserGender::default(), AuthUserGender::Unknown);
    }

    #[test]
    fn test_gender_serialization() {
        let json = serde_json::to_string(&AuthUserGender::Female).unwrap();
        assert_eq!(json, "\"FEMALE\"");

        let gender: AuthUserGender = serde_json::from_str("\"MALE\"").unwrap();
        assert_eq!(gender, AuthUserGender::Male);
        assert_eq!(gender.as_str(), "MALE");
    }
}

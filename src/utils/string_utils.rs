//! # 문자열 유틸리티
//!
//! 콜백 파라미터와 프로바이더 응답 필드 정리에 쓰이는 공통 함수들입니다.

use serde::Deserialize;
use crate::errors::AuthError;

/// 프로바이더 응답의 필수 필드 검증 및 정리
///
/// 값이 없거나 공백뿐이면 `RequestFailed`를 반환합니다.
/// 필수 필드가 빠진 응답은 형식이 잘못된 응답으로 취급합니다.
///
/// # 인자
/// * `value` - 응답에서 꺼낸 값
/// * `field_name` - 필드명 (에러 메시지용)
///
/// # 예제
/// ```rust,ignore
/// use crate::utils::string_utils::require_field;
///
/// assert_eq!(require_field(Some("  abc  ".to_string()), "access_token").unwrap(), "abc");
/// assert!(require_field(None, "access_token").is_err());
/// ```
pub fn require_field(value: Option<String>, field_name: &str) -> Result<String, AuthError> {
    clean_optional_string(value).ok_or_else(|| {
        AuthError::RequestFailed(format!("응답에 필수 필드 `{}`가 없습니다", field_name))
    })
}

/// 선택적 문자열 필드 정리
///
/// None 값이거나 빈 문자열/공백만 있는 경우 None을 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 Some 옵션으로 반환합니다.
///
/// # 예제
/// ```rust,ignore
/// use crate::utils::string_utils::clean_optional_string;
///
/// assert_eq!(clean_optional_string(Some("  Hello  ".to_string())), Some("Hello".to_string()));
/// assert_eq!(clean_optional_string(Some("   ".to_string())), None);
/// assert_eq!(clean_optional_string(None), None);
/// ```
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 문자열이 유효한지 확인 (빈 문자열이 아니고 공백만으로 구성되지 않음)
///
/// # 예제
/// ```rust,ignore
/// use crate::utils::string_utils::is_valid_string;
///
/// assert_eq!(is_valid_string("Hello"), true);
/// assert_eq!(is_valid_string("   "), false);
/// ```
pub fn is_valid_string(value: &str) -> bool {
    !value.trim().is_empty()
}

/// 로그 출력용 마스킹
///
/// 앞 6자만 남기고 나머지는 `***`로 가립니다. state 토큰 등을 로그에 남길 때 사용합니다.
pub fn mask(value: &str) -> String {
    let visible: String = value.chars().take(6).collect();
    if visible.len() == value.len() {
        visible
    } else {
        format!("{}***", visible)
    }
}

/// 선택적 문자열 필드를 위한 serde deserializer
///
/// 빈 문자열이나 공백만 있는 문자열을 자동으로 None으로 변환합니다.
/// `#[serde(default, deserialize_with = "deserialize_optional_string")]`과 함께 사용합니다.
///
/// ```rust,ignore
/// // JSON: {"state": "  abc  "} → Some("abc")
/// // JSON: {"state": ""} → None
/// // JSON: {"state": null} → None
/// ```
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_field() {
        assert_eq!(require_field(Some("token".to_string()), "access_token").unwrap(), "token");
        assert_eq!(require_field(Some("  token  ".to_string()), "access_token").unwrap(), "token");

        match require_field(Some("   ".to_string()), "access_token") {
            Err(AuthError::RequestFailed(msg)) => assert!(msg.contains("access_token")),
            other => panic!("Expected RequestFailed, got {:?}", other),
        }
        assert!(require_field(None, "uuid").is_err());
    }

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some("Hello".to_string())), Some("Hello".to_string()));
        assert_eq!(clean_optional_string(Some("  World  ".to_string())), Some("World".to_string()));
        assert_eq!(clean_optional_string(Some("".to_string())), None);
        assert_eq!(clean_optional_string(Some("   ".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[test]
    fn test_is_valid_string() {
        assert!(is_valid_string("Hello"));
        assert!(is_valid_string("  World  "));
        assert!(!is_valid_string(""));
        assert!(!is_valid_string("   "));
        assert!(!is_valid_string("\t\n"));
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask("abc"), "abc");
        assert_eq!(mask("0123456789abcdef"), "012345***");
        assert_eq!(mask(""), "");
    }

    #[test]
    fn test_deserialize_optional_string() {
        #[derive(Deserialize)]
        struct Callback {
            #[serde(default, deserialize_with = "deserialize_optional_string")]
            authorization_code: Option<String>,
        }

        let result: Callback = serde_json::from_str(r#"{"authorization_code": "  abc  "}"#).unwrap();
        assert_eq!(result.authorization_code, Some("abc".to_string()));

        let result: Callback = serde_json::from_str(r#"{"authorization_code": ""}"#).unwrap();
        assert_eq!(result.authorization_code, None);

        let result: Callback = serde_json::from_str(r#"{"authorization_code": null}"#).unwrap();
        assert_eq!(result.authorization_code, None);

        // 필드가 없으면 default
        let result: Callback = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(result.authorization_code, None);
    }
}

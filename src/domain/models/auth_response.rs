//! 통일된 응답 봉투
//!
//! `refresh`와 `login_response`가 돌려주는 결과 형식입니다.
//! 성공이면 `code = 2000`과 데이터를, 실패면 에러 코드와 메시지를 담습니다.

use serde::{Deserialize, Serialize};
use crate::errors::{AuthError, AuthResponseStatus, AuthResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse<T> {
    /// 상태 코드 (2000 = 성공)
    pub code: i32,
    /// 상태 메시지
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    /// 성공 데이터
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> AuthResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: AuthResponseStatus::Success.code(),
            msg: None,
            data: Some(data),
        }
    }

    pub fn failure(error: &AuthError) -> Self {
        Self {
            code: error.code(),
            msg: Some(error.to_string()),
            data: None,
        }
    }

    pub fn ok(&self) -> bool {
        self.code == AuthResponseStatus::Success.code()
    }
}

impl<T> From<AuthResult<T>> for AuthResponse<T> {
    fn from(result: AuthResult<T>) -> Self {
        match result {
            Ok(data) => AuthResponse::success(data),
            Err(error) => AuthResponse::failure(&error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let response = AuthResponse::success("token".to_string());

        assert!(response.ok());
        assert_eq!(response.code, 2000);
        assert_eq!(response.data.as_deref(), Some("token"));
        assert_eq!(response.msg, None);
    }

    #[test]
    fn test_failure_envelope_from_result() {
        let result: AuthResult<String> =
            Err(AuthError::RequiredRefreshToken("douyin".to_string()));
        let response = AuthResponse::from(result);

        assert!(!response.ok());
        assert_eq!(response.code, 5010);
        assert!(response.data.is_none());
        assert!(response.msg.unwrap().contains("douyin"));
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let response = AuthResponse::success(1);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json, serde_json::json!({ "code": 2000, "data": 1 }));
    }
}

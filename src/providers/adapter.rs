//! # 프로바이더 어댑터 계약
//!
//! 엔진은 프로바이더를 구분하지 않고 [`ProviderAdapter`] trait 객체만 호출합니다.
//! 어댑터 메서드는 모두 순수 함수입니다. 요청 함수는 실행할 [`ProviderRequest`] 값을
//! 돌려주고, 실제 전송은 엔진이 [`crate::services::HttpTransport`]로 수행합니다.
//!
//! ```text
//! token_request ──► 전송 ──► check_response ──► normalize_token
//! user_info_request ─┐
//! supplementary ─────┴► 전송 ──► check_response ──► normalize_user
//! ```

use std::collections::HashMap;
use serde_json::Value;
use crate::config::AuthConfig;
use crate::domain::{AuthCallback, AuthToken, AuthUser};
use crate::errors::AuthResult;
use crate::providers::descriptor::ProviderDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// 엔진이 실행할 HTTP 요청 기술
///
/// POST 요청의 `form`은 `application/x-www-form-urlencoded` 본문으로 전송됩니다.
/// 값에 시크릿이 들어갈 수 있으므로 로그에는 [`ProviderRequest::endpoint`]만 남깁니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRequest {
    pub method: HttpMethod,
    pub url: String,
    pub form: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl ProviderRequest {
    fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            form: Vec::new(),
            headers: Vec::new(),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    pub fn form(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.push((key.into(), value.into()));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn bearer(self, access_token: &str) -> Self {
        self.header("Authorization", format!("Bearer {}", access_token))
    }

    /// 쿼리스트링을 제외한 URL
    pub fn endpoint(&self) -> &str {
        self.url.split('?').next().unwrap_or(&self.url)
    }

    pub fn form_value(&self, key: &str) -> Option<&str> {
        self.form
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// 200 응답 본문에 담긴 프로바이더 에러
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderFailure {
    pub code: Option<String>,
    pub message: String,
}

impl ProviderFailure {
    pub fn new(code: Option<String>, message: Option<String>) -> Self {
        Self {
            code,
            message: message.unwrap_or_else(|| "unknown provider error".to_string()),
        }
    }
}

/// 사용자 정규화 입력
///
/// `primary`는 사용자 정보 응답, `supplements`는 슬롯 이름별 추가 호출 응답입니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPayload {
    pub primary: Value,
    pub supplements: HashMap<String, Value>,
}

impl UserPayload {
    pub fn new(primary: Value) -> Self {
        Self {
            primary,
            supplements: HashMap::new(),
        }
    }

    pub fn with_supplement(mut self, slot: impl Into<String>, value: Value) -> Self {
        self.supplements.insert(slot.into(), value);
        self
    }

    pub fn supplement(&self, slot: &str) -> Option<&Value> {
        self.supplements.get(slot)
    }
}

/// 프로바이더별 요청 생성과 응답 정규화
///
/// 구현체는 상태를 갖지 않아야 하며 여러 요청에서 동시에 호출됩니다.
pub trait ProviderAdapter: Send + Sync {
    fn descriptor(&self) -> &ProviderDescriptor;

    fn name(&self) -> &str {
        &self.descriptor().name
    }

    /// state를 포함한 인가 페이지 URL
    fn authorize_url(&self, config: &AuthConfig, state: &str) -> String;

    /// 콜백에서 인가 코드를 꺼냅니다.
    fn authorization_code<'a>(&self, callback: &'a AuthCallback) -> &'a str {
        &callback.code
    }

    fn token_request(&self, config: &AuthConfig, code: &str) -> ProviderRequest;

    fn user_info_request(&self, config: &AuthConfig, token: &AuthToken) -> ProviderRequest;

    /// 사용자 정보 이후 순서대로 실행할 추가 호출 (슬롯 이름, 요청)
    fn supplementary_requests(
        &self,
        _config: &AuthConfig,
        _token: &AuthToken,
    ) -> Vec<(String, ProviderRequest)> {
        Vec::new()
    }

    fn refresh_request(&self, config: &AuthConfig, refresh_token: &str) -> ProviderRequest;

    /// 응답 본문이 프로바이더 에러인지 판별합니다. 모든 응답에 대해 정규화 전에 호출됩니다.
    fn check_response(&self, raw: &Value) -> Option<ProviderFailure>;

    fn normalize_token(&self, raw: &Value) -> AuthResult<AuthToken>;

    fn normalize_user(&self, payload: &UserPayload, token: AuthToken) -> AuthResult<AuthUser>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_builder() {
        let request = ProviderRequest::post("https://example.com/token?client_secret=s")
            .form("code", "abc")
            .bearer("tok");

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.endpoint(), "https://example.com/token");
        assert_eq!(request.form_value("code"), Some("abc"));
        assert_eq!(request.form_value("missing"), None);
        assert_eq!(
            request.headers,
            vec![("Authorization".to_string(), "Bearer tok".to_string())]
        );
    }

    #[test]
    fn test_user_payload_supplements() {
        let payload = UserPayload::new(json!({ "id": "1" }))
            .with_supplement("email", json!({ "elements": [] }));

        assert!(payload.supplement("email").is_some());
        assert!(payload.supplement("phone").is_none());
    }

    #[test]
    fn test_failure_default_message() {
        let failure = ProviderFailure::new(Some("42".to_string()), None);

        assert_eq!(failure.message, "unknown provider error");
    }
}

//! # 화웨이 어댑터
//!
//! - 토큰/사용자 정보/갱신 모두 form POST
//! - 인가 코드는 콜백의 `authorization_code`로 전달됩니다
//! - 성별 코드가 반전되어 있습니다 (1 = 여성, 0 = 남성)
//! - 에러는 `NSP_STATUS` 또는 `error` 필드로 알려옵니다

use chrono::Utc;
use serde_json::Value;
use crate::config::AuthConfig;
use crate::domain::{AuthCallback, AuthToken, AuthUser, AuthUserGender};
use crate::errors::AuthResult;
use crate::providers::adapter::{ProviderAdapter, ProviderFailure, ProviderRequest, UserPayload};
use crate::providers::descriptor::ProviderDescriptor;
use crate::utils::json_utils::{has_field, int_field, str_field};
use crate::utils::string_utils::require_field;
use crate::utils::url_builder::UrlBuilder;

/// 화웨이는 scope를 인코딩된 문자열 그대로 받아야 합니다.
const BASE_PROFILE_SCOPE: &str = "https%3A%2F%2Fwww.huawei.com%2Fauth%2Faccount%2Fbase.profile";

#[derive(Debug, Clone)]
pub struct HuaweiAdapter {
    descriptor: ProviderDescriptor,
}

impl Default for HuaweiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl HuaweiAdapter {
    pub fn new() -> Self {
        Self::with_descriptor(ProviderDescriptor::huawei())
    }

    pub fn with_descriptor(descriptor: ProviderDescriptor) -> Self {
        Self { descriptor }
    }

    /// 반전된 성별 코드를 표준 코드로 바꿉니다. 1과 0만 뒤집고 나머지는 그대로 둡니다.
    fn real_gender(raw: &Value) -> AuthUserGender {
        let Some(code) = str_field(raw, "gender") else {
            return AuthUserGender::Unknown;
        };

        let canonical = match code.as_str() {
            "1" => "0",
            "0" => "1",
            other => other,
        };
        AuthUserGender::from_code(Some(canonical))
    }
}

impl ProviderAdapter for HuaweiAdapter {
    fn descriptor(&self) -> &ProviderDescriptor {
        &self.descriptor
    }

    fn authorize_url(&self, config: &AuthConfig, state: &str) -> String {
        UrlBuilder::from_base_url(&self.descriptor.authorize)
            .query_param("response_type", "code")
            .query_param("client_id", config.client_id())
            .query_param("redirect_uri", config.redirect_uri())
            .query_param("access_type", "offline")
            .query_param_encoded("scope", BASE_PROFILE_SCOPE)
            .query_param("state", state)
            .build()
    }

    fn authorization_code<'a>(&self, callback: &'a AuthCallback) -> &'a str {
        callback
            .authorization_code
            .as_deref()
            .filter(|code| !code.trim().is_empty())
            .unwrap_or(&callback.code)
    }

    fn token_request(&self, config: &AuthConfig, code: &str) -> ProviderRequest {
        ProviderRequest::post(&self.descriptor.access_token)
            .form("grant_type", "authorization_code")
            .form("code", code)
            .form("client_id", config.client_id())
            .form("client_secret", config.client_secret())
            .form("redirect_uri", config.redirect_uri())
    }

    fn user_info_request(&self, _config: &AuthConfig, token: &AuthToken) -> ProviderRequest {
        ProviderRequest::post(&self.descriptor.user_info)
            .form("nsp_ts", Utc::now().timestamp_millis().to_string())
            .form("access_token", &token.access_token)
            .form("nsp_fmt", "JS")
            .form("nsp_svc", "OpenUP.User.getInfo")
    }

    fn refresh_request(&self, config: &AuthConfig, refresh_token: &str) -> ProviderRequest {
        ProviderRequest::post(&self.descriptor.refresh)
            .form("client_id", config.client_id())
            .form("client_secret", config.client_secret())
            .form("refresh_token", refresh_token)
            .form("grant_type", "refresh_token")
    }

    fn check_response(&self, raw: &Value) -> Option<ProviderFailure> {
        if has_field(raw, "NSP_STATUS") {
            return Some(ProviderFailure::new(
                str_field(raw, "NSP_STATUS"),
                str_field(raw, "error"),
            ));
        }

        if has_field(raw, "error") {
            let message = format!(
                "{}:{}",
                str_field(raw, "sub_error").unwrap_or_default(),
                str_field(raw, "error_description").unwrap_or_default()
            );
            return Some(ProviderFailure::new(str_field(raw, "error"), Some(message)));
        }

        None
    }

    fn normalize_token(&self, raw: &Value) -> AuthResult<AuthToken> {
        Ok(AuthToken {
            access_token: require_field(str_field(raw, "access_token"), "access_token")?,
            expire_in: int_field(raw, "expires_in"),
            refresh_token: str_field(raw, "refresh_token"),
            scope: str_field(raw, "scope"),
            token_type: str_field(raw, "token_type"),
            ..AuthToken::default()
        })
    }

    fn normalize_user(&self, payload: &UserPayload, token: AuthToken) -> AuthResult<AuthUser> {
        let raw = &payload.primary;
        let username = str_field(raw, "userName").unwrap_or_default();

        Ok(AuthUser {
            uuid: require_field(str_field(raw, "userID"), "userID")?,
            nickname: username.clone(),
            username,
            avatar: str_field(raw, "headPictureURL"),
            email: None,
            gender: Self::real_gender(raw),
            location: None,
            remark: None,
            token,
            source: self.descriptor.name.clone(),
            raw_user_info: raw.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> AuthConfig {
        AuthConfig::new("hw-client", "hw-secret", "https://app.example.com/huawei/callback").unwrap()
    }

    #[test]
    fn test_authorize_url_keeps_encoded_scope() {
        let url = HuaweiAdapter::new().authorize_url(&config(), "abc123");

        assert!(url.starts_with("https://oauth-login.cloud.huawei.com/oauth2/v2/authorize?"));
        assert!(url.contains("access_type=offline"));
        assert!(url.contains(&format!("scope={}", BASE_PROFILE_SCOPE)));
        assert!(!url.contains("%252F"));
        assert!(url.ends_with("state=abc123"));
    }

    #[test]
    fn test_authorization_code_prefers_dedicated_field() {
        let adapter = HuaweiAdapter::new();
        let callback = AuthCallback::new("plain", "s").with_authorization_code("dedicated");

        assert_eq!(adapter.authorization_code(&callback), "dedicated");
        assert_eq!(adapter.authorization_code(&AuthCallback::new("plain", "s")), "plain");
    }

    #[test]
    fn test_user_info_request_form() {
        let request = HuaweiAdapter::new().user_info_request(&config(), &AuthToken::new("tok"));

        assert_eq!(request.form_value("access_token"), Some("tok"));
        assert_eq!(request.form_value("nsp_svc"), Some("OpenUP.User.getInfo"));
        assert!(request.form_value("nsp_ts").is_some_and(|ts| ts.parse::<i64>().is_ok()));
    }

    #[test]
    fn test_inverted_gender() {
        let adapter = HuaweiAdapter::new();
        let user = |gender: Value| {
            let payload = UserPayload::new(json!({ "userID": "u1", "userName": "kim", "gender": gender }));
            adapter.normalize_user(&payload, AuthToken::new("tok")).unwrap().gender
        };

        assert_eq!(user(json!(1)), AuthUserGender::Female);
        assert_eq!(user(json!(0)), AuthUserGender::Male);
        assert_eq!(user(json!(2)), AuthUserGender::Unknown);
        assert_eq!(user(Value::Null), AuthUserGender::Unknown);
    }

    #[test]
    fn test_normalize_user_fields() {
        let payload = UserPayload::new(json!({
            "userID": 10086,
            "userName": "hw-user",
            "headPictureURL": "https://img.example.com/a.png"
        }));

        let user = HuaweiAdapter::new()
            .normalize_user(&payload, AuthToken::new("tok"))
            .unwrap();

        assert_eq!(user.uuid, "10086");
        assert_eq!(user.nickname, "hw-user");
        assert_eq!(user.avatar.as_deref(), Some("https://img.example.com/a.png"));
        assert_eq!(user.source, "huawei");
        assert_eq!(user.raw_user_info["userName"], "hw-user");
    }

    #[test]
    fn test_error_predicates() {
        let adapter = HuaweiAdapter::new();

        let nsp = adapter
            .check_response(&json!({ "NSP_STATUS": 6, "error": "session timeout" }))
            .unwrap();
        assert_eq!(nsp.code.as_deref(), Some("6"));
        assert_eq!(nsp.message, "session timeout");

        let oauth = adapter
            .check_response(&json!({
                "error": "1101",
                "sub_error": "20152",
                "error_description": "invalid code"
            }))
            .unwrap();
        assert_eq!(oauth.message, "20152:invalid code");

        assert!(adapter.check_response(&json!({ "access_token": "x" })).is_none());
    }

    #[test]
    fn test_normalize_token_requires_access_token() {
        let adapter = HuaweiAdapter::new();

        let token = adapter
            .normalize_token(&json!({ "access_token": "a", "expires_in": 3600, "refresh_token": "r" }))
            .unwrap();
        assert_eq!(token.expire_in, 3600);
        assert_eq!(token.refresh_token.as_deref(), Some("r"));

        assert!(adapter.normalize_token(&json!({ "expires_in": 3600 })).is_err());
    }
}

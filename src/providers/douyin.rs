//! # 더우인(抖音) 어댑터
//!
//! 클라이언트 ID를 `client_key`로 보내고, 모든 응답 값이 `data` 객체 안에 들어 있습니다.
//! 에러는 `message == "error"` 또는 `data.error_code != 0`으로 판별합니다.

use serde_json::Value;
use crate::config::AuthConfig;
use crate::domain::{AuthToken, AuthUser, AuthUserGender};
use crate::errors::AuthResult;
use crate::providers::adapter::{ProviderAdapter, ProviderFailure, ProviderRequest, UserPayload};
use crate::providers::descriptor::ProviderDescriptor;
use crate::utils::json_utils::{int_field, str_field};
use crate::utils::string_utils::require_field;
use crate::utils::url_builder::UrlBuilder;

const DEFAULT_SCOPE: &str = "user_info";

static EMPTY: Value = Value::Null;

fn data(raw: &Value) -> &Value {
    raw.get("data").unwrap_or(&EMPTY)
}

#[derive(Debug, Clone)]
pub struct DouyinAdapter {
    descriptor: ProviderDescriptor,
}

impl Default for DouyinAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl DouyinAdapter {
    pub fn new() -> Self {
        Self::with_descriptor(ProviderDescriptor::douyin())
    }

    pub fn with_descriptor(descriptor: ProviderDescriptor) -> Self {
        Self { descriptor }
    }

    /// "국가 성 도시" 형식. 빈 항목은 건너뜁니다.
    fn location(data: &Value) -> Option<String> {
        let parts: Vec<String> = ["country", "province", "city"]
            .iter()
            .filter_map(|key| str_field(data, key))
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

impl ProviderAdapter for DouyinAdapter {
    fn descriptor(&self) -> &ProviderDescriptor {
        &self.descriptor
    }

    fn authorize_url(&self, config: &AuthConfig, state: &str) -> String {
        UrlBuilder::from_base_url(&self.descriptor.authorize)
            .query_param("response_type", "code")
            .query_param("client_key", config.client_id())
            .query_param("redirect_uri", config.redirect_uri())
            .query_param("scope", config.extra("scope").unwrap_or(DEFAULT_SCOPE))
            .query_param("state", state)
            .build()
    }

    fn token_request(&self, config: &AuthConfig, code: &str) -> ProviderRequest {
        let url = UrlBuilder::from_base_url(&self.descriptor.access_token)
            .query_param("code", code)
            .query_param("client_key", config.client_id())
            .query_param("client_secret", config.client_secret())
            .query_param("grant_type", "authorization_code")
            .build();

        ProviderRequest::post(url)
    }

    fn user_info_request(&self, _config: &AuthConfig, token: &AuthToken) -> ProviderRequest {
        let url = UrlBuilder::from_base_url(&self.descriptor.user_info)
            .query_param("access_token", &token.access_token)
            .query_param_opt("open_id", token.open_id.as_deref())
            .build();

        ProviderRequest::get(url)
    }

    fn refresh_request(&self, config: &AuthConfig, refresh_token: &str) -> ProviderRequest {
        let url = UrlBuilder::from_base_url(&self.descriptor.refresh)
            .query_param("client_key", config.client_id())
            .query_param("refresh_token", refresh_token)
            .query_param("grant_type", "refresh_token")
            .build();

        ProviderRequest::post(url)
    }

    fn check_response(&self, raw: &Value) -> Option<ProviderFailure> {
        let data = data(raw);
        let error_code = int_field(data, "error_code");
        let message_is_error = str_field(raw, "message").as_deref() == Some("error");

        if !message_is_error && error_code == 0 {
            return None;
        }

        Some(ProviderFailure::new(
            Some(error_code.to_string()),
            str_field(data, "description"),
        ))
    }

    fn normalize_token(&self, raw: &Value) -> AuthResult<AuthToken> {
        let data = data(raw);

        Ok(AuthToken {
            access_token: require_field(str_field(data, "access_token"), "data.access_token")?,
            expire_in: int_field(data, "expires_in"),
            refresh_token: str_field(data, "refresh_token"),
            open_id: str_field(data, "open_id"),
            scope: str_field(data, "scope"),
            ..AuthToken::default()
        })
    }

    fn normalize_user(&self, payload: &UserPayload, token: AuthToken) -> AuthResult<AuthUser> {
        let data = data(&payload.primary);
        let nickname = str_field(data, "nickname").unwrap_or_default();

        Ok(AuthUser {
            uuid: require_field(str_field(data, "union_id"), "data.union_id")?,
            username: nickname.clone(),
            nickname,
            avatar: str_field(data, "avatar"),
            email: None,
            gender: AuthUserGender::from_code(str_field(data, "gender").as_deref()),
            location: Self::location(data),
            remark: str_field(data, "description"),
            token,
            source: self.descriptor.name.clone(),
            raw_user_info: payload.primary.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> AuthConfig {
        AuthConfig::new("dy-key", "dy-secret", "https://app.example.com/douyin/callback").unwrap()
    }

    #[test]
    fn test_authorize_url_uses_client_key() {
        let url = DouyinAdapter::new().authorize_url(&config(), "s1");

        assert!(url.contains("client_key=dy-key"));
        assert!(url.contains("scope=user_info"));
        assert!(!url.contains("client_id"));
    }

    #[test]
    fn test_user_info_request_carries_open_id() {
        let token = AuthToken {
            open_id: Some("open-1".to_string()),
            ..AuthToken::new("tok")
        };

        let request = DouyinAdapter::new().user_info_request(&config(), &token);

        assert!(request.url.ends_with("?access_token=tok&open_id=open-1"));
    }

    #[test]
    fn test_normalize_nested_token() {
        let raw = json!({
            "message": "success",
            "data": {
                "access_token": "act.1",
                "open_id": "open-1",
                "expires_in": 1296000,
                "refresh_token": "rft.1",
                "scope": "user_info",
                "error_code": 0
            }
        });

        let adapter = DouyinAdapter::new();
        assert!(adapter.check_response(&raw).is_none());

        let token = adapter.normalize_token(&raw).unwrap();
        assert_eq!(token.access_token, "act.1");
        assert_eq!(token.open_id.as_deref(), Some("open-1"));
        assert_eq!(token.expire_in, 1296000);
    }

    #[test]
    fn test_out_of_range_expiry_is_safe_to_check() {
        let raw = json!({ "data": { "access_token": "a", "expires_in": 10000000000000_i64, "error_code": 0 } });

        let token = DouyinAdapter::new().normalize_token(&raw).unwrap();
        let now = chrono::Utc::now();

        assert_eq!(token.expire_in, 10000000000000);
        assert!(!token.is_expired_at(now, now));
    }

    #[test]
    fn test_normalize_user_location_and_remark() {
        let payload = UserPayload::new(json!({
            "message": "success",
            "data": {
                "union_id": "u-1",
                "nickname": "dy",
                "gender": "2",
                "country": "中国",
                "province": "浙江",
                "city": "杭州",
                "description": "hello",
                "error_code": 0
            }
        }));

        let user = DouyinAdapter::new()
            .normalize_user(&payload, AuthToken::new("tok"))
            .unwrap();

        assert_eq!(user.uuid, "u-1");
        assert_eq!(user.location.as_deref(), Some("中国 浙江 杭州"));
        assert_eq!(user.remark.as_deref(), Some("hello"));
        assert_eq!(user.gender, AuthUserGender::Unknown);
    }

    #[test]
    fn test_error_predicates() {
        let adapter = DouyinAdapter::new();

        let by_code = adapter
            .check_response(&json!({ "message": "success", "data": { "error_code": 10008, "description": "token expired" } }))
            .unwrap();
        assert_eq!(by_code.code.as_deref(), Some("10008"));
        assert_eq!(by_code.message, "token expired");

        assert!(adapter
            .check_response(&json!({ "message": "error", "data": {} }))
            .is_some());
    }
}

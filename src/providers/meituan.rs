//! # 메이투안(美团) 어댑터
//!
//! `app_id`/`secret` 이름으로 form POST 합니다. 성별 정보는 제공하지 않습니다.

use serde_json::Value;
use crate::config::AuthConfig;
use crate::domain::{AuthToken, AuthUser, AuthUserGender};
use crate::errors::AuthResult;
use crate::providers::adapter::{ProviderAdapter, ProviderFailure, ProviderRequest, UserPayload};
use crate::providers::descriptor::ProviderDescriptor;
use crate::utils::json_utils::{has_field, int_field, str_field};
use crate::utils::string_utils::require_field;
use crate::utils::url_builder::UrlBuilder;

#[derive(Debug, Clone)]
pub struct MeituanAdapter {
    descriptor: ProviderDescriptor,
}

impl Default for MeituanAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl MeituanAdapter {
    pub fn new() -> Self {
        Self::with_descriptor(ProviderDescriptor::meituan())
    }

    pub fn with_descriptor(descriptor: ProviderDescriptor) -> Self {
        Self { descriptor }
    }
}

impl ProviderAdapter for MeituanAdapter {
    fn descriptor(&self) -> &ProviderDescriptor {
        &self.descriptor
    }

    fn authorize_url(&self, config: &AuthConfig, state: &str) -> String {
        // 빈 scope도 파라미터로 보냅니다
        UrlBuilder::from_base_url(&self.descriptor.authorize)
            .query_param("response_type", "code")
            .query_param("app_id", config.client_id())
            .query_param("redirect_uri", config.redirect_uri())
            .query_param("state", state)
            .query_param("scope", config.extra("scope").unwrap_or_default())
            .build()
    }

    fn token_request(&self, config: &AuthConfig, code: &str) -> ProviderRequest {
        ProviderRequest::post(&self.descriptor.access_token)
            .form("app_id", config.client_id())
            .form("secret", config.client_secret())
            .form("code", code)
            .form("grant_type", "authorization_code")
    }

    fn user_info_request(&self, config: &AuthConfig, token: &AuthToken) -> ProviderRequest {
        ProviderRequest::post(&self.descriptor.user_info)
            .form("app_id", config.client_id())
            .form("secret", config.client_secret())
            .form("access_token", &token.access_token)
    }

    fn refresh_request(&self, config: &AuthConfig, refresh_token: &str) -> ProviderRequest {
        ProviderRequest::post(&self.descriptor.refresh)
            .form("app_id", config.client_id())
            .form("secret", config.client_secret())
            .form("refresh_token", refresh_token)
            .form("grant_type", "refresh_token")
    }

    fn check_response(&self, raw: &Value) -> Option<ProviderFailure> {
        if !has_field(raw, "error_code") {
            return None;
        }

        // 일부 응답은 오타 난 필드명(erroe_msg)을 씁니다
        let message = str_field(raw, "error_msg").or_else(|| str_field(raw, "erroe_msg"));
        Some(ProviderFailure::new(str_field(raw, "error_code"), message))
    }

    fn normalize_token(&self, raw: &Value) -> AuthResult<AuthToken> {
        Ok(AuthToken {
            access_token: require_field(str_field(raw, "access_token"), "access_token")?,
            expire_in: int_field(raw, "expires_in"),
            refresh_token: str_field(raw, "refresh_token"),
            ..AuthToken::default()
        })
    }

    fn normalize_user(&self, payload: &UserPayload, token: AuthToken) -> AuthResult<AuthUser> {
        let raw = &payload.primary;
        let nickname = str_field(raw, "nickname").unwrap_or_default();

        Ok(AuthUser {
            uuid: require_field(str_field(raw, "openid"), "openid")?,
            username: nickname.clone(),
            nickname,
            avatar: str_field(raw, "avatar"),
            email: None,
            gender: AuthUserGender::Unknown,
            location: None,
            remark: None,
            token,
            source: self.descriptor.name.clone(),
            raw_user_info: raw.clone(),
        })
    }
}

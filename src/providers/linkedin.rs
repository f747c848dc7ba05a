//! # 링크드인 어댑터
//!
//! 사용자 이름은 지역화 객체에서 `preferredLocale`에 맞는 값을 찾아야 하고,
//! 프로필 사진은 크기 오름차순 목록의 마지막 항목을 씁니다.
//! 이메일은 별도의 인증 호출(`email` 슬롯)로 가져옵니다.

use serde_json::Value;
use crate::config::AuthConfig;
use crate::domain::{AuthToken, AuthUser, AuthUserGender};
use crate::errors::AuthResult;
use crate::providers::adapter::{ProviderAdapter, ProviderFailure, ProviderRequest, UserPayload};
use crate::providers::descriptor::ProviderDescriptor;
use crate::utils::json_utils::{has_field, int_field, str_field};
use crate::utils::string_utils::require_field;
use crate::utils::url_builder::UrlBuilder;

const SCOPE: &str = "r_liteprofile%20r_emailaddress%20w_member_social";
const PROFILE_PROJECTION: &str = "(id,firstName,lastName,profilePicture(displayImage~:playableStreams))";
const EMAIL_URL: &str = "https://api.linkedin.com/v2/emailAddress?q=members&projection=(elements*(handle~))";

pub const EMAIL_SLOT: &str = "email";

#[derive(Debug, Clone)]
pub struct LinkedinAdapter {
    descriptor: ProviderDescriptor,
    email_url: String,
}

impl Default for LinkedinAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkedinAdapter {
    pub fn new() -> Self {
        Self::with_descriptor(ProviderDescriptor::linkedin())
    }

    pub fn with_descriptor(descriptor: ProviderDescriptor) -> Self {
        Self {
            descriptor,
            email_url: EMAIL_URL.to_string(),
        }
    }

    pub fn with_email_url(mut self, email_url: impl Into<String>) -> Self {
        self.email_url = email_url.into();
        self
    }

    /// `localizedFirstName`이 있으면 그대로, 없으면 `firstName.localized["{language}_{country}"]`
    fn localized_name(raw: &Value, localized_key: &str, name_key: &str) -> Option<String> {
        if has_field(raw, localized_key) {
            return str_field(raw, localized_key);
        }

        let name = raw.get(name_key)?;
        let locale = name.get("preferredLocale")?;
        let key = format!(
            "{}_{}",
            str_field(locale, "language")?,
            str_field(locale, "country")?
        );
        name.get("localized").and_then(|localized| str_field(localized, &key))
    }

    fn full_name(raw: &Value) -> String {
        [
            Self::localized_name(raw, "localizedFirstName", "firstName"),
            Self::localized_name(raw, "localizedLastName", "lastName"),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
    }

    fn largest_avatar(raw: &Value) -> Option<String> {
        let largest = raw
            .get("profilePicture")?
            .get("displayImage~")?
            .get("elements")?
            .as_array()?
            .last()?;

        let identifier = largest.get("identifiers")?.as_array()?.first()?;
        str_field(identifier, "identifier")
    }

    fn email(payload: &UserPayload) -> Option<String> {
        let handle = payload
            .supplement(EMAIL_SLOT)?
            .get("elements")?
            .as_array()?
            .first()?
            .get("handle~")?;
        str_field(handle, "emailAddress")
    }
}

impl ProviderAdapter for LinkedinAdapter {
    fn descriptor(&self) -> &ProviderDescriptor {
        &self.descriptor
    }

    fn authorize_url(&self, config: &AuthConfig, state: &str) -> String {
        UrlBuilder::from_base_url(&self.descriptor.authorize)
            .query_param("response_type", "code")
            .query_param("client_id", config.client_id())
            .query_param("redirect_uri", config.redirect_uri())
            .query_param_encoded("scope", SCOPE)
            .query_param("state", state)
            .build()
    }

    fn token_request(&self, config: &AuthConfig, code: &str) -> ProviderRequest {
        let url = UrlBuilder::from_base_url(&self.descriptor.access_token)
            .query_param("code", code)
            .query_param("client_id", config.client_id())
            .query_param("client_secret", config.client_secret())
            .query_param("grant_type", "authorization_code")
            .query_param("redirect_uri", config.redirect_uri())
            .build();

        ProviderRequest::post(url)
    }

    fn user_info_request(&self, _config: &AuthConfig, token: &AuthToken) -> ProviderRequest {
        let url = UrlBuilder::from_base_url(&self.descriptor.user_info)
            .query_param("projection", PROFILE_PROJECTION)
            .build();

        ProviderRequest::get(url)
            .header("Connection", "Keep-Alive")
            .bearer(&token.access_token)
    }

    fn supplementary_requests(
        &self,
        _config: &AuthConfig,
        token: &AuthToken,
    ) -> Vec<(String, ProviderRequest)> {
        let request = ProviderRequest::get(&self.email_url)
            .header("Connection", "Keep-Alive")
            .bearer(&token.access_token);

        vec![(EMAIL_SLOT.to_string(), request)]
    }

    fn refresh_request(&self, config: &AuthConfig, refresh_token: &str) -> ProviderRequest {
        let url = UrlBuilder::from_base_url(&self.descriptor.refresh)
            .query_param("client_id", config.client_id())
            .query_param("client_secret", config.client_secret())
            .query_param("refresh_token", refresh_token)
            .query_param("grant_type", "refresh_token")
            .query_param("redirect_uri", config.redirect_uri())
            .build();

        ProviderRequest::post(url)
    }

    fn check_response(&self, raw: &Value) -> Option<ProviderFailure> {
        if !has_field(raw, "error") {
            return None;
        }

        Some(ProviderFailure::new(
            str_field(raw, "error"),
            str_field(raw, "error_description"),
        ))
    }

    fn normalize_token(&self, raw: &Value) -> AuthResult<AuthToken> {
        Ok(AuthToken {
            access_token: require_field(str_field(raw, "access_token"), "access_token")?,
            expire_in: int_field(raw, "expires_in"),
            refresh_token: str_field(raw, "refresh_token"),
            scope: str_field(raw, "scope"),
            ..AuthToken::default()
        })
    }

    fn normalize_user(&self, payload: &UserPayload, token: AuthToken) -> AuthResult<AuthUser> {
        let raw = &payload.primary;
        let name = Self::full_name(raw);

        Ok(AuthUser {
            uuid: require_field(str_field(raw, "id"), "id")?,
            username: name.clone(),
            nickname: name,
            avatar: Self::largest_avatar(raw),
            email: Self::email(payload),
            gender: AuthUserGender::Unknown,
            location: None,
            remark: None,
            token,
            source: self.descriptor.name.clone(),
            raw_user_info: raw.clone(),
        })
    }
}

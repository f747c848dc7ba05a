//! # Authentication Configuration Module
//!
//! 프로바이더별 OAuth 클라이언트 설정을 관리하는 모듈입니다.
//! 프로바이더 콘솔에서 발급받은 클라이언트 정보와 redirect URI를 담으며,
//! 엔진은 요청 처리 동안 이 설정을 빌려 쓰기만 하고 변경하지 않습니다.
//!
//! ## 필수 환경 변수 설정
//!
//! 접두사는 프로바이더 이름을 대문자로 바꾼 값입니다.
//!
//! ```bash
//! export HUAWEI_CLIENT_ID="your-client-id"
//! export HUAWEI_CLIENT_SECRET="your-client-secret"
//! export HUAWEI_REDIRECT_URI="http://localhost:8080/oauth/huawei/callback"
//! ```
//!
//! ## 선택 환경 변수
//!
//! `{PREFIX}_EXTRA_REGION`, `{PREFIX}_EXTRA_SCOPE` 변수는 추가 필드로 들어갑니다.
//!
//! ```bash
//! export HUAWEI_EXTRA_REGION="cn"        # config.extra("region") == Some("cn")
//! export DOUYIN_EXTRA_SCOPE="user_info"  # 어댑터 기본 scope 대신 사용
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::AuthConfig;
//!
//! let config = AuthConfig::from_env("linkedin")?;
//! let url = engine.authorize(&config, adapter.as_ref(), None).await?;
//! ```

use std::collections::BTreeMap;
use std::env;
use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::errors::{AuthError, AuthResult};

/// 프로바이더 클라이언트 설정
///
/// 한 번 만들어지면 변경되지 않습니다. 생성 시 [`validator`]로 검증합니다.
///
/// ## 보안 고려사항
///
/// - `client_secret`은 절대 로그에 출력하지 마세요 (`Debug` 출력에서도 가려집니다)
/// - 프로덕션에서는 HTTPS redirect URI만 사용하세요
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct AuthConfig {
    /// 클라이언트 ID
    #[validate(length(min = 1, message = "client_id는 필수입니다"))]
    client_id: String,

    /// 클라이언트 시크릿
    #[validate(length(min = 1, message = "client_secret은 필수입니다"))]
    client_secret: String,

    /// 인증 완료 후 돌아올 URI. 프로바이더 콘솔에 등록된 값과 같아야 합니다.
    #[validate(url(message = "redirect_uri는 올바른 URL이어야 합니다"))]
    redirect_uri: String,

    /// 프로바이더별 추가 필드 (예: region)
    #[serde(default)]
    extras: BTreeMap<String, String>,
}

impl AuthConfig {
    /// 검증된 설정을 생성합니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::ConfigError` - 빈 client_id/client_secret, URL이 아닌 redirect_uri
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> AuthResult<Self> {
        Self::with_extras(client_id, client_secret, redirect_uri, BTreeMap::new())
    }

    pub fn with_extras(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
        extras: BTreeMap<String, String>,
    ) -> AuthResult<Self> {
        let config = Self {
            client_id: client_id.into().trim().to_string(),
            client_secret: client_secret.into().trim().to_string(),
            redirect_uri: redirect_uri.into().trim().to_string(),
            extras,
        };

        config
            .validate()
            .map_err(|e| AuthError::ConfigError(e.to_string()))?;

        Ok(config)
    }

    /// 환경 변수에서 설정을 읽어옵니다.
    ///
    /// `prefix`는 대소문자 구분 없이 받아 대문자로 바꿔 사용합니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::ConfigError` - 필수 환경 변수 누락 또는 검증 실패
    pub fn from_env(prefix: &str) -> AuthResult<Self> {
        Self::from_lookup(prefix, |key| env::var(key).ok())
    }

    /// 임의의 키-값 조회 함수에서 설정을 읽어옵니다.
    ///
    /// [`AuthConfig::from_env`]와 같은 규칙을 따르며, 테스트나 외부 설정 저장소에 사용합니다.
    pub fn from_lookup<F>(prefix: &str, lookup: F) -> AuthResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let prefix = prefix.trim().to_uppercase();
        let required = |name: &str| {
            let key = format!("{}_{}", prefix, name);
            lookup(&key).ok_or_else(|| AuthError::ConfigError(format!("{} must be set", key)))
        };

        let client_id = required("CLIENT_ID")?;
        let client_secret = required("CLIENT_SECRET")?;
        let redirect_uri = required("REDIRECT_URI")?;

        let extra_prefix = format!("{}_EXTRA_", prefix);
        let mut extras = BTreeMap::new();
        for name in ["REGION", "SCOPE"] {
            if let Some(value) = lookup(&format!("{}{}", extra_prefix, name)) {
                extras.insert(name.to_lowercase(), value);
            }
        }

        Self::with_extras(client_id, client_secret, redirect_uri, extras)
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// 추가 필드를 조회합니다.
    pub fn extra(&self, name: &str) -> Option<&str> {
        self.extras.get(name).map(String::as_str)
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("redirect_uri", &self.redirect_uri)
            .field("extras", &self.extras)
            .finish()
    }
}

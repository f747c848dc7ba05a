//! 프로바이더 엔드포인트 기술자

use serde::{Deserialize, Serialize};
use crate::errors::{AuthError, AuthResult};

/// 프로바이더 하나의 엔드포인트 묶음
///
/// 엔진은 이 값을 읽기만 하며, 같은 프로바이더의 모든 요청이 공유합니다.
/// `name`은 로그와 [`crate::domain::AuthUser::source`]에 그대로 쓰입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
    pub name: String,
    pub authorize: String,
    pub access_token: String,
    pub user_info: String,
    pub refresh: String,
}

impl ProviderDescriptor {
    pub fn new(
        name: impl Into<String>,
        authorize: impl Into<String>,
        access_token: impl Into<String>,
        user_info: impl Into<String>,
        refresh: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            authorize: authorize.into(),
            access_token: access_token.into(),
            user_info: user_info.into(),
            refresh: refresh.into(),
        }
    }

    pub fn huawei() -> Self {
        Self::new(
            "huawei",
            "https://oauth-login.cloud.huawei.com/oauth2/v2/authorize",
            "https://oauth-login.cloud.huawei.com/oauth2/v2/token",
            "https://api.vmall.com/rest.php",
            "https://oauth-login.cloud.huawei.com/oauth2/v2/token",
        )
    }

    pub fn linkedin() -> Self {
        Self::new(
            "linkedin",
            "https://www.linkedin.com/oauth/v2/authorization",
            "https://www.linkedin.com/oauth/v2/accessToken",
            "https://api.linkedin.com/v2/me",
            "https://www.linkedin.com/oauth/v2/accessToken",
        )
    }

    pub fn douyin() -> Self {
        Self::new(
            "douyin",
            "https://open.douyin.com/platform/oauth/connect",
            "https://open.douyin.com/oauth/access_token/",
            "https://open.douyin.com/oauth/userinfo/",
            "https://open.douyin.com/oauth/refresh_token/",
        )
    }

    pub fn meituan() -> Self {
        Self::new(
            "meituan",
            "https://openapi.waimai.meituan.com/oauth/authorize",
            "https://openapi.waimai.meituan.com/oauth/access_token",
            "https://openapi.waimai.meituan.com/oauth/userinfo",
            "https://openapi.waimai.meituan.com/oauth/refresh_token",
        )
    }

    /// 모든 엔드포인트의 스킴과 호스트를 `origin`으로 바꾼 복사본을 만듭니다.
    ///
    /// 경로와 쿼리는 유지됩니다. 스테이징 게이트웨이나 목 서버를 가리킬 때 사용합니다.
    ///
    /// ```rust,ignore
    /// let local = ProviderDescriptor::douyin().with_origin("http://127.0.0.1:8080")?;
    /// assert_eq!(local.access_token, "http://127.0.0.1:8080/oauth/access_token/");
    /// ```
    pub fn with_origin(&self, origin: &str) -> AuthResult<Self> {
        let rebase = |endpoint: &str| -> AuthResult<String> {
            let url = reqwest::Url::parse(endpoint).map_err(|e| {
                AuthError::ConfigError(format!("잘못된 엔드포인트 {}: {}", endpoint, e))
            })?;
            let mut rebased = format!("{}{}", origin.trim_end_matches('/'), url.path());
            if let Some(query) = url.query() {
                rebased.push('?');
                rebased.push_str(query);
            }
            Ok(rebased)
        };

        Ok(Self {
            name: self.name.clone(),
            authorize: rebase(&self.authorize)?,
            access_token: rebase(&self.access_token)?,
            user_info: rebase(&self.user_info)?,
            refresh: rebase(&self.refresh)?,
        })
    }
}

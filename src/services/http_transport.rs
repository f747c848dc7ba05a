//! # HTTP 전송 계층
//!
//! 엔진이 프로바이더 요청을 실행하는 통로입니다.
//! 엔진은 [`HttpTransport`] trait 객체만 알고 있으므로 재시도, 프록시, TLS 같은
//! 전송 정책은 구현체가 결정합니다. 기본 구현은 [`ReqwestTransport`]입니다.

use std::time::Duration;
use async_trait::async_trait;
use crate::errors::{AuthError, AuthResult};
use crate::providers::{HttpMethod, ProviderRequest};

/// 상태 코드와 원문 본문
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// 요청을 1회 실행합니다. 4xx/5xx 응답도 `Ok`로 돌려줍니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::RequestFailed` - 연결 실패, 타임아웃, 본문 읽기 실패
    async fn execute(&self, request: &ProviderRequest) -> AuthResult<RawResponse>;
}

/// `reqwest` 기반 기본 전송
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// 요청당 `timeout`이 적용된 클라이언트를 만듭니다.
    pub fn new(timeout: Duration) -> AuthResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::ConfigError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: &ProviderRequest) -> AuthResult<RawResponse> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url).form(&request.form),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(|e| {
            AuthError::RequestFailed(format!("{} 요청 실패: {}", request.endpoint(), e))
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            AuthError::RequestFailed(format!("{} 응답 본문 읽기 실패: {}", request.endpoint(), e))
        })?;

        Ok(RawResponse { status, body })
    }
}

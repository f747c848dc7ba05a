//! # OAuth 2.0 로그인 플로우 엔진
//!
//! 프로바이더와 무관하게 Authorization Code Flow 전체를 진행하는 서비스입니다.
//! 프로바이더별 차이는 모두 [`ProviderAdapter`]가 흡수하며, 엔진은 어댑터가 만든
//! 요청을 실행하고 결과를 검사하는 일만 합니다.
//!
//! ## 상태 전이
//!
//! ```text
//! START ──authorize──► AWAITING_CALLBACK ──login──► EXCHANGING_TOKEN ──► FETCHING_USER_INFO ──► DONE
//!                              │                          │                      │
//!                              └──────────────────────────┴──────────────────────┴──► FAILED
//! ```
//!
//! ## 보안 특징
//!
//! ### CSRF 방지 (State Parameter)
//!
//! - `authorize`가 만든 state는 캐시에 TTL(기본 3분)과 함께 저장됩니다
//! - `login`은 네트워크 호출 전에 state를 꺼내며(1회용) 값이 다르면 즉시 실패합니다
//! - 캐시 키는 `{prefix}:{scope}:{state}` 형식입니다. 기본 scope는 client_id의
//!   SHA-256 앞 16자리이며, 세션 단위로 묶고 싶으면 [`StateScope::Session`]을 씁니다
//!
//! ### 시간 제한
//!
//! 모든 프로바이더 호출은 `EngineConfig::request_timeout`으로 제한되며,
//! 시간 초과는 `RequestFailed`로 분류됩니다. 엔진은 재시도하지 않습니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! let engine = OAuthFlowService::with_reqwest(cache, EngineConfig::from_env())?;
//! let adapter = registry.get("linkedin")?;
//!
//! // 1. 인가 URL 생성 후 리다이렉트
//! let url = engine.authorize(&config, adapter.as_ref(), None).await?;
//!
//! // 2. 콜백 처리
//! let user = engine.login(&config, adapter.as_ref(), &callback).await?;
//!
//! // 3. 토큰 갱신
//! let response = engine.refresh(&config, adapter.as_ref(), &user.token).await;
//! ```

use std::fmt;
use std::sync::Arc;
use serde_json::Value;
use sha2::{Digest, Sha256};
use uuid::Uuid;
use crate::caching::StateCache;
use crate::config::{AuthConfig, EngineConfig};
use crate::domain::{AuthCallback, AuthResponse, AuthToken, AuthUser};
use crate::errors::{AuthError, AuthResult, ErrorContext};
use crate::providers::{ProviderAdapter, ProviderRequest, UserPayload};
use crate::services::http_transport::{HttpTransport, ReqwestTransport};
use crate::utils::string_utils::mask;

/// 로그인 플로우 단계
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStage {
    Start,
    AwaitingCallback,
    ExchangingToken,
    FetchingUserInfo,
    Done,
    Failed,
}

impl fmt::Display for FlowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlowStage::Start => "START",
            FlowStage::AwaitingCallback => "AWAITING_CALLBACK",
            FlowStage::ExchangingToken => "EXCHANGING_TOKEN",
            FlowStage::FetchingUserInfo => "FETCHING_USER_INFO",
            FlowStage::Done => "DONE",
            FlowStage::Failed => "FAILED",
        };
        f.write_str(name)
    }
}

/// state 캐시 키의 범위
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StateScope {
    /// 클라이언트 설정 단위 (client_id 기반)
    #[default]
    Client,
    /// 브라우저 세션 단위
    Session(String),
}

/// 한 번의 로그인 시도에서 현재 단계를 추적하고 전이를 기록합니다.
struct FlowTrace<'a> {
    provider: &'a str,
    stage: FlowStage,
}

impl<'a> FlowTrace<'a> {
    fn new(provider: &'a str, stage: FlowStage) -> Self {
        Self { provider, stage }
    }

    fn advance(&mut self, next: FlowStage) {
        log::debug!("[{}] {} → {}", self.provider, self.stage, next);
        self.stage = next;
    }

    fn fail(&self, error: &AuthError) {
        log::warn!(
            "⚠️ [{}] {} → {}: {}",
            self.provider,
            self.stage,
            FlowStage::Failed,
            error
        );
    }
}

/// 프로바이더 독립 로그인 엔진
///
/// 공유 상태는 주입된 state 캐시뿐이며, 나머지는 모두 불변입니다.
/// 여러 요청에서 `Arc`로 공유해 동시에 호출해도 안전합니다.
#[derive(Clone)]
pub struct OAuthFlowService {
    cache: Arc<dyn StateCache>,
    transport: Arc<dyn HttpTransport>,
    settings: EngineConfig,
}

impl OAuthFlowService {
    pub fn new(
        cache: Arc<dyn StateCache>,
        transport: Arc<dyn HttpTransport>,
        settings: EngineConfig,
    ) -> Self {
        Self {
            cache,
            transport,
            settings,
        }
    }

    /// 설정의 타임아웃으로 만든 [`ReqwestTransport`]를 사용합니다.
    pub fn with_reqwest(cache: Arc<dyn StateCache>, settings: EngineConfig) -> AuthResult<Self> {
        let transport = ReqwestTransport::new(settings.request_timeout)?;
        Ok(Self::new(cache, Arc::new(transport), settings))
    }

    pub fn settings(&self) -> &EngineConfig {
        &self.settings
    }

    /// state 캐시 키를 계산합니다.
    pub fn state_key(&self, config: &AuthConfig, scope: &StateScope, state: &str) -> String {
        let scope = match scope {
            StateScope::Client => {
                let digest = Sha256::digest(config.client_id().as_bytes());
                digest.iter().take(8).map(|b| format!("{:02x}", b)).collect()
            }
            StateScope::Session(session_id) => session_id.clone(),
        };

        format!("{}:{}:{}", self.settings.state_key_prefix, scope, state)
    }

    /// 인가 URL을 만들고 state를 캐시에 저장합니다.
    ///
    /// `state`가 없거나 비어 있으면 UUID v4(하이픈 없음)를 새로 만듭니다.
    /// 네트워크 호출은 하지 않습니다.
    pub async fn authorize(
        &self,
        config: &AuthConfig,
        adapter: &dyn ProviderAdapter,
        state: Option<&str>,
    ) -> AuthResult<String> {
        self.authorize_with_scope(config, adapter, state, &StateScope::Client)
            .await
    }

    pub async fn authorize_with_scope(
        &self,
        config: &AuthConfig,
        adapter: &dyn ProviderAdapter,
        state: Option<&str>,
        scope: &StateScope,
    ) -> AuthResult<String> {
        let state = state
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().simple().to_string());

        let key = self.state_key(config, scope, &state);
        self.cache.put(&key, &state, self.settings.state_ttl).await?;

        let mut trace = FlowTrace::new(adapter.name(), FlowStage::Start);
        trace.advance(FlowStage::AwaitingCallback);
        log::debug!("[{}] state 발급: {}", adapter.name(), mask(&state));

        Ok(adapter.authorize_url(config, &state))
    }

    /// 콜백을 처리해 정규화된 사용자 정보를 돌려줍니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::IllegalRequest` - 인가 코드 누락, state 누락/불일치/만료/재사용
    /// * `AuthError::ProviderError` - 프로바이더가 응답 본문으로 실패를 알림
    /// * `AuthError::RequestFailed` - 전송 실패, 타임아웃, 해석할 수 없는 응답
    /// * `AuthError::CacheError` - state 캐시 장애
    pub async fn login(
        &self,
        config: &AuthConfig,
        adapter: &dyn ProviderAdapter,
        callback: &AuthCallback,
    ) -> AuthResult<AuthUser> {
        self.login_with_scope(config, adapter, callback, &StateScope::Client)
            .await
    }

    pub async fn login_with_scope(
        &self,
        config: &AuthConfig,
        adapter: &dyn ProviderAdapter,
        callback: &AuthCallback,
        scope: &StateScope,
    ) -> AuthResult<AuthUser> {
        let mut trace = FlowTrace::new(adapter.name(), FlowStage::AwaitingCallback);

        let result = self
            .run_login(config, adapter, callback, scope, &mut trace)
            .await;

        match &result {
            Ok(user) => log::info!("✅ [{}] 로그인 성공: {}", adapter.name(), user.uuid),
            Err(error) => trace.fail(error),
        }

        result
    }

    /// [`OAuthFlowService::login`] 결과를 응답 봉투로 감쌉니다.
    pub async fn login_response(
        &self,
        config: &AuthConfig,
        adapter: &dyn ProviderAdapter,
        callback: &AuthCallback,
    ) -> AuthResponse<AuthUser> {
        self.login(config, adapter, callback).await.into()
    }

    /// 리프레시 토큰으로 새 토큰을 받습니다.
    ///
    /// 리프레시 토큰이 비어 있으면 네트워크 호출 없이 `RequiredRefreshToken` 응답을 돌려줍니다.
    pub async fn refresh(
        &self,
        config: &AuthConfig,
        adapter: &dyn ProviderAdapter,
        token: &AuthToken,
    ) -> AuthResponse<AuthToken> {
        let result = self.run_refresh(config, adapter, token).await;

        match &result {
            Ok(_) => log::info!("✅ [{}] 토큰 갱신 성공", adapter.name()),
            Err(error) => log::warn!("⚠️ [{}] 토큰 갱신 실패: {}", adapter.name(), error),
        }

        result.into()
    }

    async fn run_login(
        &self,
        config: &AuthConfig,
        adapter: &dyn ProviderAdapter,
        callback: &AuthCallback,
        scope: &StateScope,
        trace: &mut FlowTrace<'_>,
    ) -> AuthResult<AuthUser> {
        // 코드 누락은 state를 소비하기 전에 거부합니다
        let code = adapter.authorization_code(callback).trim();
        if code.is_empty() {
            return Err(AuthError::IllegalRequest(
                "authorization code is missing".to_string(),
            ));
        }

        self.consume_state(config, scope, &callback.state).await?;

        trace.advance(FlowStage::ExchangingToken);
        let raw_token = self.call(adapter, &adapter.token_request(config, code)).await?;
        let token = adapter.normalize_token(&raw_token)?;

        trace.advance(FlowStage::FetchingUserInfo);
        let primary = self
            .call(adapter, &adapter.user_info_request(config, &token))
            .await?;

        let mut payload = UserPayload::new(primary);
        for (slot, request) in adapter.supplementary_requests(config, &token) {
            let raw = self.call(adapter, &request).await?;
            payload.supplements.insert(slot, raw);
        }

        let mut user = adapter.normalize_user(&payload, token)?;
        user.source = adapter.descriptor().name.clone();

        trace.advance(FlowStage::Done);
        Ok(user)
    }

    async fn run_refresh(
        &self,
        config: &AuthConfig,
        adapter: &dyn ProviderAdapter,
        token: &AuthToken,
    ) -> AuthResult<AuthToken> {
        if !token.has_refresh_token() {
            return Err(AuthError::RequiredRefreshToken(adapter.name().to_string()));
        }
        let refresh_token = token.refresh_token.as_deref().unwrap_or_default().trim();

        let raw = self
            .call(adapter, &adapter.refresh_request(config, refresh_token))
            .await?;

        adapter.normalize_token(&raw)
    }

    /// state 존재 확인 → 꺼내면서 삭제 → 값 비교
    async fn consume_state(
        &self,
        config: &AuthConfig,
        scope: &StateScope,
        state: &str,
    ) -> AuthResult<()> {
        let state = state.trim();
        if state.is_empty() {
            return Err(AuthError::IllegalRequest("state is missing".to_string()));
        }

        let key = self.state_key(config, scope, state);
        if !self.cache.contains_key(&key).await? {
            return Err(AuthError::IllegalRequest(format!(
                "state {} is unknown, expired or already used",
                mask(state)
            )));
        }

        match self.cache.get(&key).await? {
            Some(stored) if stored == state => Ok(()),
            _ => Err(AuthError::IllegalRequest(format!(
                "state {} does not match",
                mask(state)
            ))),
        }
    }

    /// 요청 1회 실행 → JSON 파싱 → 프로바이더 에러 검사 → 상태 코드 검사
    async fn call(&self, adapter: &dyn ProviderAdapter, request: &ProviderRequest) -> AuthResult<Value> {
        let timeout = self.settings.request_timeout;
        log::debug!("[{}] {:?} {}", adapter.name(), request.method, request.endpoint());

        let response = tokio::time::timeout(timeout, self.transport.execute(request))
            .await
            .map_err(|_| {
                AuthError::RequestFailed(format!(
                    "{} timed out after {:?}",
                    request.endpoint(),
                    timeout
                ))
            })??;

        let raw: Value = serde_json::from_str(&response.body).with_context(|| {
            format!(
                "{} returned an unparseable body (status {})",
                request.endpoint(),
                response.status
            )
        })?;

        if let Some(failure) = adapter.check_response(&raw) {
            return Err(AuthError::ProviderError {
                provider: adapter.name().to_string(),
                code: failure.code,
                message: failure.message,
            });
        }

        if !response.is_success() {
            return Err(AuthError::RequestFailed(format!(
                "{} responded with status {}",
                request.endpoint(),
                response.status
            )));
        }

        Ok(raw)
    }
}

//! OAuth 로그인 애그리게이터 CLI
//!
//! 지정한 프로바이더의 인가 URL을 발급해 출력합니다.
//! 설정 로드, state 캐시, 레지스트리, 엔진의 `authorize`를 한 번에 점검하는 용도입니다.
//!
//! ```bash
//! PROFILE=dev cargo run -- linkedin
//! ```

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use oauth_login_aggregator::caching::StateCache;
use oauth_login_aggregator::caching::memory::InMemoryStateCache;
use oauth_login_aggregator::caching::redis::RedisStateCache;
use oauth_login_aggregator::config::{AuthConfig, EngineConfig};
use oauth_login_aggregator::errors::AuthResult;
use oauth_login_aggregator::providers::ProviderRegistry;
use oauth_login_aggregator::services::auth::OAuthFlowService;

/// 인메모리 캐시의 만료 항목 정리 주기
const REAPER_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> ExitCode {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    let registry = ProviderRegistry::with_defaults();

    let Some(provider) = std::env::args().nth(1) else {
        error!("사용법: oauth_login_aggregator <provider>");
        error!("지원 프로바이더: {}", registry.names().join(", "));
        return ExitCode::FAILURE;
    };

    match issue_authorize_url(&registry, &provider).await {
        Ok(url) => {
            println!("{}", url);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("❌ 인가 URL 발급 실패: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn issue_authorize_url(registry: &ProviderRegistry, provider: &str) -> AuthResult<String> {
    let adapter = registry.get(provider)?;
    let config = AuthConfig::from_env(adapter.name())?;
    let settings = EngineConfig::from_env();

    let cache = initialize_state_cache().await?;
    let engine = OAuthFlowService::with_reqwest(cache, settings)?;

    info!("🚀 [{}] 인가 URL 발급", adapter.name());
    engine.authorize(&config, adapter.as_ref(), None).await
}

/// `REDIS_URL`이 설정되어 있으면 Redis, 아니면 인메모리 캐시를 사용합니다
async fn initialize_state_cache() -> AuthResult<Arc<dyn StateCache>> {
    if std::env::var("REDIS_URL").is_ok() {
        info!("📡 Redis state 캐시 연결 중...");
        let cache = RedisStateCache::from_env().await?;
        return Ok(Arc::new(cache));
    }

    info!("인메모리 state 캐시 사용");
    Ok(Arc::new(InMemoryStateCache::with_reaper(REAPER_INTERVAL)))
}

/// 환경별 설정 파일을 로드합니다
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => {
            if let Err(e) = dotenv::from_filename(".env.prod") {
                eprintln!(".env.prod 파일 로드 실패: {}", e);
            }
        }
        "dev" => {
            if let Err(e) = dotenv::from_filename(".env.dev") {
                eprintln!(".env.dev 파일 로드 실패: {}", e);
            }
        }
        _ => {
            dotenv().ok();
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info")
///
/// ```bash
/// RUST_LOG=oauth_login_aggregator=debug cargo run -- douyin
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
}

//! 프로바이더 이름 → 어댑터 조회 테이블

use std::collections::HashMap;
use std::sync::Arc;
use crate::errors::{AuthError, AuthResult};
use crate::providers::adapter::ProviderAdapter;
use crate::providers::{DouyinAdapter, HuaweiAdapter, LinkedinAdapter, MeituanAdapter};

/// 등록된 어댑터 목록
///
/// 이름은 대소문자를 구분하지 않습니다. 설정 시점에 한 번 만들고 이후에는 읽기만 합니다.
///
/// ```rust,ignore
/// let registry = ProviderRegistry::with_defaults();
/// let adapter = registry.get("LinkedIn")?;
/// ```
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    adapters: HashMap<String, Arc<dyn ProviderAdapter>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 기본 제공 어댑터(huawei, linkedin, douyin, meituan)를 등록한 레지스트리
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(HuaweiAdapter::new()));
        registry.register(Arc::new(LinkedinAdapter::new()));
        registry.register(Arc::new(DouyinAdapter::new()));
        registry.register(Arc::new(MeituanAdapter::new()));
        registry
    }

    /// 어댑터를 등록합니다. 같은 이름이 있으면 교체합니다.
    pub fn register(&mut self, adapter: Arc<dyn ProviderAdapter>) {
        let key = adapter.name().to_lowercase();
        if self.adapters.insert(key.clone(), adapter).is_some() {
            log::warn!("프로바이더 어댑터 교체: {}", key);
        }
    }

    /// # Errors
    ///
    /// * `AuthError::UnsupportedProvider` - 등록되지 않은 이름
    pub fn get(&self, name: &str) -> AuthResult<Arc<dyn ProviderAdapter>> {
        self.adapters
            .get(&name.trim().to_lowercase())
            .cloned()
            .ok_or_else(|| AuthError::UnsupportedProvider(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.adapters.contains_key(&name.trim().to_lowercase())
    }

    /// 정렬된 프로바이더 이름 목록
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.adapters.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

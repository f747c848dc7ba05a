//! 프로바이더 콜백 파라미터
//!
//! 사용자가 동의한 뒤 프로바이더가 redirect URI로 돌려주는 값입니다.
//! 로그인 시도 1회당 한 번 만들어지고 `login`에서 한 번 소비됩니다.

use serde::{Deserialize, Serialize};
use crate::utils::string_utils::deserialize_optional_string;

/// 인증 콜백
///
/// 대부분의 프로바이더는 `code`로 인증 코드를 보내지만 일부는 `authorization_code`를
/// 사용합니다. 어느 값을 읽을지는 어댑터가 결정합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthCallback {
    #[serde(default)]
    pub code: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub authorization_code: Option<String>,

    #[serde(default)]
    pub state: String,
}

impl AuthCallback {
    pub fn new(code: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            authorization_code: None,
            state: state.into(),
        }
    }

    pub fn with_authorization_code(mut self, authorization_code: impl Into<String>) -> Self {
        self.authorization_code = Some(authorization_code.into());
        self
    }
}

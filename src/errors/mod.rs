//! 에러 모듈
//!
//! [`AuthError`] 열거형과 [`AuthResult`] 별칭, 외부 에러 변환용 [`ErrorContext`]를 제공합니다.

pub mod errors;

pub use errors::*;

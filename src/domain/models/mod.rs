//! # 정규화 도메인 모델
//!
//! 프로바이더와 무관한 표준 토큰/사용자/콜백/응답 타입입니다.
//! 엔진과 호출자는 이 타입들만 다루며, 프로바이더 원본 스키마는 어댑터 안에 머뭅니다.
//!
//! | 타입 | 생성 시점 | 소유권 |
//! |------|-----------|--------|
//! | [`AuthCallback`] | 프로바이더 리다이렉트 | `login`이 1회 소비 |
//! | [`AuthToken`] | 토큰 교환/갱신 | 반환 후 호출자 |
//! | [`AuthUser`] | 로그인 성공 | 반환 후 호출자 |
//! | [`AuthResponse`] | `refresh`, `login_response` | 반환 후 호출자 |

pub mod auth_token;
pub mod auth_user;
pub mod auth_callback;
pub mod auth_response;

pub use auth_token::*;
pub use auth_user::*;
pub use auth_callback::*;
pub use auth_response::*;

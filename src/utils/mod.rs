//! 공통 유틸리티 함수 모듈
//!
//! 엔진과 어댑터 전체에서 사용되는 공통 유틸리티 함수들을 제공합니다.
//!
//! # Modules
//!
//! - [`url_builder`] - 순서 보존 쿼리 문자열 빌더
//! - [`string_utils`] - 문자열 검증, 정리, 마스킹 유틸리티
//! - [`json_utils`] - 프로바이더 응답 필드 접근자
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::utils::url_builder::UrlBuilder;
//! use crate::utils::json_utils::str_field;
//!
//! let url = UrlBuilder::from_base_url(&descriptor.authorize)
//!     .query_param("state", state)
//!     .build();
//!
//! let uuid = str_field(&raw, "userID");
//! ```

pub mod url_builder;
pub mod string_utils;
pub mod json_utils;

//! # 프로바이더 계층
//!
//! 프로바이더 엔드포인트 기술자, 어댑터 계약, 이름 기반 레지스트리,
//! 그리고 기본 제공 어댑터들을 모아둔 모듈입니다.
//!
//! | 프로바이더 | 어댑터 | 특이사항 |
//! |-----------|--------|----------|
//! | huawei | [`HuaweiAdapter`] | 반전된 성별 코드, `authorization_code` 콜백 필드 |
//! | linkedin | [`LinkedinAdapter`] | 지역화 이름, 최대 크기 아바타, 이메일 추가 호출 |
//! | douyin | [`DouyinAdapter`] | `data` 중첩 응답, `open_id` |
//! | meituan | [`MeituanAdapter`] | `app_id`/`secret` 파라미터 |

pub mod adapter;
pub mod descriptor;
pub mod registry;

pub mod douyin;
pub mod huawei;
pub mod linkedin;
pub mod meituan;

pub use adapter::*;
pub use descriptor::ProviderDescriptor;
pub use registry::ProviderRegistry;

pub use douyin::DouyinAdapter;
pub use huawei::HuaweiAdapter;
pub use linkedin::LinkedinAdapter;
pub use meituan::MeituanAdapter;
